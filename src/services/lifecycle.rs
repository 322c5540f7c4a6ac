use std::sync::Arc;

use super::generated_name;
use crate::directory::RoomDirectory;
use crate::error::{AppError, Result};
use crate::models::{ParticipantRecord, RoomSummary};

/// Seconds an empty room survives before the backend closes it
pub const ROOM_EMPTY_TIMEOUT_SECONDS: u32 = 300;
pub const ROOM_MAX_PARTICIPANTS: u32 = 50;

/// Room administration on top of the directory
pub struct LifecycleOrchestrator {
    directory: Arc<dyn RoomDirectory>,
}

/// A participant that could not be removed during teardown
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalFailure {
    pub identity: String,
    pub reason: String,
}

/// Outcome of ending a meeting. Partial failures do not make it an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeardownReport {
    pub room: String,
    pub removed: Vec<String>,
    pub failures: Vec<RemovalFailure>,
    /// Set when the final room deletion failed
    pub delete_error: Option<String>,
}

impl TeardownReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.delete_error.is_none()
    }

    pub fn room_deleted(&self) -> bool {
        self.delete_error.is_none()
    }
}

impl LifecycleOrchestrator {
    pub fn new(directory: Arc<dyn RoomDirectory>) -> Self {
        Self { directory }
    }

    pub async fn list_rooms(&self) -> Result<Vec<RoomSummary>> {
        let rooms = self
            .directory
            .list_rooms()
            .await
            .map_err(|e| AppError::directory("Failed to list rooms", e))?;

        Ok(rooms.into_iter().map(RoomSummary::from).collect())
    }

    pub async fn create_room(&self, name: &str) -> Result<RoomSummary> {
        let name = if name.is_empty() {
            generated_name("room")
        } else {
            name.to_string()
        };

        let room = self
            .directory
            .create_room(&name, ROOM_EMPTY_TIMEOUT_SECONDS, ROOM_MAX_PARTICIPANTS)
            .await
            .map_err(|e| AppError::directory("Failed to create room", e))?;

        tracing::info!(room = %room.name, "Room created");
        Ok(room.into())
    }

    pub async fn delete_room(&self, room: &str) -> Result<()> {
        self.directory
            .delete_room(room)
            .await
            .map_err(|e| AppError::directory("Failed to delete room", e))?;

        tracing::info!(room = %room, "Room deleted");
        Ok(())
    }

    pub async fn list_participants(&self, room: &str) -> Result<Vec<ParticipantRecord>> {
        self.directory
            .list_participants(room)
            .await
            .map_err(|e| AppError::directory("Failed to list participants", e))
    }

    pub async fn kick_participant(&self, room: &str, identity: &str) -> Result<()> {
        self.directory
            .remove_participant(room, identity)
            .await
            .map_err(|e| AppError::directory("Failed to remove participant", e))?;

        tracing::info!(room = %room, identity = %identity, "Participant removed");
        Ok(())
    }

    /// Remove everyone, then delete the room.
    ///
    /// Only a failed participant listing aborts; removal and deletion
    /// failures are logged and collected in the report.
    pub async fn end_meeting(&self, room: &str) -> Result<TeardownReport> {
        let participants = self
            .directory
            .list_participants(room)
            .await
            .map_err(|e| AppError::directory("Failed to end meeting", e))?;

        let mut report = TeardownReport {
            room: room.to_string(),
            ..Default::default()
        };

        for participant in participants {
            match self
                .directory
                .remove_participant(room, &participant.identity)
                .await
            {
                Ok(()) => report.removed.push(participant.identity),
                Err(e) => {
                    tracing::error!(
                        room = %room,
                        identity = %participant.identity,
                        error = %e,
                        "Failed to remove participant"
                    );
                    report.failures.push(RemovalFailure {
                        identity: participant.identity,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if let Err(e) = self.directory.delete_room(room).await {
            tracing::error!(room = %room, error = %e, "Failed to delete room");
            report.delete_error = Some(e.to_string());
        }

        tracing::info!(
            room = %room,
            removed = report.removed.len(),
            failed = report.failures.len(),
            "Meeting ended"
        );

        Ok(report)
    }
}
