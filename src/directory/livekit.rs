use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use livekit_api::services::room::{CreateRoomOptions, RoomClient};
use livekit_api::services::ServiceError;

use super::{DirectoryError, RoomDirectory};
use crate::config::Config;
use crate::models::{ParticipantRecord, RoomRecord};

/// LiveKit room service client
#[derive(Clone)]
pub struct LiveKitDirectory {
    room_client: Arc<RoomClient>,
    timeout: Duration,
}

impl LiveKitDirectory {
    pub fn new(config: &Config) -> Self {
        let room_client = RoomClient::with_api_key(
            config.livekit_url.trim_end_matches('/'),
            &config.api_key,
            &config.api_secret,
        );

        Self {
            room_client: Arc::new(room_client),
            timeout: config.backend_timeout(),
        }
    }

    /// Bound a room-service call by the configured backend timeout
    async fn bounded<T, F>(&self, call: F) -> Result<T, DirectoryError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(DirectoryError::from),
            Err(_) => Err(DirectoryError::Timeout(self.timeout.as_secs())),
        }
    }
}

impl From<ServiceError> for DirectoryError {
    fn from(err: ServiceError) -> Self {
        DirectoryError::Backend(err.to_string())
    }
}

/// 0 means unset in the backend's wire format
fn timestamp(value: i64) -> Option<i64> {
    (value > 0).then_some(value)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[async_trait]
impl RoomDirectory for LiveKitDirectory {
    async fn list_participants(
        &self,
        room: &str,
    ) -> Result<Vec<ParticipantRecord>, DirectoryError> {
        let participants = self
            .bounded(self.room_client.list_participants(room))
            .await
            .inspect_err(|e| {
                // Expected when the room does not exist yet
                tracing::warn!(room = %room, error = %e, "List participants failed");
            })?;

        Ok(participants
            .into_iter()
            .map(|p| ParticipantRecord {
                identity: p.identity,
                sid: non_empty(p.sid),
                name: non_empty(p.name),
                metadata: non_empty(p.metadata),
                joined_at: timestamp(p.joined_at),
                is_publisher: p.is_publisher,
            })
            .collect())
    }

    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, DirectoryError> {
        let rooms = self
            .bounded(self.room_client.list_rooms(Vec::new()))
            .await?;

        Ok(rooms
            .into_iter()
            .map(|r| RoomRecord {
                sid: non_empty(r.sid),
                name: r.name,
                num_participants: r.num_participants,
                creation_time: timestamp(r.creation_time),
                empty_timeout: r.empty_timeout,
                max_participants: r.max_participants,
            })
            .collect())
    }

    async fn create_room(
        &self,
        name: &str,
        empty_timeout: u32,
        max_participants: u32,
    ) -> Result<RoomRecord, DirectoryError> {
        let options = CreateRoomOptions {
            empty_timeout,
            max_participants,
            ..Default::default()
        };

        let room = self
            .bounded(self.room_client.create_room(name, options))
            .await?;

        tracing::info!(room = %room.name, "Room created on backend");
        Ok(RoomRecord {
            sid: non_empty(room.sid),
            name: room.name,
            num_participants: room.num_participants,
            creation_time: timestamp(room.creation_time),
            empty_timeout: room.empty_timeout,
            max_participants: room.max_participants,
        })
    }

    async fn delete_room(&self, room: &str) -> Result<(), DirectoryError> {
        self.bounded(self.room_client.delete_room(room)).await?;

        tracing::info!(room = %room, "Room deleted on backend");
        Ok(())
    }

    async fn remove_participant(&self, room: &str, identity: &str) -> Result<(), DirectoryError> {
        self.bounded(self.room_client.remove_participant(room, identity))
            .await?;

        tracing::debug!(room = %room, identity = %identity, "Participant removed on backend");
        Ok(())
    }
}
