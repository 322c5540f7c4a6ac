//! Room directory: the conferencing backend's administrative surface.

pub mod livekit;

#[cfg(test)]
pub(crate) mod fake;

pub use livekit::LiveKitDirectory;

use async_trait::async_trait;

use crate::models::{ParticipantRecord, RoomRecord};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("room service error: {0}")]
    Backend(String),

    #[error("room service did not answer within {0}s")]
    Timeout(u64),
}

/// Administrative operations on the conferencing backend.
///
/// Callers treat every error the same way: the call failed.
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    async fn list_participants(&self, room: &str)
        -> Result<Vec<ParticipantRecord>, DirectoryError>;

    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, DirectoryError>;

    async fn create_room(
        &self,
        name: &str,
        empty_timeout: u32,
        max_participants: u32,
    ) -> Result<RoomRecord, DirectoryError>;

    async fn delete_room(&self, room: &str) -> Result<(), DirectoryError>;

    async fn remove_participant(&self, room: &str, identity: &str)
        -> Result<(), DirectoryError>;
}
