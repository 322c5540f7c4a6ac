use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use super::{DirectoryError, RoomDirectory};
use crate::models::{ParticipantRecord, RoomRecord};

/// Every call the fake saw, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListParticipants(String),
    ListRooms,
    CreateRoom {
        name: String,
        empty_timeout: u32,
        max_participants: u32,
    },
    DeleteRoom(String),
    RemoveParticipant(String, String),
}

/// In-memory room directory with scriptable failures
#[derive(Default)]
pub struct FakeDirectory {
    participants: Mutex<HashMap<String, Vec<ParticipantRecord>>>,
    rooms: Mutex<Vec<RoomRecord>>,
    failing_removals: HashSet<String>,
    fail_list_participants: bool,
    fail_list_rooms: bool,
    fail_create: bool,
    fail_delete: bool,
    latency: Option<Duration>,
    calls: Mutex<Vec<Call>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_participants(self, room: &str, identities: &[&str]) -> Self {
        self.participants.lock().unwrap().insert(
            room.to_string(),
            identities.iter().map(|id| ParticipantRecord::new(*id)).collect(),
        );
        self
    }

    pub fn with_room(self, record: RoomRecord) -> Self {
        self.rooms.lock().unwrap().push(record);
        self
    }

    pub fn failing_removal_of(mut self, identity: &str) -> Self {
        self.failing_removals.insert(identity.to_string());
        self
    }

    pub fn failing_list_participants(mut self) -> Self {
        self.fail_list_participants = true;
        self
    }

    pub fn failing_list_rooms(mut self) -> Self {
        self.fail_list_rooms = true;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    /// Every call sleeps this long before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn unavailable() -> DirectoryError {
        DirectoryError::Backend("connection refused".to_string())
    }
}

#[async_trait]
impl RoomDirectory for FakeDirectory {
    async fn list_participants(
        &self,
        room: &str,
    ) -> Result<Vec<ParticipantRecord>, DirectoryError> {
        self.record(Call::ListParticipants(room.to_string())).await;
        if self.fail_list_participants {
            return Err(Self::unavailable());
        }
        Ok(self
            .participants
            .lock()
            .unwrap()
            .get(room)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, DirectoryError> {
        self.record(Call::ListRooms).await;
        if self.fail_list_rooms {
            return Err(Self::unavailable());
        }
        Ok(self.rooms.lock().unwrap().clone())
    }

    async fn create_room(
        &self,
        name: &str,
        empty_timeout: u32,
        max_participants: u32,
    ) -> Result<RoomRecord, DirectoryError> {
        self.record(Call::CreateRoom {
            name: name.to_string(),
            empty_timeout,
            max_participants,
        })
        .await;
        if self.fail_create {
            return Err(Self::unavailable());
        }

        let mut rooms = self.rooms.lock().unwrap();
        if rooms.iter().any(|r| r.name == name) {
            return Err(DirectoryError::Backend(
                "already_exists: room already exists".to_string(),
            ));
        }

        let record = RoomRecord {
            sid: Some(format!("RM_{}", name)),
            name: name.to_string(),
            num_participants: 0,
            creation_time: Some(Utc::now().timestamp()),
            empty_timeout,
            max_participants,
        };
        rooms.push(record.clone());
        Ok(record)
    }

    async fn delete_room(&self, room: &str) -> Result<(), DirectoryError> {
        self.record(Call::DeleteRoom(room.to_string())).await;
        if self.fail_delete {
            return Err(Self::unavailable());
        }
        self.rooms.lock().unwrap().retain(|r| r.name != room);
        self.participants.lock().unwrap().remove(room);
        Ok(())
    }

    async fn remove_participant(&self, room: &str, identity: &str) -> Result<(), DirectoryError> {
        self.record(Call::RemoveParticipant(
            room.to_string(),
            identity.to_string(),
        ))
        .await;
        if self.failing_removals.contains(identity) {
            return Err(DirectoryError::Backend(
                "not_found: participant not found".to_string(),
            ));
        }
        if let Some(members) = self.participants.lock().unwrap().get_mut(room) {
            members.retain(|p| p.identity != identity);
        }
        Ok(())
    }
}
