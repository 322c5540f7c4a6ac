use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Room as reported by the conferencing backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomRecord {
    pub sid: Option<String>,
    pub name: String,
    pub num_participants: u32,
    /// Unix seconds; `None` when the backend did not report it
    pub creation_time: Option<i64>,
    pub empty_timeout: u32,
    pub max_participants: u32,
}

/// Participant as reported by the conferencing backend
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<i64>,
    pub is_publisher: bool,
}

impl ParticipantRecord {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            ..Default::default()
        }
    }
}

/// Room information returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub name: String,
    pub display_name: String,
    pub participants: u32,
    pub created_at: DateTime<Utc>,
}

impl From<RoomRecord> for RoomSummary {
    fn from(record: RoomRecord) -> Self {
        let created_at = record
            .creation_time
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .unwrap_or_else(Utc::now);

        Self {
            display_name: record.name.clone(),
            name: record.name,
            participants: record.num_participants,
            created_at,
        }
    }
}

/// Request to create a room
#[derive(Debug, Default, Deserialize)]
pub struct CreateRoomRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ParticipantList {
    pub participants: Vec<ParticipantRecord>,
}

/// Generic acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            identity: None,
        }
    }
}

/// Response after ending a meeting; failures are identities that could not be removed
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndMeetingResponse {
    pub message: String,
    pub removed: usize,
    pub failures: Vec<String>,
    pub room_deleted: bool,
}
