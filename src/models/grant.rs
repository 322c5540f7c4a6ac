use serde::{Deserialize, Serialize};

/// Video capabilities carried in a LiveKit access token.
/// Unset fields are omitted so the claim set matches what the backend signs itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_join: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_publish: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_subscribe: Option<bool>,
}

impl VideoGrant {
    /// Join grant for a participant: publish + subscribe in one room
    pub fn join(room: &str) -> Self {
        Self {
            room_join: Some(true),
            room: Some(room.to_string()),
            can_publish: Some(true),
            can_subscribe: Some(true),
            ..Default::default()
        }
    }
}

/// JWT claims understood by the LiveKit token verifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub exp: i64,
    pub nbf: i64,
    pub iss: String, // api key
    pub sub: String, // participant identity
    pub video: VideoGrant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AccessTokenClaims {
    /// Parse the embedded participant metadata, if any
    pub fn host_metadata(&self) -> Option<HostMetadata> {
        self.metadata
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

/// Participant metadata embedded in every grant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostMetadata {
    pub is_host: bool,
}

/// Request body for POST /api/token
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGrantRequest {
    #[serde(default)]
    pub room_name: String,
    #[serde(default)]
    pub participant_name: String,
    /// Advisory only; the issuer decides
    #[serde(default)]
    pub is_host: bool,
}

/// Response body for POST /api/token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGrant {
    pub token: String,
    pub url: String,
    pub room_name: String,
    pub is_host: bool,
}
