use std::sync::Arc;

use super::{generated_name, trimmed_or};
use crate::auth::TokenSigner;
use crate::config::Config;
use crate::directory::RoomDirectory;
use crate::error::Result;
use crate::models::{AccessGrant, AccessGrantRequest};

pub const DEFAULT_ROOM_NAME: &str = "default-room";

/// Issues join tokens and decides who hosts a room
pub struct GrantIssuer {
    signer: TokenSigner,
    directory: Arc<dyn RoomDirectory>,
    client_url: String,
}

impl GrantIssuer {
    pub fn new(config: &Config, signer: TokenSigner, directory: Arc<dyn RoomDirectory>) -> Self {
        Self {
            signer,
            directory,
            client_url: config.livekit_ws_url.clone(),
        }
    }

    pub async fn issue(&self, request: AccessGrantRequest) -> Result<AccessGrant> {
        let room_name = trimmed_or(&request.room_name, || DEFAULT_ROOM_NAME.to_string());
        let identity = trimmed_or(&request.participant_name, || generated_name("user"));

        let is_host = self.elect_host(&room_name, &identity, request.is_host).await;

        let token = self
            .signer
            .participant_token(&identity, &room_name, is_host)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to generate token"))?;

        tracing::info!(
            identity = %identity,
            room = %room_name,
            is_host,
            "Token generated"
        );

        Ok(AccessGrant {
            token,
            url: self.client_url.clone(),
            room_name,
            is_host,
        })
    }

    /// First arrival hosts. A failed participant query counts as an empty room:
    /// the room usually does not exist yet, and a flaky directory should not
    /// stop the first joiner from hosting. During a backend outage this elects
    /// every joiner.
    async fn elect_host(&self, room: &str, identity: &str, requested: bool) -> bool {
        if requested {
            return true;
        }

        let is_host = match self.directory.list_participants(room).await {
            Ok(participants) => participants.is_empty(),
            Err(e) => {
                tracing::warn!(room = %room, error = %e, "Participant query failed, electing host");
                true
            }
        };

        if is_host {
            tracing::info!(identity = %identity, room = %room, "Participant elected host");
        }
        is_host
    }
}
