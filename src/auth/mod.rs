use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{AccessTokenClaims, HostMetadata, VideoGrant};

/// Participant grants stay valid for a day
pub const PARTICIPANT_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Signs LiveKit-compatible access tokens (HS256, api key as issuer)
#[derive(Clone)]
pub struct TokenSigner {
    api_key: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenSigner {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            encoding_key: EncodingKey::from_secret(config.api_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.api_secret.as_bytes()),
        }
    }

    /// Sign an arbitrary grant for `identity`
    pub fn sign(
        &self,
        identity: &str,
        video: VideoGrant,
        metadata: Option<String>,
        valid_for_seconds: i64,
    ) -> Result<String> {
        let now = Utc::now().timestamp();

        // No iat: the backend's own SDKs leave it out
        let claims = AccessTokenClaims {
            exp: now + valid_for_seconds,
            nbf: now,
            iss: self.api_key.clone(),
            sub: identity.to_string(),
            video,
            metadata,
            name: None,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Join token for a participant, with host status as metadata
    pub fn participant_token(&self, identity: &str, room: &str, is_host: bool) -> Result<String> {
        let metadata = serde_json::to_string(&HostMetadata { is_host })
            .map_err(|e| AppError::Signing(e.to_string()))?;

        self.sign(
            identity,
            VideoGrant::join(room),
            Some(metadata),
            PARTICIPANT_TOKEN_TTL_SECONDS,
        )
    }

    /// Validate a token signed with the same key pair and return its claims
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.api_key.as_str()]);

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::BadRequest(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}
