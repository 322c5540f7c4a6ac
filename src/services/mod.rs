pub mod grant_issuer;
pub mod lifecycle;

pub use grant_issuer::{GrantIssuer, DEFAULT_ROOM_NAME};
pub use lifecycle::{
    LifecycleOrchestrator, RemovalFailure, TeardownReport, ROOM_EMPTY_TIMEOUT_SECONDS,
    ROOM_MAX_PARTICIPANTS,
};

use chrono::Utc;
use uuid::Uuid;

/// `<prefix>-<unix seconds>-<random>`; the suffix keeps same-second calls apart
pub(crate) fn generated_name(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, Utc::now().timestamp(), &suffix[..8])
}

/// Trimmed input, or `fallback()` when nothing is left
pub(crate) fn trimmed_or(input: &str, fallback: impl FnOnce() -> String) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        fallback()
    } else {
        trimmed.to_string()
    }
}
