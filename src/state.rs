use std::sync::Arc;

use crate::auth::TokenSigner;
use crate::config::Config;
use crate::directory::RoomDirectory;
use crate::services::{GrantIssuer, LifecycleOrchestrator};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub grants: Arc<GrantIssuer>,
    pub lifecycle: Arc<LifecycleOrchestrator>,
}

impl AppState {
    pub fn new(config: Config, signer: TokenSigner, directory: Arc<dyn RoomDirectory>) -> Self {
        let grants = GrantIssuer::new(&config, signer, directory.clone());
        let lifecycle = LifecycleOrchestrator::new(directory);

        Self {
            config: Arc::new(config),
            grants: Arc::new(grants),
            lifecycle: Arc::new(lifecycle),
        }
    }
}
