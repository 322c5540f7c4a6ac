pub mod health;
pub mod rooms;
pub mod token;

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;

use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout();

    Router::new()
        .nest("/api", api_routes(request_timeout))
        .with_state(state)
}

fn api_routes(request_timeout: Duration) -> Router<AppState> {
    Router::new()
        .merge(token::token_routes())
        .merge(health::health_routes())
        .layer(TimeoutLayer::new(request_timeout))
        .nest("/rooms", rooms::room_routes(request_timeout))
}
