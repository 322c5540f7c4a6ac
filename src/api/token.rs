use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};

use crate::error::Result;
use crate::models::{AccessGrant, AccessGrantRequest};
use crate::state::AppState;

pub fn token_routes() -> Router<AppState> {
    Router::new().route("/token", post(issue_token))
}

/// POST /api/token - Issue a join token, electing a host if the room is empty
async fn issue_token(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AccessGrantRequest>, JsonRejection>,
) -> Result<Json<AccessGrant>> {
    let Json(request) = payload?;
    let grant = state.grants.issue(request).await?;
    Ok(Json(grant))
}
