use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use tower_http::timeout::TimeoutLayer;

use crate::error::Result;
use crate::models::{
    CreateRoomRequest, EndMeetingResponse, MessageResponse, ParticipantList, RoomSummary,
};
use crate::state::AppState;

/// Room routes.
///
/// Ending a meeting sits outside the request timeout: it makes one backend call
/// per participant and must always reach the room deletion.
pub fn room_routes(request_timeout: Duration) -> Router<AppState> {
    Router::new()
        .route("/", get(list_rooms).post(create_room))
        .route("/{room_name}", delete(delete_room))
        .route("/{room_name}/participants", get(list_participants))
        .route(
            "/{room_name}/participants/{identity}",
            delete(kick_participant),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .route("/{room_name}/end", post(end_meeting))
}

/// GET /api/rooms - List active rooms in backend order
async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomSummary>>> {
    let rooms = state.lifecycle.list_rooms().await?;
    Ok(Json(rooms))
}

/// POST /api/rooms - Create a room; an empty name gets generated
async fn create_room(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateRoomRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RoomSummary>)> {
    let Json(request) = payload?;
    let room = state.lifecycle.create_room(&request.name).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// DELETE /api/rooms/:room_name
async fn delete_room(
    State(state): State<AppState>,
    Path(room_name): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.lifecycle.delete_room(&room_name).await?;
    Ok(Json(MessageResponse::new("Room deleted")))
}

/// GET /api/rooms/:room_name/participants
async fn list_participants(
    State(state): State<AppState>,
    Path(room_name): Path<String>,
) -> Result<Json<ParticipantList>> {
    let participants = state.lifecycle.list_participants(&room_name).await?;
    Ok(Json(ParticipantList { participants }))
}

/// DELETE /api/rooms/:room_name/participants/:identity
async fn kick_participant(
    State(state): State<AppState>,
    Path((room_name, identity)): Path<(String, String)>,
) -> Result<Json<MessageResponse>> {
    state
        .lifecycle
        .kick_participant(&room_name, &identity)
        .await?;

    Ok(Json(MessageResponse {
        message: "Participant removed".to_string(),
        identity: Some(identity),
    }))
}

/// POST /api/rooms/:room_name/end - Remove everyone and delete the room
async fn end_meeting(
    State(state): State<AppState>,
    Path(room_name): Path<String>,
) -> Result<Json<EndMeetingResponse>> {
    let report = state.lifecycle.end_meeting(&room_name).await?;

    Ok(Json(EndMeetingResponse {
        message: "Meeting ended".to_string(),
        removed: report.removed.len(),
        room_deleted: report.room_deleted(),
        failures: report.failures.into_iter().map(|f| f.identity).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use crate::api::test_support::{read_json, test_app, test_app_with};
    use crate::config::test_config;
    use crate::directory::fake::{Call, FakeDirectory};
    use crate::models::RoomRecord;

    fn empty(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_rooms_empty() {
        let app = test_app(Arc::new(FakeDirectory::new()));

        let res = app.oneshot(empty("GET", "/api/rooms")).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(read_json(res).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_list_rooms_backend_failure() {
        let app = test_app(Arc::new(FakeDirectory::new().failing_list_rooms()));

        let res = app.oneshot(empty("GET", "/api/rooms")).await.unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(res).await;
        assert!(body["error"]
            .as_str()
            .is_some_and(|e| e.starts_with("Failed to list rooms")));
    }

    #[tokio::test]
    async fn test_create_room_returns_created() {
        let app = test_app(Arc::new(FakeDirectory::new()));

        let req = Request::post("/api/rooms")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"planning"}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::CREATED);
        let body = read_json(res).await;
        assert_eq!(body["name"], "planning");
        assert_eq!(body["displayName"], "planning");
        assert_eq!(body["participants"], 0);
    }

    #[tokio::test]
    async fn test_create_room_backend_failure() {
        let app = test_app(Arc::new(FakeDirectory::new().failing_create()));

        let req = Request::post("/api/rooms")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"planning"}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(res).await;
        assert!(body["error"]
            .as_str()
            .is_some_and(|e| e.starts_with("Failed to create room")));
    }

    #[tokio::test]
    async fn test_slow_listing_hits_request_timeout() {
        let mut config = test_config();
        config.request_timeout_seconds = 1;
        let app = test_app_with(
            config,
            Arc::new(FakeDirectory::new().with_latency(Duration::from_millis(1500))),
        );

        let res = app.oneshot(empty("GET", "/api/rooms")).await.unwrap();

        assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_end_meeting_outlives_request_timeout() {
        let mut config = test_config();
        config.request_timeout_seconds = 1;
        let directory = Arc::new(
            FakeDirectory::new()
                .with_participants("standup", &["p1", "p2", "p3"])
                .failing_removal_of("p2")
                .with_latency(Duration::from_millis(400)),
        );

        let res = test_app_with(config, directory.clone())
            .oneshot(empty("POST", "/api/rooms/standup/end"))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = read_json(res).await;
        assert_eq!(body["removed"], 2);
        assert_eq!(body["failures"], serde_json::json!(["p2"]));
        assert_eq!(body["roomDeleted"], true);

        let calls = directory.calls();
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[0], Call::ListParticipants("standup".to_string()));
        for identity in ["p1", "p2", "p3"] {
            assert!(calls.contains(&Call::RemoveParticipant(
                "standup".to_string(),
                identity.to_string()
            )));
        }
        assert_eq!(calls[4], Call::DeleteRoom("standup".to_string()));
    }

    #[tokio::test]
    async fn test_kick_participant_failure_includes_detail() {
        let app = test_app(Arc::new(FakeDirectory::new().failing_removal_of("ghost")));

        let res = app
            .oneshot(empty("DELETE", "/api/rooms/standup/participants/ghost"))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(res).await;
        assert!(body["error"]
            .as_str()
            .is_some_and(|e| e.contains("participant not found")));
    }

    #[tokio::test]
    async fn test_kick_participant_ok() {
        let app = test_app(Arc::new(
            FakeDirectory::new().with_participants("standup", &["bob"]),
        ));

        let res = app
            .oneshot(empty("DELETE", "/api/rooms/standup/participants/bob"))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = read_json(res).await;
        assert_eq!(body["message"], "Participant removed");
        assert_eq!(body["identity"], "bob");
    }

    #[tokio::test]
    async fn test_end_meeting_reports_partial_failure() {
        let app = test_app(Arc::new(
            FakeDirectory::new()
                .with_participants("standup", &["p1", "p2", "p3"])
                .failing_removal_of("p2"),
        ));

        let res = app
            .oneshot(empty("POST", "/api/rooms/standup/end"))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = read_json(res).await;
        assert_eq!(body["message"], "Meeting ended");
        assert_eq!(body["removed"], 2);
        assert_eq!(body["failures"], serde_json::json!(["p2"]));
        assert_eq!(body["roomDeleted"], true);
    }

    #[tokio::test]
    async fn test_end_meeting_listing_failure() {
        let app = test_app(Arc::new(FakeDirectory::new().failing_list_participants()));

        let res = app
            .oneshot(empty("POST", "/api/rooms/standup/end"))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_list_participants_and_delete() {
        let directory = Arc::new(
            FakeDirectory::new()
                .with_room(RoomRecord {
                    name: "standup".to_string(),
                    ..Default::default()
                })
                .with_participants("standup", &["alice"]),
        );

        let res = test_app(directory.clone())
            .oneshot(empty("GET", "/api/rooms/standup/participants"))
            .await
            .unwrap();
        let body = read_json(res).await;
        assert_eq!(body["participants"][0]["identity"], "alice");

        let res = test_app(directory)
            .oneshot(empty("DELETE", "/api/rooms/standup"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(read_json(res).await["message"], "Room deleted");
    }
}
