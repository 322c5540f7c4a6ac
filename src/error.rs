use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::directory::DirectoryError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Directory(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl AppError {
    /// Wrap a directory failure with the operation it interrupted
    pub fn directory(context: &str, err: DirectoryError) -> Self {
        AppError::Directory(format!("{}: {}", context, err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Directory(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            // Signing detail stays in the logs
            AppError::Signing(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate token".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));

        (status, body).into_response()
    }
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        AppError::Directory(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Signing(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
