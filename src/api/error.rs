//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use derive_more::Display;
use serde_json::json;
use tracing::{error, warn};

use crate::error::{GameError, GameErrorKind};

/// API error type.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ApiError {
    /// Malformed or invalid request (400).
    #[display("Invalid request: {_0}")]
    BadRequest(String),

    /// Caller must be signed in (401).
    #[display("Unauthenticated: {_0}")]
    Unauthenticated(String),

    /// No pending round, or the answer belongs to another round (403).
    #[display("Forbidden: {_0}")]
    Forbidden(String),

    /// Resource not found (404).
    #[display("Resource not found: {_0}")]
    NotFound(String),

    /// Record already exists (409).
    #[display("Conflict: {_0}")]
    Conflict(String),

    /// Internal server error (500).
    #[display("Internal server error: {_0}")]
    Internal(String),
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        match err.kind {
            GameErrorKind::Validation(msg) => Self::BadRequest(msg),
            GameErrorKind::NotFound(msg) => Self::NotFound(msg),
            GameErrorKind::Session(msg) => Self::Forbidden(msg),
            GameErrorKind::Conflict(msg) => Self::Conflict(msg),
            GameErrorKind::Unauthenticated(msg) => Self::Unauthenticated(msg),
            GameErrorKind::Database(msg) => {
                error!(file = err.file, line = err.line, "{}", msg);
                Self::Internal("storage failure".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "SESSION_ERROR", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };
        if status.is_client_error() {
            warn!(%status, code = error_code, "{}", message);
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
