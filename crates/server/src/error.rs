//! Mapping from domain failures to HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use library::LookupError;
use stream::RangeError;

/// Application error types surfaced by the HTTP handlers
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, message).into_response()
    }
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(_) => AppError::NotFound(err.to_string()),
            LookupError::InvalidName(_) => AppError::BadRequest(err.to_string()),
            LookupError::Io(e) => AppError::Internal(format!("Failed to probe movie library: {}", e)),
        }
    }
}

// Both malformed headers and out-of-bounds starts answer 400; this server
// treats an out-of-range start as a bad request rather than answering 416.
impl From<RangeError> for AppError {
    fn from(err: RangeError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
