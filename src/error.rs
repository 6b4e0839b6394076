//! Request-handling failure type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// A failure that carries the HTTP status it should produce.
#[derive(Debug, Clone, Error)]
#[error("{status}: {message}")]
pub struct HttpFailure {
    pub status: StatusCode,
    pub message: String,
}

impl HttpFailure {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for HttpFailure {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}
