//! API error type and lifecycle errors.
//!
//! Every handler failure becomes an [`ApiError`], rendered as the HTTP status
//! plus a `{"error": "<message>"}` JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;
use tracing::error;

use crate::domain::config::ConfigError;

/// Message sent for malformed entity ids.
pub const MALFORMATTED_ID: &str = "malformatted id";

/// Message sent when a protected route has no usable token.
pub const TOKEN_MISSING_OR_INVALID: &str = "token missing or invalid";

/// HTTP-facing error with status and client-visible message.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Response status
    pub status: StatusCode,
    /// Message placed in the `error` field of the body
    pub message: String,
    /// Server-side detail, logged but never sent
    detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    /// 400 - request failed validation
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 400 - path id could not be parsed
    pub fn malformatted_id() -> Self {
        Self::bad_request(MALFORMATTED_ID)
    }

    /// 401 - missing, invalid, or insufficient credentials
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// 401 with the standard token message
    pub fn token_missing_or_invalid() -> Self {
        Self::unauthorized(TOKEN_MISSING_OR_INVALID)
    }

    /// 404 - entity does not exist
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{} not found", resource.into()))
    }

    /// 500 - the detail is logged, the client gets a generic message
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_string(),
            detail: Some(detail.into()),
        }
    }

    /// Server-side detail for internal errors
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "[{}] {} ({})", self.status.as_u16(), self.message, detail),
            None => write!(f, "[{}] {}", self.status.as_u16(), self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                status = self.status.as_u16(),
                detail = self.detail.as_deref().unwrap_or(""),
                "Request failed"
            );
        }

        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

/// Result type for handler operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Service lifecycle errors (startup and serving, not per-request)
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration rejected
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Listener could not bind
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Server loop failed
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
