//! Error conversions from lower layers into [`ApiError`].

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use crate::auth::{PasswordError, TokenError};
use crate::domain::ApiError;
use crate::ports::StoreError;

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateUsername(_) => ApiError::bad_request(e.to_string()),
            StoreError::NotFound(what) => ApiError::not_found(what),
            StoreError::Backend(detail) => ApiError::internal(detail),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(_: TokenError) -> Self {
        ApiError::token_missing_or_invalid()
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        ApiError::internal(e.to_string())
    }
}

/// Oversized bodies keep their 413; every other body problem is a 400.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError::new(status, rejection.body_text())
    }
}
