//! HTTP handlers.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/health` | [`health`] |
//! | GET, POST | `/api/blogs` | [`blogs::list`], [`blogs::create`] |
//! | GET | `/api/blogs/stats` | [`blogs::stats`] |
//! | GET, PUT, DELETE | `/api/blogs/:id` | [`blogs::get`], [`blogs::update`], [`blogs::delete`] |
//! | GET, POST | `/api/users` | [`users::list`], [`users::register`] |
//! | POST | `/api/login` | [`login::login`] |

pub mod blogs;
pub mod login;
pub mod users;

use axum::extract::FromRequest;
use axum::Json;
use serde_json::{json, Value};

use crate::domain::ApiError;
use crate::VERSION;

/// JSON body extractor whose rejections render as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

/// Run a CPU-heavy closure off the async workers.
pub(crate) async fn blocking<F, T, E>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(format!("blocking task failed: {}", e)))?
        .map_err(Into::into)
}
