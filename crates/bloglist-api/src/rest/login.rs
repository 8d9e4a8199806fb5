//! `/api/login` handler.

use axum::{extract::State, Json};
use tracing::{debug, info};

use super::{blocking, ApiJson};
use crate::domain::{ApiError, ApiResult, Credentials, LoginView};
use crate::router::AppState;

/// Message for unknown users and wrong passwords alike.
pub const INVALID_CREDENTIALS: &str = "invalid username or password";

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<Json<LoginView>> {
    let Some(user) = state.users.find_by_username(&credentials.username).await? else {
        debug!(username = %credentials.username, "Login for unknown user");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    let hasher = state.hasher.clone();
    let stored = user.password_hash.clone();
    let password = credentials.password;
    let matches = blocking(move || hasher.verify(&password, &stored)).await?;

    if !matches {
        debug!(username = %user.username, "Login with wrong password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state.signer.issue(&user);
    info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok(Json(LoginView {
        token,
        username: user.username,
        name: user.name,
    }))
}
