//! `/api/users` handlers.

use axum::{extract::State, Json};
use tracing::info;

use super::{blocking, ApiJson};
use crate::domain::{ApiError, ApiResult, NewUser, User, UserId, UserView};
use crate::router::AppState;

/// Message for a registration that collides with an existing user.
pub const USERNAME_TAKEN: &str = "username already taken";

/// `GET /api/users`
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<UserView>>> {
    let users = state.users.list().await?;
    let catalog = state.blogs.list().await?;

    let views = users
        .into_iter()
        .map(|user| UserView::new(user, &catalog))
        .collect();

    Ok(Json(views))
}

/// `POST /api/users`
///
/// Password rules are checked before username rules.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewUser>,
) -> ApiResult<Json<UserView>> {
    let password = checked(
        body.password,
        "password",
        "Password",
        state.rules.password_min_length,
    )?;
    let username = checked(
        body.username,
        "username",
        "Username",
        state.rules.username_min_length,
    )?;

    if state.users.find_by_username(&username).await?.is_some() {
        return Err(ApiError::bad_request(USERNAME_TAKEN));
    }

    let hasher = state.hasher.clone();
    let password_hash = blocking(move || hasher.hash(&password)).await?;

    // The store re-checks uniqueness atomically; a racing registration
    // surfaces here as DuplicateUsername.
    let user = state
        .users
        .insert(User {
            id: UserId::new(),
            username,
            name: body.name.unwrap_or_default(),
            password_hash,
            blogs: Vec::new(),
        })
        .await?;

    info!(user_id = %user.id, username = %user.username, "User registered");
    Ok(Json(UserView::new(user, &[])))
}

fn checked(value: Option<String>, field: &str, label: &str, min_length: usize) -> Result<String, ApiError> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("Missing {}", field)))?;

    if value.chars().count() < min_length {
        return Err(ApiError::bad_request(format!(
            "{} must have a minimum length of {} characters",
            label, min_length
        )));
    }

    Ok(value)
}
