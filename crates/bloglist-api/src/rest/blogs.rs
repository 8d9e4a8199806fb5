//! `/api/blogs` handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use list_helper::BlogSummary;
use std::collections::HashMap;
use tracing::{debug, info};

use super::ApiJson;
use crate::domain::{ApiError, ApiResult, BlogId, BlogPatch, BlogView, NewBlog, User, UserId};
use crate::middleware::RequestToken;
use crate::router::AppState;

/// Message for a delete attempted by someone other than the owner.
pub const NOT_THE_AUTHOR: &str = "user is not the author of the blog";

/// `GET /api/blogs`
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<BlogView>>> {
    let blogs = state.blogs.list().await?;
    let users = state.users.list().await?;
    let owners: HashMap<UserId, &User> = users.iter().map(|u| (u.id, u)).collect();

    let views = blogs
        .into_iter()
        .map(|blog| {
            let owner = owners.get(&blog.user).copied();
            BlogView::new(blog, owner)
        })
        .collect();

    Ok(Json(views))
}

/// `GET /api/blogs/stats`
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<BlogSummary>> {
    let blogs = state.blogs.list().await?;
    Ok(Json(list_helper::summarize(&blogs)))
}

/// `GET /api/blogs/:id`
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<BlogView>> {
    let id: BlogId = id.parse()?;
    let blog = state.blogs.find(id).await?.ok_or_else(blog_not_found)?;
    let owner = state.users.find(blog.user).await?;

    Ok(Json(BlogView::new(blog, owner.as_ref())))
}

/// `POST /api/blogs`: owner is the token's user.
pub async fn create(
    State(state): State<AppState>,
    token: RequestToken,
    ApiJson(body): ApiJson<NewBlog>,
) -> ApiResult<(StatusCode, Json<BlogView>)> {
    let claims = token.require()?;

    // A valid token for a user that no longer exists is still unusable.
    let owner = state
        .users
        .find(claims.id)
        .await?
        .ok_or_else(ApiError::token_missing_or_invalid)?;

    let blog = state.blogs.insert(body.into_blog(owner.id)?).await?;
    state.users.attach_blog(owner.id, blog.id).await?;

    info!(blog_id = %blog.id, owner = %owner.username, "Blog created");
    Ok((StatusCode::CREATED, Json(BlogView::new(blog, Some(&owner)))))
}

/// `PUT /api/blogs/:id`: open to any caller.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<BlogPatch>,
) -> ApiResult<Json<BlogView>> {
    let id: BlogId = id.parse()?;
    patch.validate()?;

    let blog = state.blogs.update(id, patch).await?.ok_or_else(blog_not_found)?;
    let owner = state.users.find(blog.user).await?;

    debug!(blog_id = %blog.id, likes = blog.likes, "Blog updated");
    Ok(Json(BlogView::new(blog, owner.as_ref())))
}

/// `DELETE /api/blogs/:id`: owner only.
pub async fn delete(
    State(state): State<AppState>,
    token: RequestToken,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id: BlogId = id.parse()?;
    let claims = token.require()?;

    let blog = state.blogs.find(id).await?.ok_or_else(blog_not_found)?;
    if blog.user != claims.id {
        return Err(ApiError::unauthorized(NOT_THE_AUTHOR));
    }

    // Concurrent deletes of the same blog: only one sees it removed.
    if state.blogs.delete(id).await?.is_none() {
        return Err(blog_not_found());
    }
    state.users.detach_blog(blog.user, id).await?;

    info!(blog_id = %id, owner = %claims.username, "Blog deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn blog_not_found() -> ApiError {
    ApiError::not_found("blog")
}
