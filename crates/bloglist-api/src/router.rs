use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::auth::{PasswordHasher, TokenSigner};
use crate::domain::ServiceConfig;
use crate::middleware::{create_cors_layer, TokenLayer, TracingLayer};
use crate::ports::{BlogRepository, UserRepository};
use crate::rest::{self, blogs, login, users};

/// Registration rules taken from `auth` config.
#[derive(Debug, Clone, Copy)]
pub struct CredentialRules {
    pub password_min_length: usize,
    pub username_min_length: usize,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepository>,
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<PasswordHasher>,
    pub signer: Arc<TokenSigner>,
    pub rules: CredentialRules,
}

/// Build the full router with the middleware stack.
///
/// Each `layer` call wraps everything added before it, so the last one is
/// outermost: Tracing → CORS → Token → BodyLimit → Handler.
pub fn build_router(state: AppState, config: &ServiceConfig) -> Router {
    let signer = Arc::clone(&state.signer);

    Router::new()
        .route("/health", get(rest::health))
        .route("/api/blogs", get(blogs::list).post(blogs::create))
        .route("/api/blogs/stats", get(blogs::stats))
        .route(
            "/api/blogs/:id",
            get(blogs::get).put(blogs::update).delete(blogs::delete),
        )
        .route("/api/users", get(users::list).post(users::register))
        .route("/api/login", post(login::login))
        .layer(RequestBodyLimitLayer::new(config.http.max_body_bytes))
        .layer(TokenLayer::new(signer))
        .layer(create_cors_layer(&config.cors))
        .layer(TracingLayer::new())
        .with_state(state)
}
