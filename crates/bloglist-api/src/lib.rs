//! Blog List API - users, authentication, and blog entries over a REST surface.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        BLOG LIST API                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                  Middleware Stack                      │  │
//! │  │     Tracing → CORS → Token → BodyLimit                 │  │
//! │  └──────────────────────────┬─────────────────────────────┘  │
//! │                             │                                │
//! │  ┌──────────────┬───────────┴──────┬───────────────────────┐ │
//! │  │ /api/blogs   │   /api/users     │   /api/login          │ │
//! │  └──────┬───────┴────────┬─────────┴───────────┬───────────┘ │
//! │         │                │                     │             │
//! │  list-helper      PasswordHasher          TokenSigner        │
//! │  (statistics)       (argon2id)          (HMAC-SHA256)        │
//! │         │                │                     │             │
//! │  ┌──────┴────────────────┴─────────────────────┴───────────┐ │
//! │  │        BlogRepository / UserRepository (ports)          │ │
//! │  └──────────────────────────┬──────────────────────────────┘ │
//! └─────────────────────────────┼────────────────────────────────┘
//!                               │
//!                   InMemoryStore or a document store
//! ```
//!
//! # Authorization
//!
//! - Creating a blog requires a valid bearer token; the token's user becomes
//!   the owner.
//! - Deleting a blog requires the owner's token.
//! - Updating a blog is open to any caller.
//!
//! # Usage
//!
//! ```ignore
//! use bloglist_api::{BlogListService, ServiceConfig};
//!
//! let mut config = ServiceConfig::default();
//! config.auth.secret = "change-me".into();
//!
//! let service = BlogListService::in_memory(config)?;
//! service.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod auth;
pub mod domain;
pub mod middleware;
pub mod ports;
pub mod rest;
pub mod router;
pub mod service;

// Re-exports for public API
pub use adapters::InMemoryStore;
pub use auth::{Claims, PasswordHasher, TokenError, TokenSigner};
pub use domain::config::{ConfigError, ServiceConfig};
pub use domain::error::{ApiError, ApiResult, ServiceError};
pub use domain::types::*;
pub use ports::{BlogRepository, StoreError, TimeSource, UserRepository};
pub use router::{build_router, AppState};
pub use service::BlogListService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
