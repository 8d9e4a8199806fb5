//! Middleware stack for the Blog List API.
//!
//! Layer order: Request → Tracing → CORS → Token → BodyLimit → Handler

pub mod auth;
pub mod cors;
pub mod tracing;

pub use auth::{RequestToken, TokenLayer};
pub use cors::create_cors_layer;
pub use tracing::{TracingLayer, REQUEST_ID_HEADER};
