//! Domain types for the Blog List API.
//!
//! Configuration, error handling, and the entity / request / view types.

pub mod config;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use config::{AuthConfig, ConfigError, CorsConfig, HttpConfig, ServiceConfig};
pub use error::{ApiError, ApiResult, ServiceError};
pub use types::*;
