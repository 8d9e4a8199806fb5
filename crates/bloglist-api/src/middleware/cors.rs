//! CORS layer built from [`CorsConfig`].

use crate::domain::CorsConfig;
use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer. A disabled config yields a layer that adds no
/// CORS headers at all.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::new();
    }

    let wildcard = |values: &[String]| values.iter().any(|v| v == "*");

    let mut cors = CorsLayer::new().max_age(Duration::from_secs(config.max_age));

    cors = if wildcard(&config.allowed_origins) {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    };

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    cors = if wildcard(&config.allowed_headers) {
        cors.allow_headers(Any)
    } else {
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors.allow_headers(headers)
    };

    cors
}
