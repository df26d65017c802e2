//! # CORS
//!
//! Cross-origin access is granted only to the exact origins in
//! [`AppConfig::allowed_origins`]. Requests without an `Origin` header are
//! same-origin or non-browser and are served unchanged. Requests from any
//! other origin are still served, but without allow headers, so browsers
//! refuse to expose the response.

use std::sync::Arc;

use axum::http::{header, request::Parts, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::state::AppConfig;

/// Build the CORS layer for `config`.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let config = Arc::new(config.clone());
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| config.allows_origin(origin.as_bytes()),
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}
