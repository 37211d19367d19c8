//! CORS middleware configuration
//!
//! Browsers call the relay directly, so any origin is allowed. Every
//! `OPTIONS` request is answered by the layer itself with an empty 200.

use axum::http::{header, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

/// Request headers the relay accepts from browsers
pub const ALLOWED_HEADERS: [HeaderName; 4] = [
    header::AUTHORIZATION,
    HeaderName::from_static("x-client-info"),
    HeaderName::from_static("apikey"),
    header::CONTENT_TYPE,
];

/// Create the permissive CORS layer used on every route
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS)
}
