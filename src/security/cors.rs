//! Cross-origin policy.
//!
//! # Responsibilities
//! - Build the CORS layer from `CorsConfig`
//! - Answer preflight requests
//!
//! # Design Decisions
//! - Permissive mode allows any origin, method and header
//! - Strict mode allows exactly one origin and only the relay's methods

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, CorsLayer};

use crate::config::{CorsConfig, ValidationError};

/// Build the CORS layer for the relay route.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, ValidationError> {
    if !config.strict_origin {
        return Ok(CorsLayer::permissive());
    }

    let origin = match config.allowed_origin.as_deref() {
        Some(origin) if !origin.is_empty() => origin,
        _ => return Err(ValidationError::MissingAllowedOrigin),
    };
    let origin = HeaderValue::from_str(origin)
        .map_err(|_| ValidationError::InvalidAllowedOrigin(origin.to_string()))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request()))
}
