//! Request limits.
//!
//! # Responsibilities
//! - Enforce maximum request body size
//!
//! # Design Decisions
//! - Enforced by the body extractor, so oversized bodies become a JSON 413
//!   through `RelayError` instead of a bare layer response

use axum::extract::DefaultBodyLimit;

use crate::config::LimitsConfig;

pub fn body_limit(config: &LimitsConfig) -> DefaultBodyLimit {
    DefaultBodyLimit::max(config.max_body_bytes)
}
