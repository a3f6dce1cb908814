//! Request handling.
//!
//! # Responsibilities
//! - Attach a unique request ID (UUID v4) as early as possible
//! - Expose the ID to handlers and trace spans
//!
//! # Design Decisions
//! - A client-supplied `x-request-id` is kept, not replaced
//! - The ID is echoed on the response for correlation

use axum::http::{HeaderMap, HeaderName, Request};
use tracing::Span;

/// Header carrying the per-request correlation ID.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Read the request ID, or `"unknown"` before the ID layer has run.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Span for one inbound request, used by the trace layer.
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id(request.headers()),
    )
}
