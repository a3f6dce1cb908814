//! Error types for request handling.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Body of every synthesized 500.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal Server Error";

/// Errors that terminate a single relayed request.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RelayError {
    /// The inbound body is not syntactically valid JSON.
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The inbound body could not be read (too large, aborted, ...).
    #[error("{0}")]
    Body(#[from] BytesRejection),

    /// The upstream could not be reached or its response could not be read.
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered non-2xx and passthrough is disabled.
    #[error("upstream returned {0}")]
    UpstreamRejected(StatusCode),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            RelayError::Body(rejection) => rejection.status(),
            RelayError::Transport(_) | RelayError::UpstreamRejected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Upstream failures never leak their cause to the caller.
        let message = if status.is_server_error() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
