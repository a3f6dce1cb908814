//! Response handling.
//!
//! # Responsibilities
//! - Turn a forwarding outcome into the client response
//! - Log the outcome with the request ID, hiding transport causes from clients
//! - Label the outcome for metrics
//!
//! # Design Decisions
//! - Upstream status and body are passed through untouched
//! - Only two bodies are ever synthesized: `{"error": <parse message>}` for
//!   client input and `{"error": "Internal Server Error"}` for upstream trouble

use axum::response::{IntoResponse, Response};

use crate::error::RelayError;
use crate::forwarder::UpstreamResult;

/// Metrics label for an outcome.
pub fn outcome_label(outcome: &Result<UpstreamResult, RelayError>) -> &'static str {
    match outcome {
        Ok(UpstreamResult::Success(_)) => "upstream_success",
        Ok(UpstreamResult::Failure(_)) => "upstream_error",
        Err(RelayError::InvalidJson(_)) | Err(RelayError::Body(_)) => "client_error",
        Err(RelayError::UpstreamRejected(_)) => "upstream_error",
        Err(_) => "transport_error",
    }
}

/// Build the client response, logging anything that went wrong.
pub fn relay_response(request_id: &str, outcome: Result<UpstreamResult, RelayError>) -> Response {
    match outcome {
        Ok(result) => {
            if !result.is_success() {
                tracing::warn!(
                    request_id = %request_id,
                    status = %result.status(),
                    "Upstream returned error status, passing through"
                );
            }
            result.into_response()
        }
        Err(err) => {
            match &err {
                RelayError::InvalidJson(_) | RelayError::Body(_) => {
                    tracing::warn!(request_id = %request_id, error = %err, "Rejected inbound body");
                }
                _ => {
                    tracing::error!(request_id = %request_id, error = %err, "Upstream request failed");
                }
            }
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn failure_passes_through() {
        let body = Bytes::from_static(br#"{"status":"REQUEST_NOT_PROCESSED"}"#);
        let outcome = Ok(UpstreamResult::new(StatusCode::BAD_REQUEST, None, body.clone()));
        assert_eq!(outcome_label(&outcome), "upstream_error");

        let resp = relay_response("t-1", outcome);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let relayed = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(relayed, body);
    }

    #[test]
    fn labels() {
        let ok = Ok(UpstreamResult::new(StatusCode::OK, None, Bytes::new()));
        assert_eq!(outcome_label(&ok), "upstream_success");

        let parse = serde_json::from_slice::<serde_json::Value>(b"nope").unwrap_err();
        assert_eq!(outcome_label(&Err(RelayError::InvalidJson(parse))), "client_error");

        let rejected = Err(RelayError::UpstreamRejected(StatusCode::BAD_GATEWAY));
        assert_eq!(outcome_label(&rejected), "upstream_error");
    }
}
