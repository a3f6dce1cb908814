//! The single-route forwarder.
//!
//! # Responsibilities
//! - Validate the inbound body is JSON
//! - POST it to the configured upstream, exactly once
//! - Classify the answer and apply the upstream error policy
//!
//! # Design Decisions
//! - One `reqwest::Client` shared by all requests; no per-request state
//! - No retries and no timeout unless one is configured
//! - Transport failures surface as `RelayError::Transport`, never as a fake reply

use std::time::Duration;

use axum::http::header;
use serde_json::Value;
use url::Url;

use crate::config::{ConfigError, UpstreamConfig};
use crate::error::RelayError;
use crate::forwarder::outcome::UpstreamResult;
use crate::observability::metrics;

/// Relays JSON bodies to one upstream endpoint.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    upstream: Url,
    passthrough_upstream_error_body: bool,
}

impl Forwarder {
    /// Build a forwarder from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ConfigError> {
        let upstream = Url::parse(&config.url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            upstream,
            passthrough_upstream_error_body: config.passthrough_upstream_error_body,
        })
    }

    pub fn upstream(&self) -> &Url {
        &self.upstream
    }

    /// Parse `body` as JSON, forward it, and apply the error policy.
    ///
    /// Returns the upstream result to pass through to the caller, or the
    /// error that replaces it.
    pub async fn handle(&self, body: &[u8]) -> Result<UpstreamResult, RelayError> {
        let payload: Value = serde_json::from_slice(body)?;
        let result = self.forward(&payload).await?;

        if !result.is_success() && !self.passthrough_upstream_error_body {
            return Err(RelayError::UpstreamRejected(result.status()));
        }
        Ok(result)
    }

    /// Issue the outbound POST and read the full response.
    pub async fn forward(&self, payload: &Value) -> Result<UpstreamResult, reqwest::Error> {
        let outcome = self.send(payload).await;
        metrics::record_upstream_call(match &outcome {
            Ok(result) if result.is_success() => "success",
            Ok(_) => "failure",
            Err(_) => "transport_error",
        });
        outcome
    }

    async fn send(&self, payload: &Value) -> Result<UpstreamResult, reqwest::Error> {
        let response = self
            .client
            .post(self.upstream.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        tracing::debug!(
            upstream = %self.upstream,
            status = %status,
            bytes = body.len(),
            "Upstream responded"
        );

        Ok(UpstreamResult::new(status, content_type, body))
    }
}
