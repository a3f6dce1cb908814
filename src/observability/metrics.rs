//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define relay metrics (requests, latency, upstream outcomes)
//! - Expose Prometheus-compatible metrics endpoint when configured
//!
//! # Metrics
//! - `relay_requests_total` (counter): inbound requests by status, outcome
//! - `relay_request_duration_seconds` (histogram): end-to-end latency
//! - `relay_upstream_calls_total` (counter): outbound calls by result
//!
//! # Design Decisions
//! - Without an installed recorder every call is a no-op
//! - Labels are low-cardinality: no bodies, no origins

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and serve it on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished inbound request.
pub fn record_request(status: u16, outcome: &'static str, start: Instant) {
    let status = status.to_string();
    counter!("relay_requests_total", "status" => status, "outcome" => outcome).increment(1);
    histogram!("relay_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record one outbound call by result (`success`, `failure`, `transport_error`).
pub fn record_upstream_call(result: &'static str) {
    counter!("relay_upstream_calls_total", "result" => result).increment(1);
}
