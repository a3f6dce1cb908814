//! Timeseries relay
//!
//! Accepts `POST /api/publicAPI/v2/timeseries/data`, forwards the JSON body
//! to the configured upstream and relays the answer back.
//!
//! ```text
//!     Client ──POST──▶ ┌──────────────────────────────┐ ──POST──▶ Upstream
//!                      │ cors · request id · trace    │           (api.bls.gov)
//!                      │ body limit → forwarder       │
//!     Client ◀──────── │ pass-through / error mapping │ ◀────────
//!                      └──────────────────────────────┘
//! ```

use std::net::SocketAddr;

use tokio::net::TcpListener;

use timeseries_relay::config::load_from_env;
use timeseries_relay::lifecycle::{signals, Shutdown};
use timeseries_relay::observability::{logging, metrics};
use timeseries_relay::RelayServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;

    logging::init_logging(&config.observability)?;

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.url,
        passthrough_upstream_error_body = config.upstream.passthrough_upstream_error_body,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    if let Some(addr) = &config.observability.metrics_address {
        let addr: SocketAddr = addr.parse()?;
        metrics::init_metrics(addr)?;
    }

    let server = RelayServer::new(config)?;
    let listener = TcpListener::bind(server.config().listener.bind_address()).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
