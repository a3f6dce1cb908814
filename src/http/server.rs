//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single relay route
//! - Wire up middleware (CORS, request ID, tracing, body limit)
//! - Serve on a bound listener until shutdown
//! - Hand request bodies to the forwarder and build responses

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, State},
    http::HeaderMap,
    response::Response,
    routing::post,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::MakeRequestUuid,
    trace::TraceLayer,
    ServiceBuilderExt,
};

use crate::config::{ConfigError, RelayConfig};
use crate::error::RelayError;
use crate::forwarder::Forwarder;
use crate::http::request::{make_request_span, request_id};
use crate::http::response::{outcome_label, relay_response};
use crate::observability::metrics;
use crate::security::{body_limit, cors_layer};

/// The one route the relay serves.
pub const RELAY_PATH: &str = "/api/publicAPI/v2/timeseries/data";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the relay.
pub struct RelayServer {
    router: Router,
    config: RelayConfig,
}

impl RelayServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, ConfigError> {
        let forwarder = Arc::new(Forwarder::new(&config.upstream)?);
        let state = AppState { forwarder };

        let router = Self::build_router(&config, state)?;
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Result<Router, ConfigError> {
        let cors = cors_layer(&config.cors).map_err(|e| ConfigError::Validation(vec![e]))?;

        let middleware = ServiceBuilder::new()
            .set_x_request_id(MakeRequestUuid)
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
            .propagate_x_request_id()
            .layer(cors);

        Ok(Router::new()
            .route(RELAY_PATH, post(relay_handler))
            .with_state(state)
            .layer(body_limit(&config.limits))
            .layer(middleware))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.url,
            strict_origin = self.config.cors.strict_origin,
            "Proxy server running on port {}",
            addr.port()
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Relay handler: validate, forward once, translate.
async fn relay_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers).to_string();

    tracing::debug!(
        request_id = %request_id,
        upstream = %state.forwarder.upstream(),
        "Relaying request"
    );

    let outcome = match body {
        Ok(bytes) => state.forwarder.handle(&bytes).await,
        Err(rejection) => Err(RelayError::from(rejection)),
    };

    let label = outcome_label(&outcome);
    let response = relay_response(&request_id, outcome);
    metrics::record_request(response.status().as_u16(), label, start_time);
    response
}
