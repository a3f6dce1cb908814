//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use tokio::net::TcpListener;

use timeseries_relay::config::RelayConfig;
use timeseries_relay::{RelayServer, Shutdown};

/// A request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct Captured {
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Handle to a running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    pub calls: Arc<Mutex<Vec<Captured>>>,
}

impl MockUpstream {
    pub fn url(&self) -> String {
        format!("http://{}/publicAPI/v2/timeseries/data/", self.addr)
    }

    pub fn calls(&self) -> Vec<Captured> {
        self.calls.lock().unwrap().clone()
    }
}

struct MockState<F> {
    respond: Arc<F>,
    calls: Arc<Mutex<Vec<Captured>>>,
}

impl<F> Clone for MockState<F> {
    fn clone(&self) -> Self {
        Self {
            respond: self.respond.clone(),
            calls: self.calls.clone(),
        }
    }
}

/// Start a programmable mock upstream. `respond` receives the raw body and
/// returns the status and body to answer with.
pub async fn start_programmable_upstream<F, Fut>(respond: F) -> MockUpstream
where
    F: Fn(Bytes) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        respond: Arc::new(respond),
        calls: calls.clone(),
    };

    let app = Router::new()
        .route("/publicAPI/v2/timeseries/data/", post(mock_handler::<F, Fut>))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, calls }
}

async fn mock_handler<F, Fut>(
    State(state): State<MockState<F>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse
where
    F: Fn(Bytes) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    state.calls.lock().unwrap().push(Captured {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    });

    let (status, reply) = (state.respond)(body).await;
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        reply,
    )
}

/// Start a mock upstream that always answers with `status` and `body`.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> MockUpstream {
    start_programmable_upstream(move |_| async move { (status, body.to_string()) }).await
}

/// Address on loopback where nothing listens.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Start the relay on an ephemeral port. Returns its base URL.
pub async fn start_relay(config: RelayConfig, shutdown: &Shutdown) -> String {
    let server = RelayServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://{}{}", addr, timeseries_relay::http::RELAY_PATH)
}

/// Test client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Config pointing the relay at `upstream_url`.
pub fn config_for(upstream_url: String) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.upstream.url = upstream_url;
    config.upstream.timeout_secs = Some(5);
    config.upstream.system_proxy = false;
    config
}
