//! Single-route JSON relay for the BLS time-series API.

pub mod config;
pub mod error;
pub mod forwarder;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::schema::RelayConfig;
pub use error::RelayError;
pub use forwarder::{Forwarder, UpstreamResult};
pub use http::RelayServer;
pub use lifecycle::Shutdown;
