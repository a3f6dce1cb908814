//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, relay route)
//!     → request.rs (request ID, request span)
//!     → forwarder (validate, forward, classify)
//!     → response.rs (pass through or synthesize error, log outcome)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{RelayServer, RELAY_PATH};
