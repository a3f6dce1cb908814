//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (preflight, allowed origin)
//!     → limits.rs (request body size)
//!     → Pass to forwarder
//! ```
//!
//! # Design Decisions
//! - CORS headers on every response, including errors
//! - Body limit applies before any JSON parsing

pub mod cors;
pub mod limits;

pub use cors::cors_layer;
pub use limits::body_limit;
