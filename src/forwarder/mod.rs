//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! inbound body bytes
//!     → client.rs (JSON validation, outbound POST)
//!     → outcome.rs (UpstreamResult: Success / Failure)
//!     → error policy (pass through, or generic 500)
//!     → http layer builds the response
//! ```
//!
//! # Design Decisions
//! - Exactly one outbound call per valid inbound request
//! - Upstream bodies are relayed as raw bytes, never re-encoded
//! - Status semantics of the upstream are not interpreted

pub mod client;
pub mod outcome;

pub use client::Forwarder;
pub use outcome::{UpstreamReply, UpstreamResult};
