//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! RelayConfig::default()
//!     → loader.rs (optional TOML file named by RELAY_CONFIG)
//!     → loader.rs (environment overrides: PROXY_PORT, ALLOWED_ORIGIN, ...)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → consumed once at startup by the HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow running with no configuration at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    CorsConfig, LimitsConfig, ListenerConfig, LogFormat, ObservabilityConfig, RelayConfig,
    UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
