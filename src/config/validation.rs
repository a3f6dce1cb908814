//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Upstream URL must be absolute http(s)
//! - Strict CORS mode must name a usable origin
//! - Value ranges (port, timeouts, body limit)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("upstream.url {url:?} is not a valid URL: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("upstream.url scheme must be http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("upstream.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("cors.strict_origin requires cors.allowed_origin")]
    MissingAllowedOrigin,

    #[error("cors.allowed_origin {0:?} is not a valid header value")]
    InvalidAllowedOrigin(String),

    #[error("listener.host must not be empty")]
    EmptyHost,

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.upstream.url) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string()));
            }
        }
        Err(e) => errors.push(ValidationError::InvalidUpstreamUrl {
            url: config.upstream.url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.cors.strict_origin {
        match config.cors.allowed_origin.as_deref() {
            None | Some("") => errors.push(ValidationError::MissingAllowedOrigin),
            Some(origin) if HeaderValue::from_str(origin).is_err() => {
                errors.push(ValidationError::InvalidAllowedOrigin(origin.to_string()));
            }
            Some(_) => {}
        }
    }

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidMetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&RelayConfig::default()), Ok(()));
    }

    #[test]
    fn collects_every_error() {
        let mut config = RelayConfig::default();
        config.upstream.url = "not a url".into();
        config.upstream.timeout_secs = Some(0);
        config.cors.strict_origin = true;
        config.limits.max_body_bytes = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ValidationError::InvalidUpstreamUrl { .. }));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::MissingAllowedOrigin));
        assert!(errors.contains(&ValidationError::ZeroBodyLimit));
    }

    #[test]
    fn rejects_non_http_upstream() {
        let mut config = RelayConfig::default();
        config.upstream.url = "ftp://api.bls.gov/data".into();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::UnsupportedScheme("ftp".into())])
        );
    }

    #[test]
    fn strict_origin_with_origin_is_valid() {
        let mut config = RelayConfig::default();
        config.cors.strict_origin = true;
        config.cors.allowed_origin = Some("https://stats.example.org".into());
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn rejects_bad_metrics_address() {
        let mut config = RelayConfig::default();
        config.observability.metrics_address = Some("localhost".into());
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidMetricsAddress("localhost".into())])
        );
    }
}
