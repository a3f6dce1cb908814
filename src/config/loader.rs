//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::config::schema::{LogFormat, RelayConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Names the optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "RELAY_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid upstream URL: {0}")]
    UpstreamUrl(#[from] url::ParseError),

    #[error("Failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RelayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the process configuration: defaults, then the file named by
/// `RELAY_CONFIG` (if any), then environment overrides.
pub fn load_from_env() -> Result<RelayConfig, ConfigError> {
    resolve(|var| std::env::var(var).ok())
}

/// Same as [`load_from_env`] with an injectable variable lookup.
pub fn resolve<F>(lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            toml::from_str::<RelayConfig>(&content)?
        }
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, &lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(host) = get("PROXY_HOST") {
        config.listener.host = host;
    }
    if let Some(port) = get("PROXY_PORT") {
        config.listener.port = parse_var("PROXY_PORT", &port)?;
    }
    if let Some(url) = get("UPSTREAM_URL") {
        config.upstream.url = url;
    }
    if let Some(secs) = get("UPSTREAM_TIMEOUT_SECS") {
        config.upstream.timeout_secs = Some(parse_var("UPSTREAM_TIMEOUT_SECS", &secs)?);
    }
    if let Some(flag) = get("PASSTHROUGH_UPSTREAM_ERROR_BODY") {
        config.upstream.passthrough_upstream_error_body =
            parse_bool("PASSTHROUGH_UPSTREAM_ERROR_BODY", &flag)?;
    }
    if let Some(flag) = get("UPSTREAM_SYSTEM_PROXY") {
        config.upstream.system_proxy = parse_bool("UPSTREAM_SYSTEM_PROXY", &flag)?;
    }
    if let Some(origin) = get("ALLOWED_ORIGIN") {
        config.cors.allowed_origin = Some(origin);
        config.cors.strict_origin = true;
    }
    if let Some(bytes) = get("MAX_BODY_BYTES") {
        config.limits.max_body_bytes = parse_var("MAX_BODY_BYTES", &bytes)?;
    }
    if let Some(format) = get("LOG_FORMAT") {
        config.observability.log_format = match format.to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => return Err(ConfigError::Env { var: "LOG_FORMAT", value: format }),
        };
    }
    if let Some(addr) = get("METRICS_ADDRESS") {
        config.observability.metrics_address = Some(addr);
    }

    Ok(())
}

fn parse_var<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        var,
        value: value.to_string(),
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Env {
            var,
            value: value.to_string(),
        }),
    }
}
