//! Configuration loading and constants.
//!
//! `AppConfig` is built once at startup from built-in defaults, an optional
//! TOML file, and finally environment variable overrides (`HOST`, `PORT`,
//! `DEBUG`, `SERVICE_NAME`, `SERVICE_VERSION`, `SERVICE_DESCRIPTION`,
//! `LOG_FORMAT`). It is never re-read while serving.

use const_format::formatcp;
use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;

// =============================================================================
// Defaults
// =============================================================================

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_PORT: u16 = 5000;

/// Default service name, also used as the app title in logs
pub const DEFAULT_SERVICE_NAME: &str = "devops-info-service";

/// Default reported service version
pub const DEFAULT_SERVICE_VERSION: &str = "1.0.0";

/// Default reported service description
pub const DEFAULT_SERVICE_DESCRIPTION: &str = "DevOps course info service";

/// Name of the HTTP stack reported in `service.framework`
pub const FRAMEWORK: &str = "axum";

// =============================================================================
// Logging
// =============================================================================

const LOG_TARGET: &str = "devops_info_service";

/// Default log filter when neither `--log-level` nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=info,tower_http=info", LOG_TARGET);

/// Log filter used when DEBUG is enabled
pub const DEBUG_LOG_FILTER: &str = formatcp!("{}=debug,tower_http=debug", LOG_TARGET);

// =============================================================================
// HTTP
// =============================================================================

/// Responses are computed per request and must never be served from a cache
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Seconds to wait for in-flight requests after a shutdown signal
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

// Time unit constants (in seconds) for uptime formatting
/// Seconds in a minute
pub const SECONDS_PER_MINUTE: u64 = 60;
/// Seconds in an hour
pub const SECONDS_PER_HOUR: u64 = 3600;

// =============================================================================
// Environment variable names
// =============================================================================

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DEBUG: &str = "DEBUG";
pub const ENV_SERVICE_NAME: &str = "SERVICE_NAME";
pub const ENV_SERVICE_VERSION: &str = "SERVICE_VERSION";
pub const ENV_SERVICE_DESCRIPTION: &str = "SERVICE_DESCRIPTION";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Identity reported in the `service` section
    pub service: ServiceConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    /// Debug mode: raises the default log level
    pub debug: bool,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
        }
    }
}

impl HttpServerConfig {
    /// Resolve `host:port` into the address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| {
                ConfigError::Validation(format!("Invalid HOST '{}': {}", self.host, e))
            })?
            .next()
            .ok_or_else(|| {
                ConfigError::Validation(format!("HOST '{}' resolved to no address", self.host))
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVICE_NAME.to_string(),
            version: DEFAULT_SERVICE_VERSION.to_string(),
            description: DEFAULT_SERVICE_DESCRIPTION.to_string(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Validation(format!(
                "Unknown log format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then apply overrides from
    /// the process environment.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents)?
            }
            None => AppConfig::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to resolve variable names.
    ///
    /// Unset variables leave the current value untouched.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.http.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = port.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("Invalid PORT '{}': expected 0-65535", port))
            })?;
        }
        if let Some(debug) = lookup(ENV_DEBUG) {
            self.http.debug = debug.trim().eq_ignore_ascii_case("true");
        }
        if let Some(name) = lookup(ENV_SERVICE_NAME) {
            self.service.name = name;
        }
        if let Some(version) = lookup(ENV_SERVICE_VERSION) {
            self.service.version = version;
        }
        if let Some(description) = lookup(ENV_SERVICE_DESCRIPTION) {
            self.service.description = description;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = format.parse()?;
        }
        Ok(())
    }

    /// Log filter to use when none is given on the command line or in RUST_LOG.
    pub fn default_log_filter(&self) -> &'static str {
        if self.http.debug {
            DEBUG_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
