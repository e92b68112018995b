//! User service configuration.

use std::env;
use std::time::Duration;

use common::{DatabaseConfig, ServiceConfig};

/// Default port of the HTTP listener
pub const DEFAULT_PORT: u16 = 3000;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Listener and logging settings
    pub service: ServiceConfig,
    /// Connection pool settings
    pub database: DatabaseConfig,
    /// Upper bound for handling one request
    pub request_timeout_seconds: u64,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                host: env::var("USER_SERVICE_HOST").unwrap_or(defaults.service.host),
                port: parse_var("USER_SERVICE_PORT").unwrap_or(defaults.service.port),
                log_level: env::var("LOG_LEVEL").unwrap_or(defaults.service.log_level),
            },
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(defaults.database.min_connections),
            },
            request_timeout_seconds: parse_var("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }

    /// Tracing filter directive: `debug` when verbose, else `RUST_LOG`, else `log_level`.
    pub fn log_filter(&self, verbose: bool) -> String {
        resolve_log_filter(verbose, env::var("RUST_LOG").ok(), &self.service.log_level)
    }

    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                port: DEFAULT_PORT,
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

fn resolve_log_filter(verbose: bool, rust_log: Option<String>, log_level: &str) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| log_level.to_string())
}

/// Read and parse an environment variable, ignoring unset or malformed values.
fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
