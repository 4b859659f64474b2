//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::client::DEFAULT_BASE_URL;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime of every cached lookup, in seconds
    pub cache_ttl: u64,
    /// Upstream request timeout in seconds
    pub client_timeout: u64,
    /// Base URL of the REST Countries API
    pub upstream_base_url: String,
    /// Per-request timeout for inbound HTTP requests, in seconds
    pub request_timeout: u64,
    /// Time in-flight requests get to finish after a shutdown signal, in seconds
    pub shutdown_grace: u64,
}

/// Reads and parses an env var, falling back to `default` if unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `CACHE_TTL_SECS` - Cache TTL in seconds (default: 300)
    /// - `CLIENT_TIMEOUT_SECS` - Upstream timeout in seconds (default: 10)
    /// - `UPSTREAM_BASE_URL` - REST Countries base URL
    /// - `REQUEST_TIMEOUT_SECS` - Inbound request timeout in seconds (default: 15)
    /// - `SHUTDOWN_GRACE_SECS` - Shutdown grace period in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_ttl: env_or("CACHE_TTL_SECS", defaults.cache_ttl),
            client_timeout: env_or("CLIENT_TIMEOUT_SECS", defaults.client_timeout),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.upstream_base_url),
            request_timeout: env_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout),
            shutdown_grace: env_or("SHUTDOWN_GRACE_SECS", defaults.shutdown_grace),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn client_timeout(&self) -> Duration {
        Duration::from_secs(self.client_timeout)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            cache_ttl: 300,
            client_timeout: 10,
            upstream_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: 15,
            shutdown_grace: 30,
        }
    }
}
