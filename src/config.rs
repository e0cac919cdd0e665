//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// redb data file; `None` keeps everything in memory
    pub store_path: Option<PathBuf>,
    /// Value of `Access-Control-Allow-Origin`
    pub cors_origin: String,
    /// Preflight cache lifetime in seconds
    pub cors_max_age: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STORE_PATH` - Path of the redb data file (default: unset, in-memory)
    /// - `CORS_ORIGIN` - Allowed CORS origin (default: `*`)
    /// - `CORS_MAX_AGE` - Preflight max age in seconds (default: 86400)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            store_path: env::var("STORE_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            cors_origin: env::var("CORS_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.cors_origin),
            cors_max_age: env::var("CORS_MAX_AGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cors_max_age),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            store_path: None,
            cors_origin: "*".to_string(),
            cors_max_age: 86400,
        }
    }
}
