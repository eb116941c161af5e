//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Default address the listener binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default port the listener binds to
pub const DEFAULT_PORT: u16 = 5000;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: DEFAULT_PORT,
                host: DEFAULT_HOST.to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    ///
    /// Unset or unparsable variables keep the value from [`Config::default`].
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            config.server.port = port;
        }
        if let Ok(host) = env::var("HOST") {
            config.server.host = host;
        }
        config
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
