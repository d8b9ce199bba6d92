//! Server configuration loaded from environment variables.
//!
//! Configuration is resolved once at startup, before the database is
//! opened, and handed to construction explicitly. All settings have
//! defaults so the server starts with zero configuration for local
//! development.

use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP server.
    /// Env: `WARBLER_ADDR`
    /// Default: `0.0.0.0:3000`
    pub http_addr: SocketAddr,

    /// SQLite database file path.
    /// Env: `WARBLER_DB_PATH` (set this to a distinct file for test runs)
    /// Default: `warbler.db`
    pub db_path: PathBuf,

    /// Secret used to sign session tokens.
    /// Env: `WARBLER_SECRET_KEY`
    /// Default: a development-only value.
    pub secret_key: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], 3000).into(),
            db_path: PathBuf::from("warbler.db"),
            secret_key: "dev-secret-change-me".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("WARBLER_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid WARBLER_ADDR, using default");
            }
        }

        if let Ok(path) = std::env::var("WARBLER_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }

        if let Ok(secret) = std::env::var("WARBLER_SECRET_KEY") {
            if !secret.is_empty() {
                config.secret_key = secret;
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}
