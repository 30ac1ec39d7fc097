//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Serialize;

/// Ledger server configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub max_connections: u32,

    /// Allow any origin (the browser UI is served from another port)
    pub cors_permissive: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ServerConfig {
            host: lookup("LEDGER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: lookup("LEDGER_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LEDGER_PORT".to_string()))?,

            database_path: lookup("LEDGER_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_database_path),

            max_connections: lookup("LEDGER_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LEDGER_DB_MAX_CONNECTIONS".to_string()))?,

            cors_permissive: lookup("LEDGER_CORS_PERMISSIVE")
                .unwrap_or_else(|| "true".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LEDGER_CORS_PERMISSIVE".to_string()))?,
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue("LEDGER_DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Get the HTTP server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `<platform data dir>/ledger.db`, or `./ledger.db` when the platform
/// reports no home directory.
///
/// - Linux: ~/.local/share/ledger/ledger.db
/// - macOS: ~/Library/Application Support/com.fuel-ledger.ledger/ledger.db
/// - Windows: C:\Users\<user>\AppData\Roaming\fuel-ledger\ledger\data\ledger.db
fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "fuel-ledger", "ledger")
        .map(|dirs| dirs.data_dir().join("ledger.db"))
        .unwrap_or_else(|| PathBuf::from("./ledger.db"))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {0}")]
    InvalidValue(String),
}
