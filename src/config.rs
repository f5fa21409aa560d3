//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;

use anyhow::Result;

use crate::db::Database;

/// Default port for the HTTP API.
pub const DEFAULT_PORT: u16 = 17020;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// SQLite file holding the roster (from CONVOY_ROSTER_DB). Defaults to the
    /// platform data directory when unset.
    pub db_path: Option<PathBuf>,
    /// Allowed CORS origins (from CONVOY_ROSTER_CORS_ORIGINS, comma-separated).
    /// `None` means permissive.
    pub cors_origins: Option<Vec<String>>,
    /// HTTP port (from CONVOY_ROSTER_PORT).
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let db_path = std::env::var_os("CONVOY_ROSTER_DB").map(PathBuf::from);

        let cors_origins = std::env::var("CONVOY_ROSTER_CORS_ORIGINS").ok().map(|s| {
            s.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let port = std::env::var("CONVOY_ROSTER_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            db_path,
            cors_origins,
            port,
        }
    }

    /// Config with no overrides (for tests).
    pub fn disabled() -> Self {
        Self {
            db_path: None,
            cors_origins: None,
            port: DEFAULT_PORT,
        }
    }

    pub fn with_cors_origins(origins: Vec<String>) -> Self {
        Self {
            cors_origins: Some(origins),
            ..Self::disabled()
        }
    }

    /// Opens the configured database, creating its table if needed.
    pub fn open_database(&self) -> Result<Database> {
        match &self.db_path {
            Some(path) => Database::open(path.clone()),
            None => Database::open_default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
