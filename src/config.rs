use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{BoardError, Result};

/// Process-wide configuration, passed explicitly at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Address the HTTP API listens on.
    pub listen_addr: SocketAddr,
    /// The single frontend origin allowed by CORS.
    pub allowed_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("projectboard.db"),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 5048)),
            allowed_origin: "http://localhost:4200".to_string(),
        }
    }
}

impl Config {
    /// Reads `PROJECTBOARD_DB`, `PROJECTBOARD_LISTEN` and
    /// `PROJECTBOARD_ORIGIN`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = env::var("PROJECTBOARD_DB") {
            config.database_path = PathBuf::from(path);
        }
        if let Ok(addr) = env::var("PROJECTBOARD_LISTEN") {
            config.listen_addr = addr.parse().map_err(|_| {
                BoardError::Config(format!("invalid listen address: {addr}"))
            })?;
        }
        if let Ok(origin) = env::var("PROJECTBOARD_ORIGIN") {
            if origin.trim().is_empty() {
                return Err(BoardError::Config("allowed origin is empty".to_string()));
            }
            config.allowed_origin = origin;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database_path, PathBuf::from("projectboard.db"));
        assert_eq!(config.listen_addr.port(), 5048);
        assert_eq!(config.allowed_origin, "http://localhost:4200");
    }
}
