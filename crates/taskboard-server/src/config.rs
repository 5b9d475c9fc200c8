//! Server configuration
//!
//! Read from `~/.taskboard/server.toml` when present:
//!
//! ```toml
//! addr = "127.0.0.1:5000"
//! users = ["alice", "bob"]
//! ```
//!
//! `TASKBOARD_ADDR` overrides the listen address.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use taskboard_core::ConfigError;

pub const ENV_ADDR: &str = "TASKBOARD_ADDR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    /// Users registered at startup
    pub users: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:5000".to_string(),
            users: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn standard_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".taskboard").join("server.toml"))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Defaults, then the standard file if it exists, then `TASKBOARD_ADDR`
    pub fn load_standard() -> Result<Self, ConfigError> {
        let mut config = match Self::standard_path() {
            Some(path) if path.exists() => Self::load_from_file(&path)?,
            _ => Self::default(),
        };
        if let Ok(addr) = std::env::var(ENV_ADDR) {
            config.addr = addr;
        }
        Ok(config)
    }
}
