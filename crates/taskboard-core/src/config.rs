//! Client configuration
//!
//! Loaded from `~/.taskboard/client.toml` when present, then overridden by
//! environment variables:
//!
//! ```toml
//! base_url = "http://127.0.0.1:5000"
//! session_user = "alice"
//! timeout_ms = 10000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_URL: &str = "TASKBOARD_URL";
pub const ENV_USER: &str = "TASKBOARD_USER";
pub const ENV_TIMEOUT_MS: &str = "TASKBOARD_TIMEOUT_MS";

/// Settings for talking to the taskboard server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server URL; endpoint paths are resolved under its path
    pub base_url: String,
    /// User the session belongs to, sent with every request
    pub session_user: Option<String>,
    /// Time allowed for one request in milliseconds
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            session_user: None,
            timeout_ms: 10_000,
            user_agent: format!("taskboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Default location: `~/.taskboard/client.toml`
    pub fn standard_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".taskboard").join("client.toml"))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the standard file if it exists, then the environment
    pub fn load_standard() -> Result<Self, ConfigError> {
        let mut config = match Self::standard_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading client config from {:?}", path);
                Self::load_from_file(&path)?
            }
            _ => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup (environment variables in practice)
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup(ENV_URL) {
            self.base_url = url;
        }
        if let Some(user) = lookup(ENV_USER) {
            self.session_user = Some(user).filter(|u| !u.trim().is_empty());
        }
        if let Some(ms) = lookup(ENV_TIMEOUT_MS) {
            self.timeout_ms = ms.trim().parse().map_err(|_| ConfigError::Invalid {
                field: ENV_TIMEOUT_MS.to_string(),
                message: format!("not a number of milliseconds: {}", ms),
            })?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.base_url).map_err(|e| ConfigError::Invalid {
            field: "base_url".to_string(),
            message: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                field: "base_url".to_string(),
                message: format!("unsupported scheme {}", url.scheme()),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
