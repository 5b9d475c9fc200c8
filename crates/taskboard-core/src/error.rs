//! Error types for taskboard-core

use thiserror::Error;

/// Result type alias for taskboard operations
pub type Result<T> = std::result::Result<T, TaskboardError>;

/// Main error type for taskboard operations
#[derive(Error, Debug)]
pub enum TaskboardError {
    /// Fetching data from the server failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Loading configuration failed
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors produced while talking to the taskboard server.
///
/// Controllers never propagate these to their host. They are caught where the
/// request was issued and turned into an inline notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection refused, reset, DNS failure or timeout
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// Non-success status or a payload that does not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    pub fn timeout(after: std::time::Duration) -> Self {
        FetchError::NetworkFailure(format!("request timed out after {}ms", after.as_millis()))
    }

    pub fn status(code: u16) -> Self {
        FetchError::InvalidResponse(format!("server answered with status {}", code))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::InvalidResponse(format!("malformed payload: {}", err))
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the config file failed
    #[error("IO error: {0}")]
    Io(String),

    /// The config file is not valid TOML for the expected schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value is present but unusable
    #[error("Invalid value for {field}: {message}")]
    Invalid { field: String, message: String },
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
