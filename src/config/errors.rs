//! Configuration error types.

use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while resolving process configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is absent from the environment
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    /// A variable is present but cannot be parsed
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    /// The config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
