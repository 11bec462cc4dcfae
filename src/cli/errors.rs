//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// Failures surfaced at the command line
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be resolved
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The gateway failed to bind or serve
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    /// Resolved configuration could not be rendered
    #[error("Failed to render configuration: {0}")]
    Render(#[from] serde_json::Error),
}
