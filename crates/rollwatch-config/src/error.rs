//! Config error types.

use thiserror::Error;

/// Result type alias for config parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading `rollwatch.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] rollwatch_status::StatusError),
}
