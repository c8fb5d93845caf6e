//! Error types for rollwatch status handling.

use thiserror::Error;

/// Result type alias for status operations.
pub type StatusResult<T> = Result<T, StatusError>;

/// Errors raised while parsing failure names or verdict records, or
/// validating exit codes.
///
/// These never describe a rollout problem; rollout problems are carried
/// as [`RolloutError`](crate::RolloutError) values inside a verdict.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("unknown failure category: {0:?}")]
    UnknownFailure(String),

    #[error("invalid verdict: {0}")]
    InvalidVerdict(String),

    #[error("invalid exit code: {0}")]
    InvalidExitCode(String),
}
