//! rollwatch-config — `rollwatch.toml` parsing for the rollout watcher.
//!
//! Reads the exit-code policy the watcher applies to terminal verdicts.
//! The verdict types themselves live in `rollwatch-status`, which does no
//! I/O.

pub mod config;
pub mod error;

pub use config::RollwatchConfig;
pub use error::{ConfigError, ConfigResult};
