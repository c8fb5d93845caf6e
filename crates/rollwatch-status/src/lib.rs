//! rollwatch rollout verdicts — failure taxonomy, classified errors, exit codes.
//!
//! This crate is the decision model a rollout watcher runs once per
//! observation cycle. The watcher inspects cluster state, classifies any
//! problem as a [`RolloutError`], and wraps it in a [`RolloutVerdict`]
//! that says whether to poll again, fail, or succeed. Nothing here polls,
//! sleeps, or talks to a cluster; every value is built fresh per cycle.
//!
//! # Components
//!
//! - **`failure`** — Closed [`Failure`] taxonomy
//! - **`rollout_error`** — [`RolloutError`], [`make_rollout_error`], `rollout_error!`
//! - **`printf`** — printf-style message rendering
//! - **`verdict`** — [`RolloutVerdict`] constructors and [`NextStep`]
//! - **`exit_codes`** — [`ExitCodes`] policy for terminal verdicts

pub mod error;
pub mod exit_codes;
pub mod failure;
pub mod printf;
pub mod rollout_error;
pub mod verdict;

pub use error::{StatusError, StatusResult};
pub use exit_codes::ExitCodes;
pub use failure::Failure;
pub use rollout_error::{RolloutError, make_rollout_error};
pub use verdict::{NextStep, RolloutVerdict, VerdictKind};
