//! Exit-code policy — the process exit status a watcher reports for a
//! terminal verdict.
//!
//! Pure values only. Loading a policy from a file is left to the caller.

use serde::{Deserialize, Serialize};

use crate::error::{StatusError, StatusResult};
use crate::failure::Failure;
use crate::verdict::RolloutVerdict;

/// Process exit code per verdict outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitCodes {
    pub success: i32,
    /// Fatal verdict whose error carries [`Failure::None`].
    pub unclassified: i32,
    pub not_found: i32,
    pub process_crashing: i32,
    pub invalid_config: i32,
    pub resource_limits_exceeded: i32,
    pub scheduling: i32,
    pub not_progressing: i32,
    pub not_supported_strategy: i32,
}

impl Default for ExitCodes {
    fn default() -> Self {
        Self {
            success: 0,
            unclassified: 1,
            not_found: 2,
            process_crashing: 3,
            invalid_config: 4,
            resource_limits_exceeded: 5,
            scheduling: 6,
            not_progressing: 7,
            not_supported_strategy: 8,
        }
    }
}

impl ExitCodes {
    /// Exit code reported for a fatal error of this category.
    pub fn for_failure(&self, failure: Failure) -> i32 {
        match failure {
            Failure::None => self.unclassified,
            Failure::NotFound => self.not_found,
            Failure::ProcessCrashing => self.process_crashing,
            Failure::InvalidConfig => self.invalid_config,
            Failure::ResourceLimitsExceeded => self.resource_limits_exceeded,
            Failure::Scheduling => self.scheduling,
            Failure::NotProgressing => self.not_progressing,
            Failure::NotSupportedStrategy => self.not_supported_strategy,
        }
    }

    /// Exit code for a terminal verdict, or `None` while the watcher
    /// should keep polling.
    pub fn for_verdict(&self, verdict: &RolloutVerdict) -> Option<i32> {
        match verdict {
            RolloutVerdict::Progressing(_) | RolloutVerdict::MaybeProgressing(_) => None,
            RolloutVerdict::Fatal(err) => Some(self.for_failure(err.failure)),
            RolloutVerdict::Ok => Some(self.success),
        }
    }

    /// Codes must fit a process exit status and `success` must not be
    /// reused by any failure.
    pub fn validate(&self) -> StatusResult<()> {
        let named = Failure::ALL.map(|f| (f, self.for_failure(f)));
        if !(0..=255).contains(&self.success) {
            return Err(StatusError::InvalidExitCode(format!(
                "success out of range 0..=255: {}",
                self.success
            )));
        }
        for (failure, code) in named {
            if !(0..=255).contains(&code) {
                return Err(StatusError::InvalidExitCode(format!(
                    "{failure} out of range 0..=255: {code}"
                )));
            }
            if code == self.success {
                return Err(StatusError::InvalidExitCode(format!(
                    "{failure} collides with success ({code})"
                )));
            }
        }
        Ok(())
    }
}
