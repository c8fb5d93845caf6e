//! Failure taxonomy — the closed set of problems a rollout can hit.

use std::fmt;
use std::str::FromStr;

use crate::error::StatusError;

/// Category of a problem observed while watching a rollout.
///
/// `None` is the zero value. A real failure path never classifies a
/// problem as `None`; it only shows up on errors that report a transient
/// wait (e.g. a container still being created).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Failure {
    /// No failure.
    #[default]
    #[serde(alias = "")]
    None,
    /// The deployment, replica set or pod does not exist.
    NotFound,
    /// A container keeps exiting (crash loop, OOM kill, bad exit code).
    ProcessCrashing,
    /// The workload spec is unusable: bad image, missing config map or secret.
    InvalidConfig,
    /// Quota or limit range rejected the workload.
    ResourceLimitsExceeded,
    /// Pods cannot be placed on any node.
    Scheduling,
    /// The controller reports the rollout stopped making progress.
    NotProgressing,
    /// The deployment strategy cannot be watched.
    NotSupportedStrategy,
}

impl Failure {
    /// Every category, in declaration order.
    pub const ALL: [Failure; 8] = [
        Failure::None,
        Failure::NotFound,
        Failure::ProcessCrashing,
        Failure::InvalidConfig,
        Failure::ResourceLimitsExceeded,
        Failure::Scheduling,
        Failure::NotProgressing,
        Failure::NotSupportedStrategy,
    ];

    /// Textual form used in logs and serialized reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Failure::None => "none",
            Failure::NotFound => "not-found",
            Failure::ProcessCrashing => "process-crashing",
            Failure::InvalidConfig => "invalid-config",
            Failure::ResourceLimitsExceeded => "resource-limits-exceeded",
            Failure::Scheduling => "scheduling",
            Failure::NotProgressing => "not-progressing",
            Failure::NotSupportedStrategy => "not-supported-strategy",
        }
    }

    /// False only for [`Failure::None`].
    pub fn is_failure(&self) -> bool {
        *self != Failure::None
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Failure {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Empty string is the legacy zero value.
        if s.is_empty() {
            return Ok(Failure::None);
        }
        Failure::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| StatusError::UnknownFailure(s.to_string()))
    }
}
