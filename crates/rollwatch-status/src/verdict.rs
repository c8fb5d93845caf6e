//! Rollout verdicts — the per-cycle decision a watcher acts on.
//!
//! A verdict is built once per observation cycle through one of four
//! constructors. Each constructor fixes the `(continue, maybe_continue,
//! error)` triple:
//!
//! ```text
//! constructor               continue  maybe_continue  error
//! fatal                     false     false           present
//! error_progressing         true      false           present
//! error_maybe_progressing   false     true            present
//! ok                        false     false           absent
//! ```
//!
//! How many `maybe_continue` cycles to tolerate, and when a progressing
//! error escalates to fatal, is the watcher's call.

use tracing::{debug, error, info, warn};

use crate::error::StatusError;
use crate::rollout_error::RolloutError;

/// Outcome of one observation cycle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(into = "VerdictRecord", try_from = "VerdictRecord")]
pub enum RolloutVerdict {
    /// The rollout will not succeed with high certainty, or an unrelated
    /// program error occurred. Stop and report failure.
    Fatal(RolloutError),
    /// Expected transient state (container creating, init containers
    /// running, not yet ready). Keep polling.
    Progressing(RolloutError),
    /// Error state whose fatality is uncertain. Keep polling with reduced
    /// confidence.
    MaybeProgressing(RolloutError),
    /// Rollout completed successfully.
    Ok,
}

/// Discriminant of a [`RolloutVerdict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictKind {
    Fatal,
    Progressing,
    MaybeProgressing,
    Ok,
}

/// What the watcher does after a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Poll again under normal confidence.
    Poll,
    /// Poll again, charging the degraded-confidence retry budget.
    PollDegraded,
    /// Stop and report failure.
    Fail,
    /// Stop and report success.
    Succeed,
}

impl RolloutVerdict {
    pub fn fatal(err: RolloutError) -> Self {
        Self::Fatal(err)
    }

    pub fn error_progressing(err: RolloutError) -> Self {
        Self::Progressing(err)
    }

    pub fn error_maybe_progressing(err: RolloutError) -> Self {
        Self::MaybeProgressing(err)
    }

    pub fn ok() -> Self {
        Self::Ok
    }

    /// Keep monitoring under normal confidence.
    pub fn should_continue(&self) -> bool {
        matches!(self, Self::Progressing(_))
    }

    /// Keep monitoring with degraded confidence.
    pub fn maybe_continue(&self) -> bool {
        matches!(self, Self::MaybeProgressing(_))
    }

    /// The problem observed this cycle; `None` only for [`RolloutVerdict::Ok`].
    pub fn error(&self) -> Option<&RolloutError> {
        match self {
            Self::Fatal(err) | Self::Progressing(err) | Self::MaybeProgressing(err) => Some(err),
            Self::Ok => None,
        }
    }

    pub fn into_error(self) -> Option<RolloutError> {
        match self {
            Self::Fatal(err) | Self::Progressing(err) | Self::MaybeProgressing(err) => Some(err),
            Self::Ok => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    pub fn kind(&self) -> VerdictKind {
        match self {
            Self::Fatal(_) => VerdictKind::Fatal,
            Self::Progressing(_) => VerdictKind::Progressing,
            Self::MaybeProgressing(_) => VerdictKind::MaybeProgressing,
            Self::Ok => VerdictKind::Ok,
        }
    }

    /// The branch a watcher takes after this cycle.
    pub fn next(&self) -> NextStep {
        match self {
            Self::Progressing(_) => NextStep::Poll,
            Self::MaybeProgressing(_) => NextStep::PollDegraded,
            Self::Fatal(_) => NextStep::Fail,
            Self::Ok => NextStep::Succeed,
        }
    }

    /// Emit one structured log event describing this verdict.
    ///
    /// Constructors never log; the watcher calls this when it wants the
    /// cycle recorded.
    pub fn trace(&self) {
        match self {
            Self::Ok => info!("rollout completed"),
            Self::Progressing(err) => debug!(
                failure = %err.failure,
                namespace = %err.namespace,
                pod = %err.pod,
                container = %err.container,
                "rollout progressing: {err}"
            ),
            Self::MaybeProgressing(err) => warn!(
                failure = %err.failure,
                namespace = %err.namespace,
                pod = %err.pod,
                container = %err.container,
                "rollout may be progressing: {err}"
            ),
            Self::Fatal(err) => error!(
                failure = %err.failure,
                namespace = %err.namespace,
                pod = %err.pod,
                container = %err.container,
                "rollout failed: {err}"
            ),
        }
    }
}

/// Flat wire form of a verdict.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct VerdictRecord {
    #[serde(rename = "continue")]
    proceed: bool,
    maybe_continue: bool,
    #[serde(default)]
    error: Option<RolloutError>,
}

impl From<RolloutVerdict> for VerdictRecord {
    fn from(verdict: RolloutVerdict) -> Self {
        Self {
            proceed: verdict.should_continue(),
            maybe_continue: verdict.maybe_continue(),
            error: verdict.into_error(),
        }
    }
}

impl TryFrom<VerdictRecord> for RolloutVerdict {
    type Error = StatusError;

    fn try_from(record: VerdictRecord) -> Result<Self, Self::Error> {
        match (record.proceed, record.maybe_continue, record.error) {
            (false, false, Some(err)) => Ok(Self::Fatal(err)),
            (true, false, Some(err)) => Ok(Self::Progressing(err)),
            (false, true, Some(err)) => Ok(Self::MaybeProgressing(err)),
            (false, false, None) => Ok(Self::Ok),
            (true, true, _) => Err(StatusError::InvalidVerdict(
                "continue and maybe_continue are both set".to_string(),
            )),
            (_, _, None) => Err(StatusError::InvalidVerdict(
                "continuing verdict carries no error".to_string(),
            )),
        }
    }
}
