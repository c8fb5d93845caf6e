//! Classified rollout errors.

use std::fmt::Display;

use thiserror::Error;

use crate::failure::Failure;
use crate::printf::sprintf;

/// A problem observed during one observation cycle, tagged with its
/// [`Failure`] category.
///
/// Location fields start empty. The watcher classifies first and fills
/// in where the problem was seen afterwards, either by assigning the
/// fields or through the `with_*` helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
#[error("{message}")]
pub struct RolloutError {
    pub failure: Failure,
    pub message: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pod: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub container: String,
}

impl RolloutError {
    /// Build an error from an already rendered message.
    pub fn new(failure: Failure, message: impl Into<String>) -> Self {
        Self {
            failure,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_pod(mut self, pod: impl Into<String>) -> Self {
        self.pod = pod.into();
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    /// `namespace/pod/container` built from the parts that are set.
    pub fn location(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.namespace, &self.pod, &self.container]
            .into_iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("/"))
        }
    }
}

/// Classify a problem, rendering `format` printf-style with `args`.
///
/// See [`crate::printf`] for the supported verbs and how argument
/// mismatches are rendered.
pub fn make_rollout_error(failure: Failure, format: &str, args: &[&dyn Display]) -> RolloutError {
    RolloutError::new(failure, sprintf(format, args))
}

/// Variadic form of [`make_rollout_error`].
///
/// ```
/// use rollwatch_status::{rollout_error, Failure};
///
/// let err = rollout_error!(Failure::NotFound, "pod %s missing", "web-1");
/// assert_eq!(err.message, "pod web-1 missing");
/// ```
#[macro_export]
macro_rules! rollout_error {
    ($failure:expr, $format:expr $(,)?) => {
        $crate::make_rollout_error($failure, $format, &[])
    };
    ($failure:expr, $format:expr, $($arg:expr),+ $(,)?) => {
        $crate::make_rollout_error(
            $failure,
            $format,
            &[$(&$arg as &dyn ::std::fmt::Display),+],
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_message() {
        let err = make_rollout_error(Failure::NotFound, "pod %s missing", &[&"web-1"]);
        assert_eq!(err.failure, Failure::NotFound);
        assert_eq!(err.message, "pod web-1 missing");
        assert_eq!(err.to_string(), "pod web-1 missing");
    }

    #[test]
    fn literal_message_without_args() {
        let err = make_rollout_error(Failure::NotProgressing, "deadline exceeded", &[]);
        assert_eq!(err.message, "deadline exceeded");
    }

    #[test]
    fn failure_round_trips_for_every_category() {
        for failure in Failure::ALL {
            assert_eq!(make_rollout_error(failure, "x", &[]).failure, failure);
        }
    }

    #[test]
    fn location_starts_empty() {
        let err = rollout_error!(Failure::Scheduling, "0/%d nodes available", 3);
        assert!(err.namespace.is_empty());
        assert!(err.pod.is_empty());
        assert!(err.container.is_empty());
        assert_eq!(err.location(), None);
    }

    #[test]
    fn location_is_assigned_after_classification() {
        let mut err = rollout_error!(Failure::ProcessCrashing, "container %s exited", "web");
        err.namespace = "prod".to_string();
        err.pod = "web-7d4b9-x2k".to_string();
        assert_eq!(err.location().as_deref(), Some("prod/web-7d4b9-x2k"));

        let err = err.with_container("web");
        assert_eq!(err.location().as_deref(), Some("prod/web-7d4b9-x2k/web"));
        // Location never leaks into the display text.
        assert_eq!(err.to_string(), "container web exited");
    }

    #[test]
    fn usable_as_std_error() {
        let err: Box<dyn std::error::Error + Send + Sync> =
            Box::new(RolloutError::new(Failure::InvalidConfig, "secret db-creds missing"));
        assert_eq!(err.to_string(), "secret db-creds missing");
    }

    #[test]
    fn macro_accepts_trailing_comma_and_expressions() {
        let restarts = 5u32;
        let err = rollout_error!(
            Failure::ProcessCrashing,
            "restarted %d times (limit %d)",
            restarts,
            restarts - 2,
        );
        assert_eq!(err.message, "restarted 5 times (limit 3)");
    }

    #[test]
    fn serializes_without_empty_location() {
        let err = RolloutError::new(Failure::NotFound, "gone").with_pod("web-1");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "failure": "not-found", "message": "gone", "pod": "web-1" })
        );

        let back: RolloutError = serde_json::from_value(json).unwrap();
        assert_eq!(back, err);
    }
}
