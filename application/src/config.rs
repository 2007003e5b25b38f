//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as the request timeout and how much history is sent.

use std::time::Duration;

/// Application behavior configuration.
///
/// Controls runtime behavior of the assistant use case.
#[derive(Debug, Clone, Default)]
pub struct BehaviorConfig {
    /// Maximum time to wait for a completion before giving up.
    pub timeout: Option<Duration>,
    /// Only the most recent messages are sent when set.
    pub max_history: Option<usize>,
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Some(Duration::from_secs(seconds)),
            ..Self::default()
        }
    }

    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None`, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.map(Duration::from_secs),
            ..Self::default()
        }
    }

    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = Some(max);
        self
    }
}
