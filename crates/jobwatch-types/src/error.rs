//! Error types for jobwatch configuration and state parsing.

use std::time::Duration;
use thiserror::Error;

/// Errors raised when a polling configuration value is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The attempt cap must allow at least one fetch.
    #[error("max attempts must be greater than zero")]
    ZeroAttempts,

    /// A duration setting was zero.
    #[error("{field} must be greater than 0")]
    ZeroDuration {
        /// Name of the rejected setting.
        field: &'static str,
    },

    /// The maximum delay is smaller than the base delay.
    #[error("max delay ({max_delay:?}) must be greater than or equal to base delay ({base_delay:?})")]
    MaxDelayBelowBase {
        /// The configured or requested base delay.
        base_delay: Duration,
        /// The configured or requested maximum delay.
        max_delay: Duration,
    },
}

/// Error returned when a status string is not a known job state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized job state '{0}', expected one of: pending, completed, error")]
pub struct UnknownStateError(pub(crate) String);

impl UnknownStateError {
    /// Returns the rejected value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}
