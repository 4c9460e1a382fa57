//! Progress events emitted while a job is still pending.

use serde::{Deserialize, Serialize};

/// A human-readable progress update for one polling attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// One-based attempt number that observed the update.
    pub attempt: u32,
    /// What was observed.
    pub message: String,
}

impl ProgressEvent {
    /// Message used when an attempt finds the job still pending.
    pub const PENDING_MESSAGE: &'static str = "job is pending";

    /// Creates an event for the given one-based attempt.
    #[must_use]
    pub fn new(attempt: u32, message: impl Into<String>) -> Self {
        Self {
            attempt,
            message: message.into(),
        }
    }

    /// Creates the event reported when a job is still pending.
    #[must_use]
    pub fn pending(attempt: u32) -> Self {
        Self::new(attempt, Self::PENDING_MESSAGE)
    }

    /// Returns the event message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Attempt {}: {}", self.attempt, self.message)
    }
}
