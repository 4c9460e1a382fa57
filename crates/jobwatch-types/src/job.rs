//! Job identifiers, states and status results.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::UnknownStateError;

/// Opaque identifier returned by the service when a job is created.
///
/// No structure is assumed; the token is only ever echoed back to the
/// service when asking for the job's status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Wraps a raw identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// State of a job as reported by the status service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// The job has not finished yet.
    Pending,
    /// The job finished successfully.
    Completed,
    /// The job finished with an error.
    #[serde(rename = "error")]
    Failed,
}

impl JobState {
    /// Returns true if no further transition can occur from this state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns the state as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "error",
        }
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobState {
    type Err = UnknownStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "error" => Ok(Self::Failed),
            other => Err(UnknownStateError(other.to_string())),
        }
    }
}

/// Outcome of a single status lookup.
///
/// Built fresh for every fetch and never mutated afterwards. The raw
/// payload is the decoded response body, kept so callers can inspect
/// whatever else the service reported alongside the state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusResult {
    state: JobState,
    payload: serde_json::Value,
}

impl StatusResult {
    /// Creates a status result from a parsed state and the raw body.
    #[must_use]
    pub const fn new(state: JobState, payload: serde_json::Value) -> Self {
        Self { state, payload }
    }

    /// Returns the job state.
    #[must_use]
    pub const fn state(&self) -> JobState {
        self.state
    }

    /// Returns the raw response payload.
    #[must_use]
    pub const fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    /// Consumes the result, returning the raw payload.
    #[must_use]
    pub fn into_payload(self) -> serde_json::Value {
        self.payload
    }
}
