//! Error taxonomy for submitting and polling jobs.
//!
//! Every terminal path of an operation maps to a distinct variant so callers
//! can branch on [`ErrorKind`] instead of matching messages.

use jobwatch_types::{ConfigError, StatusResult};
use std::time::Duration;
use thiserror::Error;

/// Result type alias for jobwatch client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Flat classification of every error an operation can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid configuration or HTTP client setup.
    Config,
    /// Network failure.
    Transport,
    /// Non-success response without a usable body.
    Service,
    /// Undecodable response body.
    Decode,
    /// Unknown job status value.
    UnexpectedState,
    /// Creation response without a job identifier.
    MissingIdentifier,
    /// The job reached its failed state.
    JobFailed,
    /// Attempt cap reached while pending.
    Exhausted,
    /// Cancelled by the caller.
    Cancelled,
    /// Overall deadline passed.
    DeadlineExceeded,
}

impl ErrorKind {
    /// Returns the kind as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Transport => "transport",
            Self::Service => "service",
            Self::Decode => "decode",
            Self::UnexpectedState => "unexpected_state",
            Self::MissingIdentifier => "missing_identifier",
            Self::JobFailed => "job_failed",
            Self::Exhausted => "exhausted",
            Self::Cancelled => "cancelled",
            Self::DeadlineExceeded => "deadline_exceeded",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reason an operation stopped before reaching an outcome.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,

    /// The overall deadline passed.
    #[error("operation timed out after {0:?}")]
    DeadlineExceeded(Duration),
}

impl Interrupted {
    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Cancelled => ErrorKind::Cancelled,
            Self::DeadlineExceeded(_) => ErrorKind::DeadlineExceeded,
        }
    }
}

/// Errors from a single status lookup. These are never retried.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or its body could not be read.
    #[error("status request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success code and no usable body.
    #[error("status service returned error: {status}")]
    Service {
        /// HTTP status code.
        status: u16,
    },

    /// The body was not a status envelope.
    #[error("failed to parse status response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The body was well formed but the status value is unknown.
    #[error("unexpected job status '{0}'")]
    UnexpectedState(String),
}

impl FetchError {
    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Service { .. } => ErrorKind::Service,
            Self::Decode(_) => ErrorKind::Decode,
            Self::UnexpectedState(_) => ErrorKind::UnexpectedState,
        }
    }
}

/// Errors from the job creation call.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The request could not be sent or its body could not be read.
    #[error("failed to create job: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success code.
    #[error("server returned error: {status}")]
    Service {
        /// HTTP status code.
        status: u16,
    },

    /// The body was not a creation envelope.
    #[error("failed to parse create job response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The response succeeded but carried no job identifier.
    #[error("job ID is missing in the response")]
    MissingIdentifier,

    /// The caller cancelled the operation or its deadline passed.
    #[error(transparent)]
    Interrupted(#[from] Interrupted),
}

impl SubmitError {
    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Service { .. } => ErrorKind::Service,
            Self::Decode(_) => ErrorKind::Decode,
            Self::MissingIdentifier => ErrorKind::MissingIdentifier,
            Self::Interrupted(reason) => reason.kind(),
        }
    }
}

/// Terminal errors of a polling operation.
#[derive(Error, Debug)]
pub enum PollError {
    /// A status lookup failed; polling stops immediately.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The job reached its failed state.
    #[error("job failed")]
    JobFailed(StatusResult),

    /// The attempt cap was reached while the job was still pending.
    #[error("job did not complete after maximum retries ({attempts} attempts)")]
    Exhausted {
        /// Number of status lookups performed.
        attempts: u32,
    },

    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,

    /// The overall deadline passed.
    #[error("operation timed out: the job did not complete within {0:?}")]
    DeadlineExceeded(Duration),
}

impl PollError {
    /// Returns true if polling the same job again could still succeed.
    ///
    /// Only exhaustion qualifies: a failed job stays failed, and fetch
    /// errors or interruptions need the caller's judgement.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Returns the failed status result, if the job itself failed.
    #[must_use]
    pub const fn failed_result(&self) -> Option<&StatusResult> {
        match self {
            Self::JobFailed(result) => Some(result),
            _ => None,
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch(err) => err.kind(),
            Self::JobFailed(_) => ErrorKind::JobFailed,
            Self::Exhausted { .. } => ErrorKind::Exhausted,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::DeadlineExceeded(_) => ErrorKind::DeadlineExceeded,
        }
    }
}

impl From<Interrupted> for PollError {
    fn from(reason: Interrupted) -> Self {
        match reason {
            Interrupted::Cancelled => Self::Cancelled,
            Interrupted::DeadlineExceeded(timeout) => Self::DeadlineExceeded(timeout),
        }
    }
}

/// Errors from any client operation.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Creating the job failed.
    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// Waiting for the job failed.
    #[error(transparent)]
    Poll(#[from] PollError),
}

impl Error {
    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) | Self::Client(_) => ErrorKind::Config,
            Self::Submit(err) => err.kind(),
            Self::Poll(err) => err.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobwatch_types::JobState;

    #[test]
    fn test_exhausted_display_matches_service_wording() {
        let err = PollError::Exhausted { attempts: 1 };
        assert!(
            err.to_string()
                .starts_with("job did not complete after maximum retries")
        );
    }

    #[test]
    fn test_only_exhausted_is_retryable() {
        assert!(PollError::Exhausted { attempts: 3 }.is_retryable());
        let failed = PollError::JobFailed(StatusResult::new(
            JobState::Failed,
            serde_json::Value::Null,
        ));
        assert!(!failed.is_retryable());
        assert!(!PollError::Cancelled.is_retryable());
        assert!(!PollError::DeadlineExceeded(Duration::from_secs(1)).is_retryable());
    }

    #[test]
    fn test_interrupted_maps_to_distinct_poll_errors() {
        assert!(matches!(
            PollError::from(Interrupted::Cancelled),
            PollError::Cancelled
        ));
        assert!(matches!(
            PollError::from(Interrupted::DeadlineExceeded(Duration::from_secs(2))),
            PollError::DeadlineExceeded(d) if d == Duration::from_secs(2)
        ));
    }

    #[test]
    fn test_kinds_are_distinct_per_terminal_path() {
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            Error::from(PollError::from(FetchError::Decode(decode))).kind(),
            ErrorKind::Decode
        );
        assert_eq!(
            Error::from(SubmitError::MissingIdentifier).kind(),
            ErrorKind::MissingIdentifier
        );
        assert_eq!(
            Error::from(SubmitError::from(Interrupted::Cancelled)).kind(),
            ErrorKind::Cancelled
        );
        assert_eq!(
            PollError::Exhausted { attempts: 2 }.kind(),
            ErrorKind::Exhausted
        );
        assert_eq!(ErrorKind::DeadlineExceeded.to_string(), "deadline_exceeded");
    }

    #[test]
    fn test_failed_result_is_carried() {
        let result = StatusResult::new(JobState::Failed, serde_json::json!({"x": 1}));
        let err = PollError::JobFailed(result.clone());
        assert_eq!(err.failed_result(), Some(&result));
        assert_eq!(PollError::Cancelled.failed_result(), None);
    }

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FetchError>();
        assert_send_sync::<SubmitError>();
        assert_send_sync::<PollError>();
        assert_send_sync::<Error>();
    }
}
