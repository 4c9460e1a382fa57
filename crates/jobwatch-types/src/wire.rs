//! JSON envelope exchanged with the job status service.
//!
//! Every response has the shape `{"meta": {"message": ...}, "payload": {...}}`
//! where `payload` may be absent on errors.

use serde::{Deserialize, Serialize};

/// Response envelope wrapping an optional payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Human-readable metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    /// Response body proper.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> Envelope<T> {
    /// Creates an envelope with a message and a payload.
    pub fn new(message: impl Into<String>, payload: T) -> Self {
        Self {
            meta: Some(Meta::new(message)),
            payload: Some(payload),
        }
    }

    /// Creates an envelope carrying only a message.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            meta: Some(Meta::new(message)),
            payload: None,
        }
    }
}

/// Envelope metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Human-readable description of the response.
    pub message: String,
}

impl Meta {
    /// Creates metadata with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Payload of a job creation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateJobPayload {
    /// Identifier of the created job.
    #[serde(rename = "jobID", default)]
    pub job_id: Option<String>,
}

/// Payload of a status lookup response.
///
/// The status is kept as a raw string so an unknown value can be reported
/// as such instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    /// Wire representation of the job state.
    pub status: String,
}
