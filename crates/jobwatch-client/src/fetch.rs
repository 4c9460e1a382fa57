//! Single status lookups against the job status service.

use async_trait::async_trait;
use jobwatch_types::wire::{Envelope, StatusPayload};
use jobwatch_types::{JobId, JobState, StatusResult};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::FetchError;
use crate::url::status_url;

/// Capability to look up a job's current state once.
///
/// Implementations perform exactly one round trip and never retry;
/// retrying is the polling engine's decision.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    /// Fetches the current status of `job_id`, giving up after `timeout`.
    async fn fetch(&self, job_id: &JobId, timeout: Duration) -> Result<StatusResult, FetchError>;
}

#[async_trait]
impl<T: StatusFetcher + ?Sized> StatusFetcher for Arc<T> {
    async fn fetch(&self, job_id: &JobId, timeout: Duration) -> Result<StatusResult, FetchError> {
        (**self).fetch(job_id, timeout).await
    }
}

/// [`StatusFetcher`] issuing `GET {base}/status/{job_id}`.
#[derive(Debug, Clone)]
pub struct HttpStatusFetcher {
    client: Client,
    base_url: String,
}

impl HttpStatusFetcher {
    /// Creates a fetcher sharing the given HTTP client's connection pool.
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Returns the service base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl StatusFetcher for HttpStatusFetcher {
    async fn fetch(&self, job_id: &JobId, timeout: Duration) -> Result<StatusResult, FetchError> {
        let url = status_url(&self.base_url, job_id);
        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(FetchError::Transport)?;
        classify_status(status, &body)
    }
}

/// Turns a status response into a result or a typed error.
///
/// The decoded `status` field is authoritative: a failed job is commonly
/// reported with a 5xx code alongside a perfectly good body. The HTTP code
/// only matters when the body carries no status payload.
pub(crate) fn classify_status(status: StatusCode, body: &[u8]) -> Result<StatusResult, FetchError> {
    let decoded = serde_json::from_slice::<serde_json::Value>(body).and_then(|raw| {
        let envelope = Envelope::<StatusPayload>::deserialize(&raw)?;
        Ok((raw, envelope.payload))
    });

    match decoded {
        Ok((raw, Some(payload))) => {
            let state = payload
                .status
                .parse::<JobState>()
                .map_err(|e| FetchError::UnexpectedState(e.value().to_string()))?;
            Ok(StatusResult::new(state, raw))
        }
        Ok((_, None)) | Err(_) if !status.is_success() => Err(FetchError::Service {
            status: status.as_u16(),
        }),
        Ok((_, None)) => Err(FetchError::Decode(serde::de::Error::missing_field(
            "payload",
        ))),
        Err(e) => Err(FetchError::Decode(e)),
    }
}
