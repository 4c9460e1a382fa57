//! One-shot job creation.

use async_trait::async_trait;
use jobwatch_types::JobId;
use jobwatch_types::wire::{CreateJobPayload, Envelope};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::SubmitError;
use crate::url::create_url;

/// Capability to create a job and obtain its identifier.
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    /// Creates a job, giving up after `timeout`.
    async fn submit(&self, timeout: Duration) -> Result<JobId, SubmitError>;
}

#[async_trait]
impl<T: JobSubmitter + ?Sized> JobSubmitter for Arc<T> {
    async fn submit(&self, timeout: Duration) -> Result<JobId, SubmitError> {
        (**self).submit(timeout).await
    }
}

/// [`JobSubmitter`] issuing `POST {base}/`.
#[derive(Debug, Clone)]
pub struct HttpJobSubmitter {
    client: Client,
    base_url: String,
}

impl HttpJobSubmitter {
    /// Creates a submitter sharing the given HTTP client's connection pool.
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl JobSubmitter for HttpJobSubmitter {
    async fn submit(&self, timeout: Duration) -> Result<JobId, SubmitError> {
        let response = self
            .client
            .post(create_url(&self.base_url))
            .timeout(timeout)
            .send()
            .await
            .map_err(SubmitError::Transport)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(SubmitError::Service {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(SubmitError::Transport)?;
        let envelope: Envelope<CreateJobPayload> =
            serde_json::from_slice(&body).map_err(SubmitError::Decode)?;

        envelope
            .payload
            .and_then(|payload| payload.job_id)
            .filter(|id| !id.is_empty())
            .map(JobId::from)
            .ok_or(SubmitError::MissingIdentifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn submit_to(template: ResponseTemplate) -> Result<JobId, SubmitError> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(template)
            .expect(1)
            .mount(&server)
            .await;

        let submitter = HttpJobSubmitter::new(Client::new(), server.uri());
        submitter.submit(Duration::from_secs(5)).await
    }

    #[tokio::test]
    async fn test_submit_returns_job_id() {
        let body = serde_json::json!({
            "meta": {"message": "Job created successfully"},
            "payload": {"jobID": "7d3e"}
        });
        let id = submit_to(ResponseTemplate::new(200).set_body_json(body))
            .await
            .unwrap();
        assert_eq!(id, JobId::new("7d3e"));
    }

    #[tokio::test]
    async fn test_empty_job_id_is_missing_identifier() {
        let body = serde_json::json!({"payload": {"jobID": ""}});
        let err = submit_to(ResponseTemplate::new(200).set_body_json(body))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::MissingIdentifier));
    }

    #[tokio::test]
    async fn test_absent_payload_is_missing_identifier() {
        let body = serde_json::json!({"meta": {"message": "ok"}});
        let err = submit_to(ResponseTemplate::new(200).set_body_json(body))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::MissingIdentifier));
    }

    #[tokio::test]
    async fn test_non_ok_status_is_service_error() {
        let body = serde_json::json!({"payload": {"jobID": "ignored"}});
        let err = submit_to(ResponseTemplate::new(503).set_body_json(body))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Service { status: 503 }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let err = submit_to(ResponseTemplate::new(200).set_body_string("<html>"))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Decode(_)));
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let submitter = HttpJobSubmitter::new(Client::new(), server.uri());
        let err = submitter
            .submit(Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Transport(ref e) if e.is_timeout()));
    }
}
