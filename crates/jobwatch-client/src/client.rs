//! High-level client: submit a job, then wait for it.

use jobwatch_types::{JobId, PollingConfig, StatusResult};
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    Budget, Error, HttpJobSubmitter, HttpStatusFetcher, Interrupted, JobSubmitter, PollError,
    PollingEngine, ProgressSender, SubmitError,
};

/// Configuration for the job client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the job status service.
    pub base_url: String,
    /// Attempt cap, backoff delays and timeouts for polling.
    pub polling: PollingConfig,
    /// Bound on the job creation call.
    pub submit_timeout: Duration,
    /// Bound on establishing a connection.
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            polling: PollingConfig::default(),
            submit_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("jobwatch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// A job that reached its completed state.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedJob {
    /// Identifier assigned at creation.
    pub job_id: JobId,
    /// The final status lookup.
    pub result: StatusResult,
}

/// Client for creating jobs and waiting on their outcome.
///
/// Cloning is cheap and clones share one connection pool. Every wait runs
/// its own [`PollingEngine`], so concurrent waits share no mutable state.
#[derive(Debug, Clone)]
pub struct JobClient {
    submitter: HttpJobSubmitter,
    fetcher: HttpStatusFetcher,
    config: ClientConfig,
}

impl JobClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            // Polls are small and latency bound
            .tcp_nodelay(true)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            submitter: HttpJobSubmitter::new(client.clone(), config.base_url.clone()),
            fetcher: HttpStatusFetcher::new(client, config.base_url.clone()),
            config,
        })
    }

    /// Creates a client with default settings for the given service.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the polling configuration for validated in-place updates.
    ///
    /// Operations borrow the client immutably, so no change can reach an
    /// operation that is already running.
    pub const fn polling_mut(&mut self) -> &mut PollingConfig {
        &mut self.config.polling
    }

    /// Creates a job within the overall timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmitError`] if the job could not be created.
    pub async fn create_job(&self, cancel: &CancellationToken) -> Result<JobId, SubmitError> {
        let budget = self.budget(cancel);
        self.submit_within(&budget).await
    }

    /// Waits for a job to complete within the overall timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`PollError`] for every outcome other than completion.
    pub async fn wait_for_job(
        &self,
        job_id: &JobId,
        cancel: &CancellationToken,
    ) -> Result<StatusResult, PollError> {
        let budget = self.budget(cancel);
        self.poll_within(job_id, &budget, None).await
    }

    /// Like [`wait_for_job`](Self::wait_for_job), sending a progress event
    /// for every attempt that finds the job pending.
    ///
    /// # Errors
    ///
    /// Returns a [`PollError`] for every outcome other than completion.
    pub async fn wait_for_job_with_updates(
        &self,
        job_id: &JobId,
        cancel: &CancellationToken,
        updates: ProgressSender,
    ) -> Result<StatusResult, PollError> {
        let budget = self.budget(cancel);
        self.poll_within(job_id, &budget, Some(updates)).await
    }

    /// Creates a job and waits for it, both under one overall deadline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Submit`] if creation fails and [`Error::Poll`] for
    /// every waiting outcome other than completion.
    pub async fn run(
        &self,
        cancel: &CancellationToken,
        updates: Option<ProgressSender>,
    ) -> Result<CompletedJob, Error> {
        let budget = self.budget(cancel);
        let job_id = self.submit_within(&budget).await?;
        let result = self.poll_within(&job_id, &budget, updates).await?;
        Ok(CompletedJob { job_id, result })
    }

    fn budget(&self, cancel: &CancellationToken) -> Budget {
        Budget::new(self.config.polling.overall_timeout(), cancel.clone())
    }

    async fn submit_within(&self, budget: &Budget) -> Result<JobId, SubmitError> {
        budget.check()?;
        let timeout = budget.call_timeout(self.config.submit_timeout);

        match budget.guard(self.submitter.submit(timeout)).await? {
            Ok(job_id) => {
                info!(%job_id, "job created");
                Ok(job_id)
            }
            Err(_) if budget.is_expired() => {
                Err(Interrupted::DeadlineExceeded(budget.timeout()).into())
            }
            Err(err) => Err(err),
        }
    }

    async fn poll_within(
        &self,
        job_id: &JobId,
        budget: &Budget,
        updates: Option<ProgressSender>,
    ) -> Result<StatusResult, PollError> {
        let mut engine = PollingEngine::new(self.fetcher.clone(), self.config.polling);
        engine.poll(job_id, budget, updates).await
    }
}
