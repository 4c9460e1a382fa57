//! The polling state machine.
//!
//! A [`PollingEngine`] repeatedly asks a [`StatusFetcher`] for a job's state,
//! waiting an exponentially growing, jittered delay between attempts. Each
//! run ends in exactly one of:
//!
//! - success, when the job completes
//! - [`PollError::JobFailed`], when the job reaches its failed state
//! - [`PollError::Fetch`], as soon as a lookup fails (never retried)
//! - [`PollError::Exhausted`], when the attempt cap is reached while pending
//! - [`PollError::Cancelled`] / [`PollError::DeadlineExceeded`], when the
//!   caller or the clock stops the operation

use jobwatch_types::{JobId, JobState, PollingConfig, ProgressEvent, StatusResult};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::{Backoff, Budget, Interrupted, PollError, StatusFetcher};

/// Sending half of a progress observer channel.
pub type ProgressSender = mpsc::Sender<ProgressEvent>;

/// Polls one job until it reaches a terminal state or the run is cut short.
///
/// The configuration is copied in at construction and cannot change while a
/// run is in flight. Engines share nothing mutable; run one per job.
#[derive(Debug)]
pub struct PollingEngine<F> {
    fetcher: F,
    config: PollingConfig,
    backoff: Backoff,
}

impl<F: StatusFetcher> PollingEngine<F> {
    /// Creates an engine with an OS-seeded backoff calculator.
    #[must_use]
    pub fn new(fetcher: F, config: PollingConfig) -> Self {
        let backoff = Backoff::from_config(&config);
        Self {
            fetcher,
            config,
            backoff,
        }
    }

    /// Replaces the backoff calculator, e.g. with a seeded one.
    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns the engine's configuration.
    #[must_use]
    pub const fn config(&self) -> &PollingConfig {
        &self.config
    }

    /// Polls `job_id` until it completes.
    ///
    /// Every pending attempt emits a [`ProgressEvent`] to `observer` when one
    /// is given. Emission waits for channel capacity but gives up as soon as
    /// the caller cancels or the deadline passes; a dropped receiver silently
    /// turns further emission off.
    ///
    /// # Errors
    ///
    /// Returns a [`PollError`] for every outcome other than completion.
    #[tracing::instrument(name = "poll_job", skip_all, fields(job_id = %job_id))]
    pub async fn poll(
        &mut self,
        job_id: &JobId,
        budget: &Budget,
        mut observer: Option<ProgressSender>,
    ) -> Result<StatusResult, PollError> {
        let max_attempts = self.config.max_attempts();

        for attempt in 0..max_attempts {
            budget.check()?;

            let timeout = budget.call_timeout(self.config.per_call_timeout());
            debug!(attempt = attempt + 1, ?timeout, "fetching job status");

            let result = match budget.guard(self.fetcher.fetch(job_id, timeout)).await? {
                Ok(result) => result,
                // The call timeout was cut to the remaining budget, so a
                // failure at this point is the overall deadline expiring.
                Err(_) if budget.is_expired() => {
                    warn!("status fetch failed after the deadline passed");
                    return Err(PollError::DeadlineExceeded(budget.timeout()));
                }
                Err(err) => {
                    warn!(error = %err, "status fetch failed");
                    return Err(err.into());
                }
            };

            match result.state() {
                JobState::Completed => {
                    info!(attempts = attempt + 1, "job completed");
                    return Ok(result);
                }
                JobState::Failed => {
                    warn!(attempts = attempt + 1, "job failed");
                    return Err(PollError::JobFailed(result));
                }
                JobState::Pending => {}
            }

            let event = ProgressEvent::pending(attempt + 1);
            debug!(attempt = event.attempt, "job is pending");
            let receiver_gone = match &observer {
                Some(sender) => !emit(sender, event, budget).await?,
                None => false,
            };
            if receiver_gone {
                observer = None;
            }

            // Nothing left to wait for after the last attempt.
            if attempt + 1 < max_attempts {
                let delay = self.backoff.delay(attempt);
                trace!(?delay, "backing off");
                budget.sleep(delay).await?;
            }
        }

        warn!(
            attempts = max_attempts,
            "job did not complete after maximum retries"
        );
        Err(PollError::Exhausted {
            attempts: max_attempts,
        })
    }
}

/// Sends `event`, returning `Ok(false)` if the receiver is gone.
async fn emit(
    sender: &ProgressSender,
    event: ProgressEvent,
    budget: &Budget,
) -> Result<bool, Interrupted> {
    match budget.guard(sender.send(event)).await? {
        Ok(()) => Ok(true),
        Err(_) => {
            debug!("progress receiver dropped, no further events will be sent");
            Ok(false)
        }
    }
}
