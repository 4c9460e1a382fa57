//! Remaining time budget and cancellation for one operation.

use crate::Interrupted;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

// Stand-in deadline for timeouts too large to represent as an instant.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Overall deadline plus cancellation signal shared by every suspension
/// point of an operation.
///
/// Network calls get the lesser of their own timeout and the time left
/// ([`Budget::call_timeout`]); futures and sleeps run through
/// [`Budget::guard`] so they stop as soon as the caller cancels or the
/// deadline passes.
#[derive(Debug, Clone)]
pub struct Budget {
    deadline: Instant,
    timeout: Duration,
    cancel: CancellationToken,
}

impl Budget {
    /// Starts a budget of `timeout` from now.
    #[must_use]
    pub fn new(timeout: Duration, cancel: CancellationToken) -> Self {
        let now = Instant::now();
        let deadline = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + FAR_FUTURE);
        Self {
            deadline,
            timeout,
            cancel,
        }
    }

    /// Returns the absolute deadline.
    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns the total budget this operation started with.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the cancellation token.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Returns the time left before the deadline.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Returns true once the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Returns the timeout for the next network call: the per-call bound,
    /// shortened to whatever remains of the budget.
    #[must_use]
    pub fn call_timeout(&self, per_call: Duration) -> Duration {
        per_call.min(self.remaining())
    }

    /// Fails if the operation was cancelled or its deadline has passed.
    ///
    /// Cancellation takes precedence when both hold.
    ///
    /// # Errors
    ///
    /// Returns the reason the operation must stop.
    pub fn check(&self) -> Result<(), Interrupted> {
        if self.cancel.is_cancelled() {
            return Err(Interrupted::Cancelled);
        }
        if self.is_expired() {
            return Err(Interrupted::DeadlineExceeded(self.timeout));
        }
        Ok(())
    }

    /// Drives `future` until it completes, the caller cancels, or the
    /// deadline passes. The future is dropped when interrupted.
    ///
    /// # Errors
    ///
    /// Returns the interruption reason; cancellation wins ties.
    pub async fn guard<F: Future>(&self, future: F) -> Result<F::Output, Interrupted> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(Interrupted::Cancelled),
            () = tokio::time::sleep_until(self.deadline) => {
                Err(Interrupted::DeadlineExceeded(self.timeout))
            }
            output = future => Ok(output),
        }
    }

    /// Sleeps for `duration`, waking early on cancellation or deadline.
    ///
    /// # Errors
    ///
    /// Returns the interruption reason if the sleep did not run to the end.
    pub async fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        self.guard(tokio::time::sleep(duration)).await
    }
}
