//! Progress and error output for the jobwatch CLI.

use indicatif::{ProgressBar, ProgressStyle};
use jobwatch_lib::prelude::*;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Spinner fed by the polling engine's progress events.
#[derive(Debug)]
pub(crate) struct ProgressDisplay {
    spinner: ProgressBar,
    sender: Option<ProgressSender>,
    task: Option<JoinHandle<()>>,
}

impl ProgressDisplay {
    /// Starts the spinner, or a hidden one in quiet mode.
    pub(crate) fn start(quiet: bool, message: String) -> Self {
        if quiet {
            return Self {
                spinner: ProgressBar::hidden(),
                sender: None,
                task: None,
            };
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));

        let (sender, mut receiver) = mpsc::channel::<ProgressEvent>(16);
        let bar = spinner.clone();
        let task = tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                bar.set_message(event.to_string());
            }
        });

        Self {
            spinner,
            sender: Some(sender),
            task: Some(task),
        }
    }

    /// Returns a sender for progress events, if progress is shown.
    ///
    /// The spinner stops updating once every returned sender is dropped.
    pub(crate) fn sender(&self) -> Option<ProgressSender> {
        self.sender.clone()
    }

    /// Drains outstanding events and clears or freezes the spinner.
    pub(crate) async fn finish(mut self, success: bool) {
        self.sender = None;
        if let Some(task) = self.task.take()
            && let Err(err) = task.await
        {
            debug!(error = %err, "progress display task ended abnormally");
        }
        if success {
            self.spinner.finish_and_clear();
        } else {
            self.spinner.abandon();
        }
    }
}

/// Prints an error with its kind on stderr.
pub(crate) fn report_error(err: &anyhow::Error) {
    match error_kind(err) {
        Some(kind) => eprintln!("Error [{kind}]: {err:#}"),
        None => eprintln!("Error: {err:#}"),
    }
}

fn error_kind(err: &anyhow::Error) -> Option<ErrorKind> {
    if let Some(e) = err.downcast_ref::<Error>() {
        return Some(e.kind());
    }
    if let Some(e) = err.downcast_ref::<PollError>() {
        return Some(e.kind());
    }
    err.downcast_ref::<SubmitError>().map(SubmitError::kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_of_poll_error() {
        let err = anyhow::Error::new(PollError::Exhausted { attempts: 3 });
        assert_eq!(error_kind(&err), Some(ErrorKind::Exhausted));
    }

    #[test]
    fn test_error_kind_through_context() {
        let err = anyhow::Error::new(SubmitError::MissingIdentifier).context("submitting");
        assert_eq!(error_kind(&err), Some(ErrorKind::MissingIdentifier));
    }

    #[test]
    fn test_error_kind_of_other_errors() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(error_kind(&err), None);
    }

    #[tokio::test]
    async fn test_quiet_display_has_no_sender() {
        let display = ProgressDisplay::start(true, "x".to_string());
        assert!(display.sender().is_none());
        display.finish(true).await;
    }

    #[tokio::test]
    async fn test_finish_waits_for_dropped_senders() {
        let display = ProgressDisplay::start(false, "x".to_string());
        let sender = display.sender().unwrap();
        sender.send(ProgressEvent::pending(1)).await.unwrap();
        drop(sender);
        display.finish(true).await;
    }

    #[tokio::test]
    async fn test_finish_tolerates_aborted_display_task() {
        let display = ProgressDisplay::start(false, "x".to_string());
        if let Some(task) = &display.task {
            task.abort();
        }
        display.finish(false).await;
    }
}
