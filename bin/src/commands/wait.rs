//! Wait command implementation.

use super::build_client;
use crate::PollingArgs;
use crate::display::ProgressDisplay;
use anyhow::Result;
use jobwatch_lib::prelude::*;

/// Poll an existing job until it finishes.
pub(crate) async fn wait(
    job_id: &str,
    url: &str,
    polling: &PollingArgs,
    quiet: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(url, polling)?;
    let job_id = JobId::from(job_id);

    let display = ProgressDisplay::start(quiet, format!("Waiting for {job_id}"));
    let outcome = match display.sender() {
        Some(updates) => {
            client
                .wait_for_job_with_updates(&job_id, cancel, updates)
                .await
        }
        None => client.wait_for_job(&job_id, cancel).await,
    };
    display.finish(outcome.is_ok()).await;

    let result = outcome?;
    println!("{job_id} {} {}", result.state(), result.payload());
    Ok(())
}
