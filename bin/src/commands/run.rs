//! Run command implementation.

use super::build_client;
use crate::PollingArgs;
use crate::display::ProgressDisplay;
use anyhow::Result;
use jobwatch_lib::prelude::*;

/// Create a job and poll it until it finishes.
pub(crate) async fn run(
    url: &str,
    polling: &PollingArgs,
    quiet: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(url, polling)?;

    let display = ProgressDisplay::start(quiet, "Creating job".to_string());
    let outcome = client.run(cancel, display.sender()).await;
    display.finish(outcome.is_ok()).await;

    let job = outcome?;
    println!("{} {} {}", job.job_id, job.result.state(), job.result.payload());
    Ok(())
}
