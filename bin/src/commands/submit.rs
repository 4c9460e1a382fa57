//! Submit command implementation.

use super::build_client;
use crate::PollingArgs;
use anyhow::Result;
use jobwatch_lib::prelude::*;

/// Create a job and print its identifier on stdout.
pub(crate) async fn submit(
    url: &str,
    polling: &PollingArgs,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(url, polling)?;
    let job_id = client.create_job(cancel).await?;
    println!("{job_id}");
    Ok(())
}
