//! CLI command implementations.

pub(crate) mod run;
pub(crate) mod serve;
pub(crate) mod submit;
pub(crate) mod wait;

use crate::PollingArgs;
use anyhow::{Context, Result};
use jobwatch_lib::prelude::*;
use std::time::Duration;
use tracing::warn;

/// Returns a token that is cancelled on the first Ctrl-C.
pub(crate) fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling");
            token.cancel();
        }
    });
    cancel
}

/// Builds a client for `url` from the polling flags.
pub(crate) fn build_client(url: &str, args: &PollingArgs) -> Result<JobClient> {
    let polling = PollingConfig::new(
        args.max_attempts,
        Duration::from_millis(args.base_delay_ms),
        Duration::from_millis(args.max_delay_ms),
        Duration::from_millis(args.per_call_timeout_ms),
        Duration::from_secs(args.timeout_secs),
    )
    .context("Invalid polling settings")?;

    let client = JobClient::new(ClientConfig {
        base_url: url.to_string(),
        polling,
        ..Default::default()
    })?;
    Ok(client)
}
