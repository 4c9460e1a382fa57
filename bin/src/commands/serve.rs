//! Serve command implementation.

use anyhow::Result;
use jobwatch_lib::prelude::*;
use std::net::SocketAddr;
use std::time::Duration;

/// Run the reference status service until interrupted.
pub(crate) async fn serve(
    bind: SocketAddr,
    min_delay_ms: u64,
    max_delay_ms: u64,
    failure_rate: f64,
    cancel: CancellationToken,
) -> Result<()> {
    let config = ServerConfig {
        bind,
        simulation: SimulationConfig {
            min_delay: Duration::from_millis(min_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
            failure_rate,
        },
    };

    eprintln!("Listening on http://{bind}");
    jobwatch_lib::prelude::serve(config, cancel).await?;
    Ok(())
}
