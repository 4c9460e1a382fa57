//! Reference job status service.
//!
//! - [`router`] - The axum routes over a [`JobRegistry`]
//! - [`serve`] - Bind and run until a shutdown token fires
//! - [`JobRecord`] - A simulated job with a fixed completion time and outcome

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod config;
mod job;
mod registry;

pub use app::router;
pub use config::{ServerConfig, ServerError, SimulationConfig};
pub use job::JobRecord;
pub use registry::{InMemoryRegistry, JobRegistry};

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Binds `config.bind` and serves until `shutdown` is cancelled.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the address cannot be
/// bound, or the server fails while running.
pub async fn serve(config: ServerConfig, shutdown: CancellationToken) -> Result<(), ServerError> {
    config.simulation.validate()?;
    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind,
            source,
        })?;
    serve_listener(listener, config.simulation, shutdown).await
}

/// Serves on an already bound listener until `shutdown` is cancelled.
///
/// In-flight requests are allowed to finish before this returns.
///
/// # Errors
///
/// Returns an error if the simulation settings are invalid or the server
/// fails while running.
pub async fn serve_listener(
    listener: TcpListener,
    simulation: SimulationConfig,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    let app = router(Arc::new(InMemoryRegistry::new()), simulation)?;
    let addr: Option<SocketAddr> = listener.local_addr().ok();
    info!(?addr, "job status service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(ServerError::Serve)?;

    info!("job status service stopped");
    Ok(())
}
