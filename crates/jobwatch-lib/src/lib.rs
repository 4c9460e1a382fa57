//! Submit-and-poll toolkit for remote asynchronous jobs.
//!
//! This is a facade crate that re-exports functionality from the jobwatch
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use jobwatch_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JobClient::with_base_url("http://localhost:8080")?;
//!     let cancel = CancellationToken::new();
//!
//!     let job = client.run(&cancel, None).await?;
//!     println!("{} finished: {}", job.job_id, job.result.state());
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use jobwatch_types::*;

// Re-export the client
#[cfg(feature = "client")]
pub use jobwatch_client::{
    Backoff, Budget, CancellationToken, ClientConfig, CompletedJob, Error, ErrorKind, FetchError,
    HttpJobSubmitter, HttpStatusFetcher, Interrupted, JobClient, JobSubmitter, PollError,
    PollingEngine, ProgressSender, Result, StatusFetcher, SubmitError, backoff, compute_delay,
    url,
};

// Re-export the reference server
#[cfg(feature = "server")]
pub use jobwatch_server as server;

/// Prelude module for convenient imports.
///
/// ```
/// use jobwatch_lib::prelude::*;
/// ```
pub mod prelude {
    pub use jobwatch_types::{JobId, JobState, PollingConfig, ProgressEvent, StatusResult};

    #[cfg(feature = "client")]
    pub use jobwatch_client::{
        CancellationToken, ClientConfig, CompletedJob, Error, ErrorKind, JobClient, PollError,
        ProgressSender, SubmitError,
    };

    #[cfg(feature = "server")]
    pub use jobwatch_server::{ServerConfig, SimulationConfig, serve};
}
