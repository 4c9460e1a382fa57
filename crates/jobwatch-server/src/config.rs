//! Server configuration and errors.

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running the server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The configuration was rejected.
    #[error("invalid server configuration: {0}")]
    InvalidConfig(String),

    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The address that could not be bound.
        addr: SocketAddr,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// How created jobs behave over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Shortest time before a job finishes.
    pub min_delay: Duration,
    /// Longest time before a job finishes.
    pub max_delay: Duration,
    /// Probability in `[0, 1]` that a finished job reports an error.
    pub failure_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(15),
            failure_rate: 0.5,
        }
    }
}

impl SimulationConfig {
    /// Checks that the delay window and failure rate make sense.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.max_delay < self.min_delay {
            return Err(ServerError::InvalidConfig(format!(
                "max delay ({:?}) must be greater than or equal to min delay ({:?})",
                self.max_delay, self.min_delay
            )));
        }
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(ServerError::InvalidConfig(format!(
                "failure rate must be between 0 and 1, got {}",
                self.failure_rate
            )));
        }
        Ok(())
    }
}

/// Configuration for the status server.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,
    /// Job timing and outcome.
    pub simulation: SimulationConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            simulation: SimulationConfig::default(),
        }
    }
}
