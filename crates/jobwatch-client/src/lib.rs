//! Submit-and-poll client for remote asynchronous jobs.
//!
//! This crate provides the polling pipeline:
//!
//! - [`backoff::compute_delay`] - Exponential backoff with up to 50% jitter
//! - [`Budget`] - Overall deadline and cancellation shared by every wait
//! - [`StatusFetcher`] / [`HttpStatusFetcher`] - One status lookup, typed errors
//! - [`JobSubmitter`] / [`HttpJobSubmitter`] - One job creation call
//! - [`PollingEngine`] - The polling state machine
//! - [`JobClient`] - Submit and wait under a single deadline

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod backoff;
mod budget;
mod client;
mod engine;
mod error;
mod fetch;
mod submit;
pub mod url;

pub use backoff::{Backoff, compute_delay};
pub use budget::Budget;
pub use client::{ClientConfig, CompletedJob, JobClient};
pub use engine::{PollingEngine, ProgressSender};
pub use error::{Error, ErrorKind, FetchError, Interrupted, PollError, Result, SubmitError};
pub use fetch::{HttpStatusFetcher, StatusFetcher};
pub use submit::{HttpJobSubmitter, JobSubmitter};

pub use tokio_util::sync::CancellationToken;
