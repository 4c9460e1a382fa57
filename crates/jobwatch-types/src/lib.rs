//! Core types for the jobwatch job polling client.
//!
//! This crate provides the data model shared by the client and the
//! reference status service:
//!
//! - [`JobId`] - Opaque identifier returned when a job is created
//! - [`JobState`] - Pending, completed or failed
//! - [`StatusResult`] - One status lookup's state and raw payload
//! - [`ProgressEvent`] - Human-readable update for a pending attempt
//! - [`PollingConfig`] - Validated attempt cap, delays and timeouts
//! - [`wire`] - JSON envelope used on the wire

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod job;
mod progress;
pub mod wire;

pub use config::PollingConfig;
pub use error::{ConfigError, UnknownStateError};
pub use job::{JobId, JobState, StatusResult};
pub use progress::ProgressEvent;
