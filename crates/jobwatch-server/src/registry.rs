//! Concurrent job storage.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::JobRecord;

/// Shared store of jobs keyed by identifier.
///
/// Handlers for concurrent requests read and write through the same
/// registry, so implementations must be safe to use from many threads.
pub trait JobRegistry: Send + Sync + std::fmt::Debug {
    /// Stores a job, replacing any job with the same identifier.
    fn put(&self, job: JobRecord);

    /// Looks a job up by identifier.
    fn get(&self, id: &str) -> Option<JobRecord>;
}

/// [`JobRegistry`] backed by an in-process map.
///
/// Jobs are kept for the life of the process and never evicted, so a
/// finished job can be looked up any number of times. Memory grows with
/// every created job; this registry is meant for local testing, not for
/// long-running deployments.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    jobs: RwLock<HashMap<String, JobRecord>>,
}

impl InMemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if no job has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl JobRegistry for InMemoryRegistry {
    fn put(&self, job: JobRecord) {
        // A panicking writer cannot leave a half-inserted entry behind.
        self.jobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(job.id.clone(), job);
    }

    fn get(&self, id: &str) -> Option<JobRecord> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }
}
