//! Simulated job records.

use chrono::{DateTime, TimeDelta, Utc};
use jobwatch_types::JobState;
use rand::Rng;

use crate::{ServerError, SimulationConfig};

/// A job whose completion time and outcome are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    /// Job identifier.
    pub id: String,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
    /// When the job stops being pending.
    pub complete_at: DateTime<Utc>,
    /// Whether the job reports an error once finished.
    pub will_fail: bool,
}

impl JobRecord {
    /// Creates a job at `now` with a random completion time and outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidConfig`] if `config` does not validate.
    pub fn schedule<R: Rng + ?Sized>(
        config: &SimulationConfig,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self, ServerError> {
        config.validate()?;
        let delay = if config.max_delay > config.min_delay {
            rng.random_range(config.min_delay..config.max_delay)
        } else {
            config.min_delay
        };
        let delay = TimeDelta::from_std(delay).unwrap_or(TimeDelta::MAX);

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now,
            complete_at: now.checked_add_signed(delay).unwrap_or(DateTime::<Utc>::MAX_UTC),
            will_fail: rng.random_bool(config.failure_rate),
        })
    }

    /// Returns the state the job is in at `now`.
    #[must_use]
    pub fn state_at(&self, now: DateTime<Utc>) -> JobState {
        if now < self.complete_at {
            JobState::Pending
        } else if self.will_fail {
            JobState::Failed
        } else {
            JobState::Completed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn record(will_fail: bool) -> (JobRecord, DateTime<Utc>) {
        let now = Utc::now();
        let job = JobRecord {
            id: "j".into(),
            created_at: now,
            complete_at: now + TimeDelta::seconds(5),
            will_fail,
        };
        (job, now)
    }

    #[test]
    fn test_state_is_pending_until_complete_at() {
        let (job, now) = record(false);
        assert_eq!(job.state_at(now), JobState::Pending);
        assert_eq!(job.state_at(now + TimeDelta::seconds(4)), JobState::Pending);
        assert_eq!(job.state_at(now + TimeDelta::seconds(5)), JobState::Completed);
    }

    #[test]
    fn test_failing_job_reports_error_after_completion() {
        let (job, now) = record(true);
        assert_eq!(job.state_at(now), JobState::Pending);
        assert_eq!(job.state_at(now + TimeDelta::seconds(6)), JobState::Failed);
    }

    #[test]
    fn test_schedule_within_window() {
        let config = SimulationConfig {
            min_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(15),
            failure_rate: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(3);
        let now = Utc::now();
        for _ in 0..100 {
            let job = JobRecord::schedule(&config, now, &mut rng).unwrap();
            let delay = job.complete_at - now;
            assert!(delay >= TimeDelta::seconds(5));
            assert!(delay < TimeDelta::seconds(15));
            assert!(!job.will_fail);
        }
    }

    #[test]
    fn test_schedule_fixed_delay_and_certain_failure() {
        let config = SimulationConfig {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            failure_rate: 1.0,
        };
        let mut rng = StdRng::seed_from_u64(3);
        let now = Utc::now();
        let job = JobRecord::schedule(&config, now, &mut rng).unwrap();
        assert_eq!(job.complete_at, now);
        assert_eq!(job.state_at(now), JobState::Failed);
    }

    #[test]
    fn test_schedule_assigns_unique_ids() {
        let config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let a = JobRecord::schedule(&config, Utc::now(), &mut rng).unwrap();
        let b = JobRecord::schedule(&config, Utc::now(), &mut rng).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_schedule_rejects_out_of_range_failure_rate() {
        let mut rng = StdRng::seed_from_u64(3);
        for failure_rate in [2.0, -0.1, f64::NAN] {
            let config = SimulationConfig {
                failure_rate,
                ..SimulationConfig::default()
            };
            let err = JobRecord::schedule(&config, Utc::now(), &mut rng).unwrap_err();
            assert!(matches!(err, ServerError::InvalidConfig(_)));
        }
    }
}
