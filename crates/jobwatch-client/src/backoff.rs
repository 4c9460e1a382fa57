//! Exponential backoff with additive jitter.

use jobwatch_types::PollingConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Returns `base * 2^attempt`, capped at `cap`.
///
/// Saturates instead of overflowing, so any attempt index is safe.
#[must_use]
pub fn exponential_delay(attempt: u32, base: Duration, cap: Duration) -> Duration {
    let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    base.saturating_mul(factor).min(cap)
}

/// Computes the wait before the next attempt.
///
/// The exponential delay is capped at `cap`, then up to half of the capped
/// value is added as uniform jitter. The result therefore lies in
/// `[d, d + d/2]` where `d = min(base * 2^attempt, cap)`.
pub fn compute_delay<R: Rng + ?Sized>(
    attempt: u32,
    base: Duration,
    cap: Duration,
    rng: &mut R,
) -> Duration {
    let bounded = exponential_delay(attempt, base, cap);
    let half = u64::try_from((bounded / 2).as_nanos()).unwrap_or(u64::MAX);
    let jitter = if half == 0 {
        0
    } else {
        rng.random_range(0..=half)
    };
    bounded.saturating_add(Duration::from_nanos(jitter))
}

/// Backoff calculator bound to a base delay, a cap and a random source.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    cap: Duration,
    rng: StdRng,
}

impl Backoff {
    /// Creates a calculator seeded from the operating system.
    #[must_use]
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self {
            base,
            cap,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a calculator with a fixed seed, for reproducible delays.
    #[must_use]
    pub fn seeded(base: Duration, cap: Duration, seed: u64) -> Self {
        Self {
            base,
            cap,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a calculator from the delays of a polling configuration.
    #[must_use]
    pub fn from_config(config: &PollingConfig) -> Self {
        Self::new(config.base_delay(), config.max_delay())
    }

    /// Returns the delay to wait after the given zero-based attempt.
    pub fn delay(&mut self, attempt: u32) -> Duration {
        compute_delay(attempt, self.base, self.cap, &mut self.rng)
    }
}
