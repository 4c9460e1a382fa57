//! Polling configuration.

use crate::ConfigError;
use std::time::Duration;

/// Limits and delays governing one polling operation.
///
/// Every setter validates its input and leaves the configuration untouched
/// on rejection, so `max_delay >= base_delay` holds for any value that can
/// be observed. A polling operation takes its own copy when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
    per_call_timeout: Duration,
    overall_timeout: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            base_delay: Self::DEFAULT_BASE_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            per_call_timeout: Self::DEFAULT_PER_CALL_TIMEOUT,
            overall_timeout: Self::DEFAULT_OVERALL_TIMEOUT,
        }
    }
}

impl PollingConfig {
    /// Default attempt cap.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
    /// Default delay before the second attempt.
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);
    /// Default cap on the exponential delay.
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(10);
    /// Default bound on a single network call.
    pub const DEFAULT_PER_CALL_TIMEOUT: Duration = Duration::from_secs(30);
    /// Default budget for a whole operation.
    pub const DEFAULT_OVERALL_TIMEOUT: Duration = Duration::from_secs(120);

    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_attempts` is zero, any duration is zero,
    /// or `max_delay < base_delay`.
    pub fn new(
        max_attempts: u32,
        base_delay: Duration,
        max_delay: Duration,
        per_call_timeout: Duration,
        overall_timeout: Duration,
    ) -> Result<Self, ConfigError> {
        check_attempts(max_attempts)?;
        check_positive("base delay", base_delay)?;
        check_positive("max delay", max_delay)?;
        check_positive("per-call timeout", per_call_timeout)?;
        check_positive("overall timeout", overall_timeout)?;
        check_order(base_delay, max_delay)?;
        Ok(Self {
            max_attempts,
            base_delay,
            max_delay,
            per_call_timeout,
            overall_timeout,
        })
    }

    /// Returns the attempt cap.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the base backoff delay.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Returns the backoff cap.
    #[must_use]
    pub const fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Returns the bound on a single network call.
    #[must_use]
    pub const fn per_call_timeout(&self) -> Duration {
        self.per_call_timeout
    }

    /// Returns the budget for a whole operation.
    #[must_use]
    pub const fn overall_timeout(&self) -> Duration {
        self.overall_timeout
    }

    /// Sets the attempt cap.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroAttempts`] if `max_attempts` is zero.
    pub fn set_max_attempts(&mut self, max_attempts: u32) -> Result<(), ConfigError> {
        check_attempts(max_attempts)?;
        self.max_attempts = max_attempts;
        Ok(())
    }

    /// Sets the base backoff delay.
    ///
    /// # Errors
    ///
    /// Returns an error if the delay is zero or exceeds the current max delay.
    pub fn set_base_delay(&mut self, base_delay: Duration) -> Result<(), ConfigError> {
        check_positive("base delay", base_delay)?;
        check_order(base_delay, self.max_delay)?;
        self.base_delay = base_delay;
        Ok(())
    }

    /// Sets the backoff cap.
    ///
    /// # Errors
    ///
    /// Returns an error if the delay is zero or below the current base delay.
    pub fn set_max_delay(&mut self, max_delay: Duration) -> Result<(), ConfigError> {
        check_positive("max delay", max_delay)?;
        check_order(self.base_delay, max_delay)?;
        self.max_delay = max_delay;
        Ok(())
    }

    /// Sets the bound on a single network call.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero.
    pub fn set_per_call_timeout(&mut self, timeout: Duration) -> Result<(), ConfigError> {
        check_positive("per-call timeout", timeout)?;
        self.per_call_timeout = timeout;
        Ok(())
    }

    /// Sets the budget for a whole operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero.
    pub fn set_overall_timeout(&mut self, timeout: Duration) -> Result<(), ConfigError> {
        check_positive("overall timeout", timeout)?;
        self.overall_timeout = timeout;
        Ok(())
    }
}

const fn check_attempts(max_attempts: u32) -> Result<(), ConfigError> {
    if max_attempts == 0 {
        return Err(ConfigError::ZeroAttempts);
    }
    Ok(())
}

const fn check_positive(field: &'static str, value: Duration) -> Result<(), ConfigError> {
    if value.is_zero() {
        return Err(ConfigError::ZeroDuration { field });
    }
    Ok(())
}

fn check_order(base_delay: Duration, max_delay: Duration) -> Result<(), ConfigError> {
    if max_delay < base_delay {
        return Err(ConfigError::MaxDelayBelowBase {
            base_delay,
            max_delay,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polling_config_default() {
        let config = PollingConfig::default();
        assert_eq!(config.max_attempts(), 10);
        assert_eq!(config.base_delay(), Duration::from_millis(100));
        assert_eq!(config.max_delay(), Duration::from_secs(10));
        assert_eq!(config.per_call_timeout(), Duration::from_secs(30));
        assert_eq!(config.overall_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_new_rejects_max_below_base() {
        let err = PollingConfig::new(
            3,
            Duration::from_secs(2),
            Duration::from_secs(1),
            Duration::from_secs(1),
            Duration::from_secs(10),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::MaxDelayBelowBase {
                base_delay: Duration::from_secs(2),
                max_delay: Duration::from_secs(1),
            }
        );
    }

    #[test]
    fn test_new_accepts_equal_delays() {
        let config = PollingConfig::new(
            1,
            Duration::from_millis(50),
            Duration::from_millis(50),
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(config.base_delay(), config.max_delay());
    }

    #[test]
    fn test_set_max_delay_below_base_is_rejected_not_clamped() {
        let mut config = PollingConfig::default();
        let before = config;
        let err = config.set_max_delay(Duration::from_millis(10)).unwrap_err();
        assert!(matches!(err, ConfigError::MaxDelayBelowBase { .. }));
        assert_eq!(config, before);
    }

    #[test]
    fn test_set_base_delay_above_max_is_rejected() {
        let mut config = PollingConfig::default();
        assert!(config.set_base_delay(Duration::from_secs(11)).is_err());
        assert_eq!(config.base_delay(), Duration::from_millis(100));
        config.set_base_delay(Duration::from_secs(10)).unwrap();
        assert_eq!(config.base_delay(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut config = PollingConfig::default();
        assert_eq!(config.set_max_attempts(0), Err(ConfigError::ZeroAttempts));
        assert_eq!(
            config.set_base_delay(Duration::ZERO),
            Err(ConfigError::ZeroDuration { field: "base delay" })
        );
        assert!(config.set_max_delay(Duration::ZERO).is_err());
        assert!(config.set_per_call_timeout(Duration::ZERO).is_err());
        assert!(config.set_overall_timeout(Duration::ZERO).is_err());
        assert_eq!(config, PollingConfig::default());
    }

    #[test]
    fn test_setters_apply_valid_values() {
        let mut config = PollingConfig::default();
        config.set_max_attempts(1).unwrap();
        config.set_max_delay(Duration::from_secs(1)).unwrap();
        config.set_per_call_timeout(Duration::from_millis(500)).unwrap();
        config.set_overall_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(config.max_attempts(), 1);
        assert_eq!(config.max_delay(), Duration::from_secs(1));
        assert_eq!(config.per_call_timeout(), Duration::from_millis(500));
        assert_eq!(config.overall_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::ZeroDuration { field: "max delay" };
        assert_eq!(err.to_string(), "max delay must be greater than 0");
    }
}
