//! Retry policy for the rate-limited scoring API
//!
//! Pure decision functions over an attempt counter: whether to retry,
//! and how long to back off (exponential with a ceiling).

use pagewatch_common::config::PageSpeedConfig;
use std::time::Duration;

/// Bounded exponential backoff policy
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: i64,
    base_delay: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: i64, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    pub fn from_config(config: &PageSpeedConfig) -> Self {
        Self::new(
            config.max_retries as i64,
            Duration::from_millis(config.base_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        )
    }

    /// Whether another attempt is allowed after `attempt` failures
    pub fn should_retry(&self, attempt: i64) -> bool {
        attempt < self.max_retries
    }

    /// Backoff before attempt `attempt + 1`: `min(base * 2^attempt, max)`
    pub fn delay(&self, attempt: i64) -> Duration {
        let attempt = attempt.clamp(0, 62) as u32;
        let base_ms = self.base_delay.as_millis() as u64;
        let delay_ms = base_ms.saturating_mul(1u64.checked_shl(attempt).unwrap_or(u64::MAX));
        Duration::from_millis(delay_ms).min(self.max_delay)
    }

    pub fn max_retries(&self) -> i64 {
        self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000), Duration::from_millis(30000))
    }
}
