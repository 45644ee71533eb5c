use std::time::Duration;
use votewatch_domain::config::RetryConfig;

/// Bounded exponential backoff: attempt `n` waits `base * 2^(n-1)`, capped
/// at `max_delay`. With jitter the wait is drawn from the upper half of that
/// window.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter: bool,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
            jitter: true,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.base_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        )
    }

    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO, Duration::ZERO)
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Wait before the attempt following failed attempt number `attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let base_ms = self.base_delay.as_millis() as u64;
        let capped_ms = base_ms
            .saturating_mul(1u64 << exponent)
            .min(self.max_delay.as_millis() as u64);

        if !self.jitter || capped_ms < 2 {
            return Duration::from_millis(capped_ms);
        }

        let half = capped_ms / 2;
        Duration::from_millis(half + fastrand::u64(0..=capped_ms - half))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}
