//! Retry policy: which responses are retried and how long to wait.

use std::time::Duration;

use rand::Rng;

use crate::config::ServiceConfiguration;

/// Statuses that mean "try again": permanent redirect to another node,
/// throttled, and unavailable.
pub const RETRYABLE_STATUSES: [u16; 3] = [308, 429, 503];

/// Doublings beyond this leave the ceiling unchanged.
const MAX_BACKOFF_EXPONENT: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_num_retries: u32,
    backoff_slot_size: Duration,
}

impl RetryPolicy {
    pub fn new(max_num_retries: u32, backoff_slot_size: Duration) -> Self {
        Self {
            max_num_retries,
            backoff_slot_size,
        }
    }

    pub fn from_config(config: &ServiceConfiguration) -> Self {
        Self::new(config.max_num_retries, config.backoff_slot())
    }

    pub fn max_num_retries(&self) -> u32 {
        self.max_num_retries
    }

    /// The first try plus every retry.
    pub fn max_attempts(&self) -> u32 {
        self.max_num_retries.saturating_add(1)
    }

    pub fn is_retryable(status: u16) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }

    /// Longest pause before retry number `retry` (1-based): one slot,
    /// doubling per retry.
    pub fn backoff_ceiling(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(MAX_BACKOFF_EXPONENT);
        self.backoff_slot_size.saturating_mul(1 << exponent)
    }

    /// Full jitter: uniform between zero and `backoff_ceiling(retry)`.
    pub fn backoff<R: Rng + ?Sized>(&self, retry: u32, rng: &mut R) -> Duration {
        self.backoff_ceiling(retry).mul_f64(rng.gen::<f64>())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ServiceConfiguration::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn retryable_statuses() {
        for status in [308, 429, 503] {
            assert!(RetryPolicy::is_retryable(status));
        }
        for status in [200, 301, 404, 500, 502] {
            assert!(!RetryPolicy::is_retryable(status));
        }
    }

    #[test]
    fn ceiling_doubles_per_retry() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.backoff_ceiling(1), Duration::from_millis(500));
        assert_eq!(policy.backoff_ceiling(2), Duration::from_millis(1000));
        assert_eq!(policy.backoff_ceiling(3), Duration::from_millis(2000));
        assert_eq!(policy.backoff_ceiling(100), policy.backoff_ceiling(17));
    }

    #[test]
    fn jittered_backoff_stays_under_ceiling() {
        let policy = RetryPolicy::new(3, Duration::from_millis(10));
        let mut rng = StdRng::seed_from_u64(7);
        for retry in 1..=3 {
            let pause = policy.backoff(retry, &mut rng);
            assert!(pause <= policy.backoff_ceiling(retry));
        }
    }

    #[test]
    fn zero_slot_never_waits() {
        let policy = RetryPolicy::new(2, Duration::ZERO);
        assert_eq!(policy.backoff(2, &mut rand::thread_rng()), Duration::ZERO);
    }
}
