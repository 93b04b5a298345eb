use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Minimum spacing between two outbound calls.
    pub min_interval: Duration,
}

impl RateLimitConfig {
    pub fn courtesy() -> Self {
        Self {
            min_interval: Duration::from_secs(1),
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self {
            min_interval: Duration::from_millis(millis),
        }
    }

    pub fn disabled() -> Self {
        Self {
            min_interval: Duration::ZERO,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::courtesy()
    }
}

/// Enforces a minimum spacing between calls by sleeping before each one.
///
/// Every component that talks to a remote service owns its own limiter, so
/// the clocks are independent and nothing is shared process-wide.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            last_request: Mutex::new(None),
        }
    }

    /// Waits until the spacing since the previous call has elapsed and stamps
    /// the current call. The lock is held across the sleep so overlapping
    /// callers queue up behind each other.
    pub async fn acquire_permit(&self) -> RateLimitPermit {
        let start_time = Instant::now();
        let mut last_request = self.last_request.lock().await;

        if let Some(previous) = *last_request {
            let elapsed = previous.elapsed();
            if elapsed < self.config.min_interval {
                let wait_time = self.config.min_interval - elapsed;
                tracing::debug!("Courtesy delay, waiting {:?}", wait_time);
                sleep(wait_time).await;
            }
        }

        *last_request = Some(Instant::now());

        RateLimitPermit {
            queue_wait_time: start_time.elapsed(),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.config.min_interval
    }
}

#[derive(Debug)]
pub struct RateLimitPermit {
    pub queue_wait_time: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_permit_is_immediate() {
        let limiter = RateLimiter::new(RateLimitConfig::from_millis(500));
        let permit = limiter.acquire_permit().await;
        assert!(permit.queue_wait_time < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_second_permit_waits_for_spacing() {
        let limiter = RateLimiter::new(RateLimitConfig::from_millis(50));
        limiter.acquire_permit().await;

        let start = Instant::now();
        limiter.acquire_permit().await;
        assert!(start.elapsed() >= Duration::from_millis(45));
    }

    #[tokio::test]
    async fn test_disabled_limiter_never_waits() {
        let limiter = RateLimiter::new(RateLimitConfig::disabled());
        for _ in 0..5 {
            let permit = limiter.acquire_permit().await;
            assert!(permit.queue_wait_time < Duration::from_millis(50));
        }
        assert_eq!(limiter.min_interval(), Duration::ZERO);
    }
}
