//! Client-side request rate limiting
//!
//! Sliding-window limiter applied per origin before any catalog fetch.
//! Time is injected through [`Clock`] so the window logic is testable
//! without sleeping.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Time source for the limiter
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time, used everywhere outside tests
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Default window: at most 10 requests per rolling 60 seconds per key
pub const DEFAULT_MAX_REQUESTS: usize = 10;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Outcome of a limiter check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    /// Denied; retry once this much time has passed
    Limited { retry_after: Duration },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// Sliding-window rate limiter keyed by an arbitrary string (the request
/// origin, in practice the catalog base URL)
pub struct RateLimiter<C: Clock = SystemClock> {
    clock: C,
    max_requests: usize,
    window: Duration,
    history: HashMap<String, Vec<Instant>>,
}

impl RateLimiter<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for RateLimiter<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
            history: HashMap::new(),
        }
    }

    pub fn with_limits(mut self, max_requests: usize, window: Duration) -> Self {
        self.max_requests = max_requests;
        self.window = window;
        self
    }

    /// Record an attempt for `key` and decide whether it may proceed.
    ///
    /// Denied attempts are not recorded, so a client that keeps retrying
    /// does not push its own window further out.
    pub fn check(&mut self, key: &str) -> Decision {
        let now = self.clock.now();
        let entries = self.history.entry(key.to_string()).or_default();
        entries.retain(|t| now.duration_since(*t) < self.window);

        if entries.len() >= self.max_requests {
            // Oldest surviving entry determines when a slot frees up
            let retry_after = entries
                .first()
                .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(self.window);
            return Decision::Limited { retry_after };
        }

        entries.push(now);
        Decision::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock advanced manually by tests, in milliseconds since a fixed epoch
    struct ManualClock {
        epoch: Instant,
        offset_ms: AtomicU64,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                epoch: Instant::now(),
                offset_ms: AtomicU64::new(0),
            }
        }

        fn advance(&self, d: Duration) {
            self.offset_ms
                .fetch_add(d.as_millis() as u64, Ordering::SeqCst);
        }
    }

    impl Clock for &ManualClock {
        fn now(&self) -> Instant {
            self.epoch + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
        }
    }

    #[test]
    fn test_allows_up_to_limit() {
        let clock = ManualClock::new();
        let mut limiter = RateLimiter::with_clock(&clock).with_limits(3, Duration::from_secs(60));
        assert!(limiter.check("api").is_allowed());
        assert!(limiter.check("api").is_allowed());
        assert!(limiter.check("api").is_allowed());
        assert!(!limiter.check("api").is_allowed());
    }

    #[test]
    fn test_window_slides() {
        let clock = ManualClock::new();
        let mut limiter = RateLimiter::with_clock(&clock).with_limits(2, Duration::from_secs(60));
        assert!(limiter.check("api").is_allowed());
        clock.advance(Duration::from_secs(30));
        assert!(limiter.check("api").is_allowed());
        assert!(!limiter.check("api").is_allowed());

        // First entry falls out of the window at t=60s
        clock.advance(Duration::from_secs(31));
        assert!(limiter.check("api").is_allowed());
    }

    #[test]
    fn test_keys_are_independent() {
        let clock = ManualClock::new();
        let mut limiter = RateLimiter::with_clock(&clock).with_limits(1, Duration::from_secs(60));
        assert!(limiter.check("a").is_allowed());
        assert!(!limiter.check("a").is_allowed());
        assert!(limiter.check("b").is_allowed());
    }

    #[test]
    fn test_denied_attempts_do_not_extend_window() {
        let clock = ManualClock::new();
        let mut limiter = RateLimiter::with_clock(&clock).with_limits(1, Duration::from_secs(60));
        assert!(limiter.check("api").is_allowed());
        for _ in 0..5 {
            clock.advance(Duration::from_secs(10));
            assert!(!limiter.check("api").is_allowed());
        }
        // 60s after the single allowed request the slot frees up, despite
        // the denied retries in between.
        clock.advance(Duration::from_secs(11));
        assert!(limiter.check("api").is_allowed());
    }

    #[test]
    fn test_retry_after_reports_remaining_time() {
        let clock = ManualClock::new();
        let mut limiter = RateLimiter::with_clock(&clock).with_limits(1, Duration::from_secs(60));
        assert!(limiter.check("api").is_allowed());
        clock.advance(Duration::from_secs(20));
        match limiter.check("api") {
            Decision::Limited { retry_after } => {
                assert_eq!(retry_after, Duration::from_secs(40));
            }
            Decision::Allowed => panic!("expected limit"),
        }
    }
}
