//! In-memory rate limiter backed by an LRU map of fixed-window counters.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use taps_core::domain::mask_token;
use taps_core::ports::{Clock, RateLimitDecision, RateLimiter};

use crate::clock::SystemClock;

/// Default number of distinct keys tracked at once.
pub const DEFAULT_CAPACITY: usize = 100;

/// Default counter lifetime.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60 * 60);

/// In-memory rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum distinct keys tracked simultaneously.
    pub capacity: usize,
    /// Lifetime of a key's counter, measured from its first request.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            window: DEFAULT_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CounterEntry {
    count: u64,
    window_start: Instant,
}

impl CounterEntry {
    fn new(now: Instant) -> Self {
        Self {
            count: 0,
            window_start: now,
        }
    }

    fn is_expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) >= window
    }
}

/// Per-key request counter with a fixed window from first touch.
///
/// At most `capacity` keys are tracked; inserting a new key into a full map
/// evicts the least recently used one. Limits are per-process.
pub struct InMemoryRateLimiter<C = SystemClock> {
    entries: Mutex<LruCache<String, CounterEntry>>,
    window: Duration,
    clock: C,
}

impl InMemoryRateLimiter<SystemClock> {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> InMemoryRateLimiter<C> {
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        let capacity = NonZeroUsize::new(config.capacity).unwrap_or_else(|| {
            tracing::warn!(
                default = DEFAULT_CAPACITY,
                "Rate limiter capacity of 0 requested, using default"
            );
            NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN)
        });

        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            window: config.window,
            clock,
        }
    }

    /// Remove entries whose window has elapsed. Returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;

        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, self.window))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            entries.pop(key);
        }

        if !expired.is_empty() {
            tracing::debug!(
                purged = expired.len(),
                remaining = entries.len(),
                "Purged expired rate limit entries"
            );
        }

        expired.len()
    }

    /// Record one request for `key` and return the usage including it.
    ///
    /// Lookup, increment and eviction happen under a single lock acquisition
    /// with no await point in between.
    async fn record(&self, key: &str) -> u64 {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;

        // get_mut promotes the key to most recently used
        match entries.get_mut(key) {
            Some(entry) => {
                if entry.is_expired(now, self.window) {
                    *entry = CounterEntry::new(now);
                }
                entry.count = entry.count.saturating_add(1);
                entry.count
            }
            None => {
                let mut entry = CounterEntry::new(now);
                entry.count = 1;
                if let Some((evicted, _)) = entries.push(key.to_string(), entry) {
                    tracing::trace!(
                        evicted = %mask_token(&evicted),
                        "Rate limiter full, evicted least recently used key"
                    );
                }
                1
            }
        }
    }
}

#[async_trait]
impl<C: Clock + 'static> RateLimiter for InMemoryRateLimiter<C> {
    async fn check(&self, key: &str, limit: u32) -> RateLimitDecision {
        let usage = self.record(key).await;
        let decision = RateLimitDecision::from_usage(usage, limit, self.window);

        if !decision.allowed {
            tracing::warn!(
                key = %mask_token(key),
                usage,
                limit = decision.limit,
                "Rate limit exceeded"
            );
        }

        decision
    }

    async fn tracked_keys(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::MockClock;

    const WINDOW: Duration = Duration::from_secs(3600);

    fn limiter(capacity: usize) -> (InMemoryRateLimiter<MockClock>, MockClock) {
        let clock = MockClock::new();
        let config = RateLimitConfig {
            capacity,
            window: WINDOW,
        };
        (InMemoryRateLimiter::with_clock(config, clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_allows_below_limit_with_decreasing_remaining() {
        let (limiter, _) = limiter(10);

        for n in 1..5 {
            let decision = limiter.check("abc", 5).await;
            assert!(decision.allowed, "call {n} should be allowed");
            assert_eq!(decision.remaining, 5 - n);
            assert_eq!(decision.limit, 5);
        }
    }

    #[tokio::test]
    async fn test_denies_from_the_call_that_reaches_limit() {
        let (limiter, _) = limiter(10);

        let first = limiter.check("abc", 3).await;
        let second = limiter.check("abc", 3).await;
        assert!(first.allowed && second.allowed);
        assert_eq!((first.remaining, second.remaining), (2, 1));

        for _ in 0..3 {
            let decision = limiter.check("abc", 3).await;
            assert!(!decision.allowed);
            assert_eq!(decision.remaining, 0);
            assert_eq!(decision.retry_after_secs(), 3600);
        }
    }

    #[tokio::test]
    async fn test_denied_calls_keep_counting() {
        let (limiter, _) = limiter(10);

        for _ in 0..4 {
            limiter.check("abc", 2).await;
        }

        // Raising the limit shows the denied calls were still recorded
        let decision = limiter.check("abc", 10).await;
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 5);
    }

    #[tokio::test]
    async fn test_window_is_fixed_from_first_touch() {
        let (limiter, clock) = limiter(10);

        limiter.check("abc", 3).await;
        clock.advance(WINDOW - Duration::from_secs(1));
        let late = limiter.check("abc", 3).await;
        assert_eq!(late.remaining, 1);

        // Hits inside the window did not extend it
        clock.advance(Duration::from_secs(1));
        let fresh = limiter.check("abc", 3).await;
        assert!(fresh.allowed);
        assert_eq!(fresh.remaining, 2);
    }

    #[tokio::test]
    async fn test_expired_key_behaves_as_new_even_after_denial() {
        let (limiter, clock) = limiter(10);

        for _ in 0..5 {
            limiter.check("abc", 3).await;
        }
        assert!(!limiter.check("abc", 3).await.allowed);

        clock.advance(WINDOW);

        let decision = limiter.check("abc", 3).await;
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 2);
    }

    #[tokio::test]
    async fn test_evicts_least_recently_used_key_at_capacity() {
        let (limiter, _) = limiter(2);

        limiter.check("a", 10).await;
        limiter.check("a", 10).await;
        limiter.check("b", 10).await;
        // Touch "a" so "b" becomes least recently used
        limiter.check("a", 10).await;

        limiter.check("c", 10).await;
        assert_eq!(limiter.tracked_keys().await, 2);

        // "a" kept its count, "b" starts over
        assert_eq!(limiter.check("a", 10).await.remaining, 6);
        assert_eq!(limiter.check("b", 10).await.remaining, 9);
    }

    #[tokio::test]
    async fn test_capacity_is_never_exceeded() {
        let (limiter, _) = limiter(5);

        for i in 0..50 {
            limiter.check(&format!("key-{i}"), 10).await;
            assert!(limiter.tracked_keys().await <= 5);
        }
    }

    #[tokio::test]
    async fn test_purge_expired_removes_only_stale_entries() {
        let (limiter, clock) = limiter(10);

        limiter.check("old", 10).await;
        clock.advance(Duration::from_secs(1800));
        limiter.check("new", 10).await;
        clock.advance(Duration::from_secs(1800));

        assert_eq!(limiter.purge_expired().await, 1);
        assert_eq!(limiter.tracked_keys().await, 1);
        assert_eq!(limiter.check("new", 10).await.remaining, 8);
    }

    #[tokio::test]
    async fn test_zero_capacity_falls_back_to_default() {
        let (limiter, _) = limiter(0);

        for i in 0..DEFAULT_CAPACITY + 10 {
            limiter.check(&format!("key-{i}"), 10).await;
        }

        assert_eq!(limiter.tracked_keys().await, DEFAULT_CAPACITY);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_checks_on_same_key_never_over_admit() {
        let (limiter, _) = limiter(10);
        let limiter = Arc::new(limiter);

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move { limiter.check("shared", 10).await.allowed })
            })
            .collect();

        let mut allowed = 0;
        for handle in handles {
            if handle.await.unwrap() {
                allowed += 1;
            }
        }

        assert_eq!(allowed, 9);
    }
}
