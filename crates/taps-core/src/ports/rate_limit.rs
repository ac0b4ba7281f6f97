//! Rate limiting port.

use std::time::Duration;

use async_trait::async_trait;

/// Rate limiter trait - abstraction over rate limiting backends.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count one request for `key` against `limit` and decide whether it may proceed.
    ///
    /// The request is counted even when it is denied.
    async fn check(&self, key: &str, limit: u32) -> RateLimitDecision;

    /// Number of keys currently tracked, expired entries included until purged.
    async fn tracked_keys(&self) -> usize;
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub retry_after: Duration,
}

impl RateLimitDecision {
    /// Build a decision from the usage recorded after this request.
    pub fn from_usage(usage: u64, limit: u32, retry_after: Duration) -> Self {
        let limit = limit.max(1);
        let allowed = usage < u64::from(limit);
        let remaining = if allowed {
            // usage < limit, so the difference fits in u32
            (u64::from(limit) - usage) as u32
        } else {
            0
        };

        Self {
            allowed,
            limit,
            remaining,
            retry_after,
        }
    }

    /// `Retry-After` value in whole seconds.
    pub fn retry_after_secs(&self) -> u64 {
        self.retry_after.as_secs_f64().round() as u64
    }
}
