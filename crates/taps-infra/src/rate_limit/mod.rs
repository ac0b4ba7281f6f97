//! Rate limiting implementations.

mod memory;

pub use memory::{DEFAULT_CAPACITY, DEFAULT_WINDOW, InMemoryRateLimiter, RateLimitConfig};
