//! Time source port.

use std::time::Instant;

/// Monotonic clock, injectable so window expiry can be driven by tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}
