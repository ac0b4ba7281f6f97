//! Clock adapters for the rate limiter.

mod system;

#[cfg(any(test, feature = "test-helpers"))]
mod mock;

pub use system::SystemClock;

#[cfg(any(test, feature = "test-helpers"))]
pub use mock::MockClock;
