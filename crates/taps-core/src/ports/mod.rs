//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod clock;
mod rate_limit;
mod repository;

pub use clock::Clock;
pub use rate_limit::{RateLimitDecision, RateLimiter};
pub use repository::{TapAnalytics, TeamRepository};
