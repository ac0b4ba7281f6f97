//! # Taps Infrastructure
//!
//! Concrete implementations of the ports defined in `taps-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `import` - CSV bulk import into PostgreSQL
//! - `test-helpers` - Exposes `MockClock` for driving rate limit windows in tests

pub mod clock;
pub mod database;
pub mod rate_limit;
pub mod store;

#[cfg(feature = "import")]
pub mod import;

// Re-exports - In-Memory
pub use clock::SystemClock;
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
pub use store::InMemoryTapStore;

pub use database::DatabaseConfig;

// Re-exports - Postgres
#[cfg(feature = "postgres")]
pub use database::{PostgresTapAnalytics, PostgresTeamRepository};

#[cfg(feature = "import")]
pub use import::{CsvImporter, ImportError, ImportStats};
