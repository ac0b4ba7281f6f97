//! Domain entities - the core business objects.

mod analytics;
mod interval;
mod tag;
mod tap;
mod team;

pub use analytics::{DateRange, TimeBucketCount, parse_instant};
pub use interval::Interval;
pub use tag::Tag;
pub use tap::Tap;
pub use team::{Team, mask_token};
