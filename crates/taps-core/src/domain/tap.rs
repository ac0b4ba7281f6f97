use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tap entity - a single recorded event against a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tap {
    pub tag_uid: i64,
    /// Raw counter reported with the event. Aggregation counts rows, not this value.
    pub count: i32,
    pub created_at: DateTime<Utc>,
}
