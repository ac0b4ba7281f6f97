use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag entity - a physical tag owned by a team. Taps reference tags by uid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub tag_uid: i64,
    pub team_id: i32,
    pub created_at: DateTime<Utc>,
}
