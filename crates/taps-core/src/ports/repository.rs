use async_trait::async_trait;

use crate::domain::{DateRange, Interval, Team, TimeBucketCount};
use crate::error::RepoError;

/// Identity store - resolves API tokens to teams.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Find the team owning `token`.
    async fn find_by_token(&self, token: &str) -> Result<Option<Team>, RepoError>;
}

/// Event store - bucketed tap counts.
#[async_trait]
pub trait TapAnalytics: Send + Sync {
    /// Count taps on tags owned by `team_id` inside `range`, one row per
    /// non-empty `interval` bucket, ascending by bucket start.
    async fn count_taps(
        &self,
        team_id: i32,
        interval: Interval,
        range: DateRange,
    ) -> Result<Vec<TimeBucketCount>, RepoError>;
}
