//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ColumnTrait, DbBackend, DbConn, DbErr, EntityTrait, FromQueryResult, QueryFilter, Statement,
};

use taps_core::domain::{DateRange, Interval, Team, TimeBucketCount, mask_token};
use taps_core::error::RepoError;
use taps_core::ports::{TapAnalytics, TeamRepository};

use super::entity::team::{self, Entity as TeamEntity};

/// Taps on the team's tags, truncated to the bucket in UTC and counted.
pub(super) const COUNT_TAPS_SQL: &str = r#"
SELECT
    DATE_TRUNC($1, created_at, 'UTC') AS time_period,
    COUNT(*) AS count
FROM taps
WHERE
    tag_uid IN (SELECT tag_uid FROM tags WHERE team_id = $2)
    AND created_at BETWEEN $3 AND $4
GROUP BY time_period
ORDER BY time_period
"#;

fn repo_error(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

/// PostgreSQL team repository.
pub struct PostgresTeamRepository {
    db: DbConn,
}

impl PostgresTeamRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<Team>, RepoError> {
        tracing::debug!(token = %mask_token(token), "Finding team by token");

        let result = TeamEntity::find()
            .filter(team::Column::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }
}

#[derive(Debug, FromQueryResult)]
struct BucketRow {
    time_period: DateTimeWithTimeZone,
    count: i64,
}

/// PostgreSQL tap aggregation.
pub struct PostgresTapAnalytics {
    db: DbConn,
}

impl PostgresTapAnalytics {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    #[cfg(test)]
    pub(super) fn into_inner(self) -> DbConn {
        self.db
    }
}

#[async_trait]
impl TapAnalytics for PostgresTapAnalytics {
    async fn count_taps(
        &self,
        team_id: i32,
        interval: Interval,
        range: DateRange,
    ) -> Result<Vec<TimeBucketCount>, RepoError> {
        let statement = Statement::from_sql_and_values(
            DbBackend::Postgres,
            COUNT_TAPS_SQL,
            [
                interval.as_str().into(),
                team_id.into(),
                range.start.into(),
                range.end.into(),
            ],
        );

        let rows = BucketRow::find_by_statement(statement)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        tracing::debug!(team_id, %interval, buckets = rows.len(), "Aggregated taps");

        Ok(rows
            .into_iter()
            .map(|row| TimeBucketCount {
                bucket_start: row.time_period.into(),
                count: row.count,
            })
            .collect())
    }
}
