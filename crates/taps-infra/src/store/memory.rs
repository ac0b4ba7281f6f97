//! In-memory team/tag/tap store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use taps_core::domain::{DateRange, Interval, Tag, Tap, Team, TimeBucketCount};
use taps_core::error::RepoError;
use taps_core::ports::{TapAnalytics, TeamRepository};

#[derive(Default)]
struct StoreData {
    teams: HashMap<i32, Team>,
    tags: HashMap<i64, Tag>,
    taps: Vec<Tap>,
}

/// In-memory store implementing both the identity and event ports.
///
/// Bucketing follows the same rules as the Postgres query.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryTapStore {
    data: RwLock<StoreData>,
}

impl InMemoryTapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a team unless one with the same id exists. Returns whether it was inserted.
    pub async fn add_team(&self, team: Team) -> bool {
        let mut data = self.data.write().await;
        if data.teams.contains_key(&team.id) {
            return false;
        }
        data.teams.insert(team.id, team);
        true
    }

    /// Insert a tag unless one with the same uid exists.
    pub async fn add_tag(&self, tag: Tag) -> bool {
        let mut data = self.data.write().await;
        if data.tags.contains_key(&tag.tag_uid) {
            return false;
        }
        data.tags.insert(tag.tag_uid, tag);
        true
    }

    /// Insert a tap unless one exists for the same tag at the same instant.
    pub async fn add_tap(&self, tap: Tap) -> bool {
        let mut data = self.data.write().await;
        let duplicate = data
            .taps
            .iter()
            .any(|t| t.tag_uid == tap.tag_uid && t.created_at == tap.created_at);
        if duplicate {
            return false;
        }
        data.taps.push(tap);
        true
    }
}

#[async_trait]
impl TeamRepository for InMemoryTapStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<Team>, RepoError> {
        let data = self.data.read().await;
        Ok(data.teams.values().find(|t| t.token == token).cloned())
    }
}

#[async_trait]
impl TapAnalytics for InMemoryTapStore {
    async fn count_taps(
        &self,
        team_id: i32,
        interval: Interval,
        range: DateRange,
    ) -> Result<Vec<TimeBucketCount>, RepoError> {
        let data = self.data.read().await;

        // BTreeMap keeps buckets in ascending order
        let mut buckets = BTreeMap::new();
        for tap in &data.taps {
            let owned = data
                .tags
                .get(&tap.tag_uid)
                .is_some_and(|tag| tag.team_id == team_id);
            if owned && range.contains(tap.created_at) {
                *buckets.entry(interval.truncate(tap.created_at)).or_insert(0i64) += 1;
            }
        }

        Ok(buckets
            .into_iter()
            .map(|(bucket_start, count)| TimeBucketCount {
                bucket_start,
                count,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    async fn seeded() -> InMemoryTapStore {
        let store = InMemoryTapStore::new();
        store.add_team(Team::new(1, "Alpha", "alpha-token")).await;
        store.add_team(Team::new(2, "Beta", "beta-token")).await;
        for (tag_uid, team_id) in [(10, 1), (11, 1), (20, 2)] {
            store
                .add_tag(Tag {
                    tag_uid,
                    team_id,
                    created_at: at("2023-12-01T00:00:00Z"),
                })
                .await;
        }
        for (tag_uid, ts) in [
            (10, "2024-01-01T05:00:00Z"),
            (11, "2024-01-01T23:00:00Z"),
            (10, "2024-01-02T01:00:00Z"),
            (20, "2024-01-01T06:00:00Z"),
            (10, "2024-02-01T00:00:00Z"),
        ] {
            store
                .add_tap(Tap {
                    tag_uid,
                    count: 1,
                    created_at: at(ts),
                })
                .await;
        }
        store
    }

    #[tokio::test]
    async fn test_find_by_token() {
        let store = seeded().await;

        let team = store.find_by_token("beta-token").await.unwrap();
        assert_eq!(team.map(|t| t.id), Some(2));
        assert!(store.find_by_token("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_counts_per_day_for_owned_tags_only() {
        let store = seeded().await;
        let range = DateRange::new(at("2024-01-01T00:00:00Z"), at("2024-01-31T00:00:00Z"));

        let rows = store.count_taps(1, Interval::Day, range).await.unwrap();

        assert_eq!(
            rows,
            vec![
                TimeBucketCount {
                    bucket_start: at("2024-01-01T00:00:00Z"),
                    count: 2
                },
                TimeBucketCount {
                    bucket_start: at("2024-01-02T00:00:00Z"),
                    count: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_range_is_inclusive_and_empty_buckets_omitted() {
        let store = seeded().await;
        let range = DateRange::new(at("2024-01-02T01:00:00Z"), at("2024-02-01T00:00:00Z"));

        let rows = store.count_taps(1, Interval::Month, range).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bucket_start, at("2024-01-01T00:00:00Z"));
        assert_eq!(rows[1].bucket_start, at("2024-02-01T00:00:00Z"));
        assert!(rows.iter().all(|r| r.count == 1));
    }

    #[tokio::test]
    async fn test_duplicates_are_skipped() {
        let store = seeded().await;

        assert!(!store.add_team(Team::new(1, "Again", "other")).await);
        assert!(
            !store
                .add_tap(Tap {
                    tag_uid: 10,
                    count: 7,
                    created_at: at("2024-01-01T05:00:00Z"),
                })
                .await
        );
    }
}
