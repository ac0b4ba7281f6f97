//! Idempotent inserts of CSV rows.

use std::io::Read;

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter};

use crate::database::entity::{tag, tap, team};

use super::ImportError;
use super::records::{TagRecord, TapRecord, TeamRecord, read_records};

/// Outcome of importing one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub inserted: usize,
    pub skipped: usize,
}

/// Imports teams, tags and taps from CSV into Postgres.
pub struct CsvImporter {
    db: DbConn,
}

impl CsvImporter {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Import `id,name[,token]` rows, keyed by team id.
    pub async fn import_teams<R: Read>(&self, reader: R) -> Result<ImportStats, ImportError> {
        let mut stats = ImportStats::default();

        for (_, record) in read_records::<TeamRecord, _>(reader)? {
            if team::Entity::find_by_id(record.id)
                .one(&self.db)
                .await?
                .is_some()
            {
                stats.skipped += 1;
                continue;
            }

            team::ActiveModel::from(record.into_team())
                .insert(&self.db)
                .await?;
            stats.inserted += 1;
        }

        tracing::info!(inserted = stats.inserted, skipped = stats.skipped, "Teams imported");
        Ok(stats)
    }

    /// Import `tagUid,teamId,created_at` rows, keyed by tag uid.
    pub async fn import_tags<R: Read>(&self, reader: R) -> Result<ImportStats, ImportError> {
        let mut stats = ImportStats::default();

        for (line, record) in read_records::<TagRecord, _>(reader)? {
            let tag = record.into_tag(line)?;

            if tag::Entity::find_by_id(tag.tag_uid)
                .one(&self.db)
                .await?
                .is_some()
            {
                stats.skipped += 1;
                continue;
            }

            tag::ActiveModel::from(tag).insert(&self.db).await?;
            stats.inserted += 1;
        }

        tracing::info!(inserted = stats.inserted, skipped = stats.skipped, "Tags imported");
        Ok(stats)
    }

    /// Import `tagUid,count,createdAt` rows, keyed by (tag uid, timestamp).
    pub async fn import_taps<R: Read>(&self, reader: R) -> Result<ImportStats, ImportError> {
        let mut stats = ImportStats::default();

        for (line, record) in read_records::<TapRecord, _>(reader)? {
            let tap = record.into_tap(line)?;
            let created_at: DateTimeWithTimeZone = tap.created_at.into();

            let existing = tap::Entity::find()
                .filter(tap::Column::TagUid.eq(tap.tag_uid))
                .filter(tap::Column::CreatedAt.eq(created_at))
                .one(&self.db)
                .await?;
            if existing.is_some() {
                stats.skipped += 1;
                continue;
            }

            tap::ActiveModel::from(tap).insert(&self.db).await?;
            stats.inserted += 1;
        }

        tracing::info!(inserted = stats.inserted, skipped = stats.skipped, "Taps imported");
        Ok(stats)
    }
}
