//! # Taps Importer
//!
//! Loads teams, tags and taps from CSV files into Postgres. Files are
//! imported in dependency order and rows that already exist are skipped, so
//! re-running an import is safe.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use taps_infra::database::{self, DatabaseConfig};
use taps_infra::{CsvImporter, ImportStats};

#[derive(Parser, Debug)]
#[command(name = "taps-importer")]
#[command(about = "Bulk import of teams, tags and taps from CSV")]
struct Args {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// CSV with `id,name[,token]` rows
    #[arg(long)]
    teams: Option<PathBuf>,

    /// CSV with `tagUid,teamId,created_at` rows
    #[arg(long)]
    tags: Option<PathBuf>,

    /// CSV with `tagUid,count,createdAt` rows
    #[arg(long)]
    taps: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,taps_infra=debug")),
        )
        .init();

    let args = Args::parse();
    if args.teams.is_none() && args.tags.is_none() && args.taps.is_none() {
        anyhow::bail!("nothing to import: pass at least one of --teams, --tags, --taps");
    }

    let db = database::connect(&DatabaseConfig::new(args.database_url.clone()))
        .await
        .context("connecting to database")?;
    let importer = CsvImporter::new(db);

    let mut total = ImportStats::default();

    if let Some(path) = &args.teams {
        let stats = importer.import_teams(open(path)?).await.with_context(|| path_context(path))?;
        accumulate(&mut total, stats);
    }
    if let Some(path) = &args.tags {
        let stats = importer.import_tags(open(path)?).await.with_context(|| path_context(path))?;
        accumulate(&mut total, stats);
    }
    if let Some(path) = &args.taps {
        let stats = importer.import_taps(open(path)?).await.with_context(|| path_context(path))?;
        accumulate(&mut total, stats);
    }

    tracing::info!(
        inserted = total.inserted,
        skipped = total.skipped,
        "Import finished"
    );
    Ok(())
}

fn open(path: &Path) -> anyhow::Result<File> {
    File::open(path).with_context(|| format!("opening {}", path.display()))
}

fn path_context(path: &Path) -> String {
    format!("importing {}", path.display())
}

fn accumulate(total: &mut ImportStats, stats: ImportStats) {
    total.inserted += stats.inserted;
    total.skipped += stats.skipped;
}
