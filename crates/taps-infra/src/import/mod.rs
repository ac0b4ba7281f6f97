//! CSV bulk import into the Postgres store.
//!
//! Files are imported teams, then tags, then taps. Each row is inserted only
//! if no row with the same natural key exists, so re-running an import is safe.

mod importer;
mod records;

pub use importer::{CsvImporter, ImportStats};
pub use records::{TagRecord, TapRecord, TeamRecord, read_records};

/// Import failures.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}
