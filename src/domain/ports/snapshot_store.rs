use crate::domain::error::DomainError;
use crate::domain::ports::filing_repository::FilingRow;
use crate::domain::ports::news_repository::NewsRow;
use std::path::PathBuf;

/// Immutable columnar lake. One file per run per kind, named by the run's
/// wall-clock stamp; files are never modified after creation.
pub trait SnapshotStore: Send + Sync {
    fn write_filings(&self, rows: &[FilingRow], stamp: &str) -> Result<PathBuf, DomainError>;

    fn write_news(&self, rows: &[NewsRow], stamp: &str) -> Result<PathBuf, DomainError>;
}
