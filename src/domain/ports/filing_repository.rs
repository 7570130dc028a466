use crate::domain::error::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed-width warehouse row for a filing. Every column exists in every row;
/// reconciliation fills defaults before a row reaches the repository, the
/// store infers nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingRow {
    pub cik: String,
    pub ticker: String,
    pub company_name: String,
    pub form: String,
    pub filing_date: Option<NaiveDate>,
    pub accession_no: String,
    pub primary_doc: String,
    pub report_url: String,
    pub report_text: String,
    pub summary_ai: String,
    pub sentiment: String,
    pub sentiment_score: f64,
}

pub trait FilingRepository: Send + Sync {
    /// Append the batch in a single transaction: all rows land or none do.
    fn insert_batch(&self, rows: &[FilingRow]) -> Result<usize, DomainError>;

    /// Rows for one ticker, newest filing first.
    fn query_by_ticker(&self, ticker: &str, limit: usize) -> Result<Vec<FilingRow>, DomainError>;

    fn count(&self) -> Result<usize, DomainError>;
}
