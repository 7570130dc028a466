use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed-width warehouse row for a news item. published is the only nullable
/// column; a missing feed timestamp is recorded as unknown, never invented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsRow {
    pub ticker: String,
    pub source: String,
    pub title: String,
    pub link: String,
    pub published: Option<DateTime<Utc>>,
    pub summary: String,
    pub article_text: String,
    pub summary_ai: String,
    pub sentiment: String,
    pub sentiment_score: f64,
}

pub trait NewsRepository: Send + Sync {
    /// Append the batch in a single transaction: all rows land or none do.
    fn insert_batch(&self, rows: &[NewsRow]) -> Result<usize, DomainError>;

    /// Rows for one ticker, newest published first; rows with unknown
    /// publish time sort last.
    fn query_by_ticker(&self, ticker: &str, limit: usize) -> Result<Vec<NewsRow>, DomainError>;

    fn count(&self) -> Result<usize, DomainError>;
}
