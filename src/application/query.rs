use crate::domain::error::DomainError;
use crate::domain::ports::filing_repository::{FilingRepository, FilingRow};
use crate::domain::ports::news_repository::{NewsRepository, NewsRow};
use serde::Serialize;
use std::sync::Arc;

/// Row counts per warehouse table.
#[derive(Debug, Serialize)]
pub struct WarehouseStats {
    pub filings: usize,
    pub news: usize,
}

/// Read-side access over the warehouse. Never touches the network or the
/// snapshot lake.
pub struct QueryUseCase {
    filings: Arc<dyn FilingRepository>,
    news: Arc<dyn NewsRepository>,
}

impl QueryUseCase {
    pub fn new(filings: Arc<dyn FilingRepository>, news: Arc<dyn NewsRepository>) -> Self {
        Self { filings, news }
    }

    pub fn filings_by_ticker(
        &self,
        ticker: &str,
        limit: usize,
    ) -> Result<Vec<FilingRow>, DomainError> {
        self.filings.query_by_ticker(ticker, limit)
    }

    pub fn news_by_ticker(&self, ticker: &str, limit: usize) -> Result<Vec<NewsRow>, DomainError> {
        self.news.query_by_ticker(ticker, limit)
    }

    pub fn stats(&self) -> Result<WarehouseStats, DomainError> {
        Ok(WarehouseStats {
            filings: self.filings.count()?,
            news: self.news.count()?,
        })
    }
}
