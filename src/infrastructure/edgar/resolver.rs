use crate::domain::error::DomainError;
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::domain::values::cik::Cik;
use crate::infrastructure::edgar::TICKER_TABLE_URL;
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::OnceCell;

#[derive(Debug, Deserialize)]
struct TickerEntry {
    cik_str: u64,
    ticker: String,
}

/// Parse the SEC company_tickers.json reference table into an
/// uppercase-ticker lookup map.
pub fn parse_ticker_table(json: &str) -> Result<HashMap<String, u64>, DomainError> {
    let entries: HashMap<String, TickerEntry> = serde_json::from_str(json)
        .map_err(|e| DomainError::Resolution(format!("ticker table parse failed: {e}")))?;
    Ok(entries
        .into_values()
        .map(|e| (e.ticker.to_uppercase(), e.cik_str))
        .collect())
}

/// Maps a ticker symbol to its CIK via the SEC reference table. The table is
/// fetched once and cached for the life of the resolver; a fetch failure is
/// fatal for the run and is not retried here.
pub struct TickerResolver {
    table: OnceCell<HashMap<String, u64>>,
}

impl TickerResolver {
    pub fn new() -> Self {
        Self {
            table: OnceCell::new(),
        }
    }

    pub async fn resolve(
        &self,
        fetcher: &dyn PageFetcher,
        ticker: &str,
    ) -> Result<Cik, DomainError> {
        let symbol = ticker.trim().to_uppercase();
        if symbol.is_empty() || symbol.len() > 10 {
            return Err(DomainError::Resolution(format!(
                "Invalid ticker symbol: {ticker:?}"
            )));
        }

        let table = self
            .table
            .get_or_try_init(|| async {
                let body = fetcher.fetch(TICKER_TABLE_URL).await.map_err(|e| {
                    DomainError::Resolution(format!("ticker table fetch failed: {e}"))
                })?;
                parse_ticker_table(&body)
            })
            .await?;

        table
            .get(&symbol)
            .map(|&cik| Cik::new(cik))
            .ok_or_else(|| DomainError::Resolution(format!("Ticker {symbol} not found in SEC table")))
    }
}

impl Default for TickerResolver {
    fn default() -> Self {
        Self::new()
    }
}
