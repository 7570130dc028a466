pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::query::{QueryUseCase, WarehouseStats};
use crate::application::run::{CrawlConfig, RunKind, RunReport, RunUseCase};
use crate::domain::error::DomainError;
use crate::domain::ports::analyzer::TextAnalyzer;
use crate::domain::ports::filing_repository::{FilingRepository, FilingRow};
use crate::domain::ports::news_repository::{NewsRepository, NewsRow};
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::domain::ports::snapshot_store::SnapshotStore;
use crate::infrastructure::analysis::noop::NoopAnalyzer;
use crate::infrastructure::analysis::openai::OpenAiAnalyzer;
use crate::infrastructure::edgar::resolver::TickerResolver;
use crate::infrastructure::http::throttle::ThrottledFetcher;
use crate::infrastructure::lake::parquet_store::ParquetSnapshotStore;
use crate::infrastructure::sqlite::filing_repo::SqliteFilingRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::news_repo::SqliteNewsRepo;
use rusqlite::Connection;
use std::sync::Arc;

/// Process-level settings, read once at startup. Per-run knobs live in
/// `CrawlConfig` instead.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub lake_dir: String,
    pub user_agent: String,
    pub openai_api_key: Option<String>,
    pub analysis_model: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            db_path: std::env::var("STOCKINTEL_DB").unwrap_or_else(|_| "./stockintel.db".into()),
            lake_dir: std::env::var("STOCKINTEL_LAKE_DIR").unwrap_or_else(|_| "./lake".into()),
            user_agent: std::env::var("STOCKINTEL_USER_AGENT")
                .unwrap_or_else(|_| "stockintel/0.1 (contact: research@example.com)".into()),
            openai_api_key: std::env::var("STOCKINTEL_OPENAI_API_KEY").ok(),
            analysis_model: std::env::var("STOCKINTEL_ANALYSIS_MODEL").ok(),
        }
    }
}

pub struct StockIntel {
    fetcher_override: Option<Arc<dyn PageFetcher>>,
    resolver: Arc<TickerResolver>,
    analyzer: Arc<dyn TextAnalyzer>,
    filings: Arc<dyn FilingRepository>,
    news: Arc<dyn NewsRepository>,
    lake: Arc<dyn SnapshotStore>,
    user_agent: String,
    query_uc: QueryUseCase,
}

impl StockIntel {
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let analyzer: Arc<dyn TextAnalyzer> = match &config.openai_api_key {
            Some(key) if !key.is_empty() => {
                Arc::new(OpenAiAnalyzer::new(key.clone(), config.analysis_model.clone()))
            }
            _ => Arc::new(NoopAnalyzer),
        };
        Self::with_providers(config, None, analyzer)
    }

    /// Wiring entry point that lets tests substitute the outbound seams. A
    /// `None` fetcher means each run builds a throttled HTTP fetcher from its
    /// own config.
    pub fn with_providers(
        config: &AppConfig,
        fetcher: Option<Arc<dyn PageFetcher>>,
        analyzer: Arc<dyn TextAnalyzer>,
    ) -> Result<Self, DomainError> {
        let conn1 = Connection::open(&config.db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn1
            .pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        let conn2 = Connection::open(&config.db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn2
            .pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;

        run_migrations(&conn1)?;

        let filings: Arc<dyn FilingRepository> = Arc::new(SqliteFilingRepo::new(conn1));
        let news: Arc<dyn NewsRepository> = Arc::new(SqliteNewsRepo::new(conn2));
        let lake: Arc<dyn SnapshotStore> = Arc::new(ParquetSnapshotStore::new(&config.lake_dir));

        Ok(Self {
            fetcher_override: fetcher,
            resolver: Arc::new(TickerResolver::new()),
            analyzer,
            filings: filings.clone(),
            news: news.clone(),
            lake,
            user_agent: config.user_agent.clone(),
            query_uc: QueryUseCase::new(filings, news),
        })
    }

    /// One crawl-expand-enrich-persist run. The report is total; inspect
    /// `success` and `errors` rather than a Result.
    pub async fn crawl(&self, kind: RunKind, config: &CrawlConfig) -> RunReport {
        let fetcher: Arc<dyn PageFetcher> = match &self.fetcher_override {
            Some(f) => f.clone(),
            None => Arc::new(ThrottledFetcher::new(
                &self.user_agent,
                config.concurrency,
                config.delay,
            )),
        };
        RunUseCase::new(
            fetcher,
            self.resolver.clone(),
            self.analyzer.clone(),
            self.filings.clone(),
            self.news.clone(),
            self.lake.clone(),
        )
        .execute(kind, config)
        .await
    }

    pub fn filings(&self, ticker: &str, limit: usize) -> Result<Vec<FilingRow>, DomainError> {
        self.query_uc.filings_by_ticker(ticker, limit)
    }

    pub fn news(&self, ticker: &str, limit: usize) -> Result<Vec<NewsRow>, DomainError> {
        self.query_uc.news_by_ticker(ticker, limit)
    }

    pub fn stats(&self) -> Result<WarehouseStats, DomainError> {
        self.query_uc.stats()
    }
}
