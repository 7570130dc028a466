use crate::application::crawl_filings::CrawlFilingsUseCase;
use crate::application::crawl_news::CrawlNewsUseCase;
use crate::application::enrich::EnrichStage;
use crate::application::persist::PersistStage;
use crate::domain::entities::candidate::Candidate;
use crate::domain::error::DomainError;
use crate::domain::ports::analyzer::TextAnalyzer;
use crate::domain::ports::filing_repository::FilingRepository;
use crate::domain::ports::news_repository::NewsRepository;
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::domain::ports::snapshot_store::SnapshotStore;
use crate::domain::values::item_budget::ItemBudget;
use crate::infrastructure::edgar::resolver::TickerResolver;
use chrono::Utc;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEFAULT_MAX_ITEMS: usize = 20;
pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_DELAY_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// How many trailing log lines a run report carries.
const LOG_TAIL_CAP: usize = 200;

/// Which crawl workers one invocation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Filings,
    News,
    All,
}

impl RunKind {
    fn wants_filings(&self) -> bool {
        matches!(self, RunKind::Filings | RunKind::All)
    }

    fn wants_news(&self) -> bool {
        matches!(self, RunKind::News | RunKind::All)
    }
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunKind::Filings => write!(f, "filings"),
            RunKind::News => write!(f, "news"),
            RunKind::All => write!(f, "all"),
        }
    }
}

impl FromStr for RunKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "filings" => Ok(RunKind::Filings),
            "news" => Ok(RunKind::News),
            "all" => Ok(RunKind::All),
            _ => Err(format!("Unknown crawl kind: {s}")),
        }
    }
}

/// Per-run knobs, constructed once at run start and passed by reference into
/// every stage that needs them.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub ticker: String,
    pub max_items: usize,
    pub concurrency: usize,
    pub delay: Duration,
    pub timeout: Duration,
}

impl CrawlConfig {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            max_items: DEFAULT_MAX_ITEMS,
            concurrency: DEFAULT_CONCURRENCY,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Bounded in-memory run log. Stages push human-readable lines here as well
/// as to the tracing subscriber; the trailing window ends up in the report.
pub struct RunLog {
    lines: Mutex<VecDeque<String>>,
    cap: usize,
}

impl RunLog {
    pub fn new(cap: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::with_capacity(cap)),
            cap,
        }
    }

    pub fn info(&self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::info!("{msg}");
        self.push(msg);
    }

    pub fn warn(&self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::warn!("{msg}");
        self.push(msg);
    }

    fn push(&self, msg: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == self.cap {
                lines.pop_front();
            }
            lines.push_back(msg);
        }
    }

    pub fn tail(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|l| l.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new(LOG_TAIL_CAP)
    }
}

/// What one invocation reports back. Persistence errors show up in `errors`
/// without flipping `success`; only resolution failures and timeouts do that.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub kind: String,
    pub ticker: String,
    pub success: bool,
    pub cik: Option<String>,
    pub candidates_emitted: usize,
    pub filings_inserted: usize,
    pub news_inserted: usize,
    pub snapshots: Vec<String>,
    pub errors: Vec<String>,
    pub error: Option<String>,
    pub log_tail: Vec<String>,
}

struct RunStats {
    cik: Option<String>,
    emitted: usize,
    filings_inserted: usize,
    news_inserted: usize,
    snapshots: Vec<String>,
    errors: Vec<String>,
}

/// One full crawl-expand-enrich-persist run.
pub struct RunUseCase {
    fetcher: Arc<dyn PageFetcher>,
    resolver: Arc<TickerResolver>,
    analyzer: Arc<dyn TextAnalyzer>,
    filings: Arc<dyn FilingRepository>,
    news: Arc<dyn NewsRepository>,
    lake: Arc<dyn SnapshotStore>,
}

impl RunUseCase {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        resolver: Arc<TickerResolver>,
        analyzer: Arc<dyn TextAnalyzer>,
        filings: Arc<dyn FilingRepository>,
        news: Arc<dyn NewsRepository>,
        lake: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            fetcher,
            resolver,
            analyzer,
            filings,
            news,
            lake,
        }
    }

    pub async fn execute(&self, kind: RunKind, config: &CrawlConfig) -> RunReport {
        let run_id = uuid::Uuid::new_v4().to_string();
        let log = RunLog::default();
        log.info(format!(
            "run {run_id}: kind={kind} ticker={} max_items={}",
            config.ticker, config.max_items
        ));

        let outcome = tokio::time::timeout(config.timeout, self.run_inner(kind, config, &log)).await;

        let (success, stats, error) = match outcome {
            Ok(Ok(stats)) => (true, Some(stats), None),
            Ok(Err(e)) => {
                log.warn(format!("run failed: {e}"));
                (false, None, Some(e.to_string()))
            }
            Err(_) => {
                let e = DomainError::Timeout(config.timeout.as_secs());
                log.warn(format!("{e}; keeping whatever was already persisted"));
                (false, None, Some(e.to_string()))
            }
        };

        let stats = stats.unwrap_or(RunStats {
            cik: None,
            emitted: 0,
            filings_inserted: 0,
            news_inserted: 0,
            snapshots: Vec::new(),
            errors: Vec::new(),
        });

        RunReport {
            run_id,
            kind: kind.to_string(),
            ticker: config.ticker.to_uppercase(),
            success,
            cik: stats.cik,
            candidates_emitted: stats.emitted,
            filings_inserted: stats.filings_inserted,
            news_inserted: stats.news_inserted,
            snapshots: stats.snapshots,
            errors: stats.errors,
            error,
            log_tail: log.tail(),
        }
    }

    async fn run_inner(
        &self,
        kind: RunKind,
        config: &CrawlConfig,
        log: &RunLog,
    ) -> Result<RunStats, DomainError> {
        // Ticker resolution only gates the filing source; the news feed is
        // addressed by ticker symbol directly.
        let cik = if kind.wants_filings() {
            let cik = self
                .resolver
                .resolve(self.fetcher.as_ref(), &config.ticker)
                .await?;
            log.info(format!("resolved {} to CIK {}", config.ticker, cik));
            Some(cik)
        } else {
            None
        };

        let budget = ItemBudget::new(config.max_items);
        let filing_crawler = CrawlFilingsUseCase::new(self.fetcher.clone());
        let news_crawler = CrawlNewsUseCase::new(self.fetcher.clone());

        let mut candidates: Vec<Candidate> = match &cik {
            Some(cik) if kind.wants_news() => {
                // No defined relative ordering between the two workers; they
                // share the budget and the fetcher's pacing.
                let (mut filings, news) = tokio::join!(
                    filing_crawler.execute(&config.ticker, cik, &budget, log),
                    news_crawler.execute(&config.ticker, &budget, log),
                );
                filings.extend(news);
                filings
            }
            Some(cik) => filing_crawler.execute(&config.ticker, cik, &budget, log).await,
            None => news_crawler.execute(&config.ticker, &budget, log).await,
        };
        log.info(format!("{} candidates emitted", candidates.len()));

        let enrich = EnrichStage::new(self.analyzer.clone());
        enrich.enrich_all(&mut candidates, log).await;

        let stamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let persist = PersistStage::new(self.filings.clone(), self.news.clone(), self.lake.clone());
        let persisted = persist.persist(&candidates, &stamp, log);

        Ok(RunStats {
            cik: cik.map(|c| c.padded().to_string()),
            emitted: candidates.len(),
            filings_inserted: persisted.filings_inserted,
            news_inserted: persisted.news_inserted,
            snapshots: persisted
                .snapshots
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            errors: persisted.errors,
        })
    }
}
