use crate::application::run::RunLog;
use crate::domain::entities::candidate::Candidate;
use crate::domain::entities::enrichment::Enrichment;
use crate::domain::entities::filing::FilingCandidate;
use crate::domain::entities::news::NewsCandidate;
use crate::domain::ports::filing_repository::{FilingRepository, FilingRow};
use crate::domain::ports::news_repository::{NewsRepository, NewsRow};
use crate::domain::ports::snapshot_store::SnapshotStore;
use std::path::PathBuf;
use std::sync::Arc;

/// What the persist stage actually landed. Sink errors are collected here,
/// never raised; one sink failing does not stop the others.
#[derive(Debug, Default)]
pub struct PersistReport {
    pub filings_inserted: usize,
    pub news_inserted: usize,
    pub snapshots: Vec<PathBuf>,
    pub errors: Vec<String>,
}

/// Reconcile a filing candidate to the fixed warehouse shape. An absent
/// enrichment is written as the skip defaults, so the row is total either way.
pub fn reconcile_filing(c: &FilingCandidate) -> FilingRow {
    let e = c.enrichment.clone().unwrap_or_else(Enrichment::skipped);
    FilingRow {
        cik: c.cik.padded().to_string(),
        ticker: c.ticker.clone(),
        company_name: c.company_name.clone(),
        form: c.form.as_label().to_string(),
        filing_date: c.filing_date,
        accession_no: c.accession_no.clone(),
        primary_doc: c.primary_doc.clone(),
        report_url: c.report_url.clone(),
        report_text: c.report_text.clone(),
        summary_ai: e.summary,
        sentiment: e.sentiment.to_string(),
        sentiment_score: e.sentiment_score,
    }
}

pub fn reconcile_news(c: &NewsCandidate) -> NewsRow {
    let e = c.enrichment.clone().unwrap_or_else(Enrichment::skipped);
    NewsRow {
        ticker: c.ticker.clone(),
        source: c.source.clone(),
        title: c.title.clone(),
        link: c.link.clone(),
        published: c.published,
        summary: c.summary.clone(),
        article_text: c.article_text.clone(),
        summary_ai: e.summary,
        sentiment: e.sentiment.to_string(),
        sentiment_score: e.sentiment_score,
    }
}

/// Dual-sink persistence: each candidate kind goes to its warehouse table and
/// to one immutable snapshot file per kind per run.
pub struct PersistStage {
    filings: Arc<dyn FilingRepository>,
    news: Arc<dyn NewsRepository>,
    lake: Arc<dyn SnapshotStore>,
}

impl PersistStage {
    pub fn new(
        filings: Arc<dyn FilingRepository>,
        news: Arc<dyn NewsRepository>,
        lake: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            filings,
            news,
            lake,
        }
    }

    pub fn persist(&self, candidates: &[Candidate], stamp: &str, log: &RunLog) -> PersistReport {
        let mut filing_rows: Vec<FilingRow> = Vec::new();
        let mut news_rows: Vec<NewsRow> = Vec::new();
        for candidate in candidates {
            match candidate {
                Candidate::Filing(f) => filing_rows.push(reconcile_filing(f)),
                Candidate::News(n) => news_rows.push(reconcile_news(n)),
            }
        }

        let mut report = PersistReport::default();

        if !filing_rows.is_empty() {
            match self.filings.insert_batch(&filing_rows) {
                Ok(n) => {
                    report.filings_inserted = n;
                    log.info(format!("{n} filing rows inserted"));
                }
                Err(e) => {
                    log.warn(format!("filing insert failed: {e}"));
                    report.errors.push(e.to_string());
                }
            }
            match self.lake.write_filings(&filing_rows, stamp) {
                Ok(path) => {
                    log.info(format!("filing snapshot written to {}", path.display()));
                    report.snapshots.push(path);
                }
                Err(e) => {
                    log.warn(format!("filing snapshot failed: {e}"));
                    report.errors.push(e.to_string());
                }
            }
        }

        if !news_rows.is_empty() {
            match self.news.insert_batch(&news_rows) {
                Ok(n) => {
                    report.news_inserted = n;
                    log.info(format!("{n} news rows inserted"));
                }
                Err(e) => {
                    log.warn(format!("news insert failed: {e}"));
                    report.errors.push(e.to_string());
                }
            }
            match self.lake.write_news(&news_rows, stamp) {
                Ok(path) => {
                    log.info(format!("news snapshot written to {}", path.display()));
                    report.snapshots.push(path);
                }
                Err(e) => {
                    log.warn(format!("news snapshot failed: {e}"));
                    report.errors.push(e.to_string());
                }
            }
        }

        report
    }
}
