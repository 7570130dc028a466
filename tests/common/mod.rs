//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use stockintel::domain::error::DomainError;
use stockintel::domain::ports::analyzer::{Analysis, TextAnalyzer};
use stockintel::domain::ports::page_fetcher::PageFetcher;
use stockintel::infrastructure::analysis::noop::NoopAnalyzer;
use stockintel::{AppConfig, StockIntel};
use tempfile::TempDir;

/// Serves canned response bodies keyed by exact URL; any other URL fails the
/// way a network error would.
pub struct StubFetcher {
    pages: HashMap<String, String>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    pub fn page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| DomainError::Fetch(format!("no canned response for {url}")))
    }
}

/// Analyzer that returns the same result for every call.
pub struct ScriptedAnalyzer {
    pub result: Result<Analysis, String>,
}

#[async_trait]
impl TextAnalyzer for ScriptedAnalyzer {
    async fn analyze(&self, _text: &str) -> Result<Analysis, String> {
        self.result.clone()
    }
}

pub struct TestApp {
    pub app: StockIntel,
    // Holds the warehouse db and the lake; dropped with the test.
    pub dir: TempDir,
}

pub fn setup_with_analyzer(fetcher: StubFetcher, analyzer: Arc<dyn TextAnalyzer>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        db_path: dir.path().join("test.db").to_string_lossy().into_owned(),
        lake_dir: dir.path().join("lake").to_string_lossy().into_owned(),
        user_agent: "stockintel-tests".into(),
        openai_api_key: None,
        analysis_model: None,
    };
    let app = StockIntel::with_providers(&config, Some(Arc::new(fetcher)), analyzer).unwrap();
    TestApp { app, dir }
}

pub fn setup(fetcher: StubFetcher) -> TestApp {
    setup_with_analyzer(fetcher, Arc::new(NoopAnalyzer))
}

pub const TICKER_TABLE_URL: &str = "https://www.sec.gov/files/company_tickers.json";
pub const AAPL_SUBMISSIONS_URL: &str = "https://data.sec.gov/submissions/CIK0000320193.json";
pub const AAPL_FEED_URL: &str =
    "https://feeds.finance.yahoo.com/rss/2.0/headline?s=AAPL&region=US&lang=en-US";

pub const TICKER_TABLE: &str = r#"{
    "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
    "1": {"cik_str": 789019, "ticker": "MSFT", "title": "MICROSOFT CORP"}
}"#;

/// Columnar submissions document from (form, date, accession, primary doc)
/// tuples.
pub fn submissions_json(rows: &[(&str, &str, &str, &str)]) -> String {
    let col = |i: usize| {
        rows.iter()
            .map(|r| {
                format!(
                    "\"{}\"",
                    match i {
                        0 => r.0,
                        1 => r.1,
                        2 => r.2,
                        _ => r.3,
                    }
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        r#"{{
            "cik": "320193",
            "name": "Apple Inc.",
            "filings": {{"recent": {{
                "form": [{}],
                "filingDate": [{}],
                "accessionNumber": [{}],
                "primaryDocument": [{}]
            }}}}
        }}"#,
        col(0),
        col(1),
        col(2),
        col(3)
    )
}

pub fn filing_html(body: &str) -> String {
    format!("<html><body><h1>UNITED STATES SECURITIES AND EXCHANGE COMMISSION</h1><p>{body}</p></body></html>")
}

pub fn article_html(body: &str) -> String {
    format!("<html><body><div class=\"caas-body\"><p>{body}</p></div></body></html>")
}

/// RSS 2.0 feed from (title, link, optional pubDate) tuples.
pub fn rss_feed(items: &[(&str, &str, Option<&str>)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>AAPL headlines</title>",
    );
    for (title, link, pub_date) in items {
        xml.push_str(&format!("<item><title>{title}</title><link>{link}</link>"));
        if let Some(date) = pub_date {
            xml.push_str(&format!("<pubDate>{date}</pubDate>"));
        }
        xml.push_str(&format!("<description>{title} summary</description></item>"));
    }
    xml.push_str("</channel></rss>");
    xml
}
