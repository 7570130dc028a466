mod common;

use common::*;
use stockintel::application::run::{CrawlConfig, RunKind};

#[tokio::test]
async fn unknown_ticker_fails_a_filing_run() {
    let fetcher = StubFetcher::new().page(TICKER_TABLE_URL, TICKER_TABLE);

    let t = setup(fetcher);
    let report = t
        .app
        .crawl(RunKind::Filings, &CrawlConfig::new("NOPE"))
        .await;
    assert!(!report.success);
    assert!(report.error.as_deref().unwrap().contains("Resolution"));
    assert_eq!(report.candidates_emitted, 0);
}

#[tokio::test]
async fn unreachable_ticker_table_fails_a_filing_run() {
    let t = setup(StubFetcher::new());
    let report = t
        .app
        .crawl(RunKind::Filings, &CrawlConfig::new("AAPL"))
        .await;
    assert!(!report.success);
    assert!(report.error.as_deref().unwrap().contains("Resolution"));
}

#[tokio::test]
async fn news_runs_do_not_need_resolution() {
    // no ticker table canned at all
    let fetcher = StubFetcher::new().page(
        AAPL_FEED_URL,
        rss_feed(&[(
            "Headline",
            "https://finance.example.com/x",
            Some("Mon, 05 Aug 2024 12:00:00 GMT"),
        )]),
    );

    let t = setup(fetcher);
    let report = t.app.crawl(RunKind::News, &CrawlConfig::new("AAPL")).await;
    assert!(report.success);
    assert_eq!(report.news_inserted, 1);
}

#[tokio::test]
async fn resolution_is_case_insensitive() {
    let fetcher = StubFetcher::new()
        .page(TICKER_TABLE_URL, TICKER_TABLE)
        .page(
            "https://data.sec.gov/submissions/CIK0000789019.json",
            submissions_json(&[]),
        );

    let t = setup(fetcher);
    let report = t
        .app
        .crawl(RunKind::Filings, &CrawlConfig::new("msft"))
        .await;
    assert!(report.success, "{:?}", report.error);
    assert_eq!(report.cik.as_deref(), Some("0000789019"));
    assert_eq!(report.ticker, "MSFT");
}
