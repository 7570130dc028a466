mod common;

use common::*;
use std::path::Path;
use stockintel::application::run::{CrawlConfig, RunKind};

fn all_sources_fetcher() -> StubFetcher {
    StubFetcher::new()
        .page(TICKER_TABLE_URL, TICKER_TABLE)
        .page(
            AAPL_SUBMISSIONS_URL,
            submissions_json(&[(
                "10-K",
                "2024-09-28",
                "0000320193-24-000123",
                "aapl-10k.htm",
            )]),
        )
        .page(
            "https://www.sec.gov/Archives/edgar/data/320193/000032019324000123/aapl-10k.htm",
            filing_html("Annual report body"),
        )
        .page(
            AAPL_FEED_URL,
            rss_feed(&[(
                "Launch event announced",
                "https://finance.example.com/a1",
                Some("Mon, 05 Aug 2024 12:00:00 GMT"),
            )]),
        )
        .page(
            "https://finance.example.com/a1",
            article_html("The company set a date for its fall launch event."),
        )
}

#[tokio::test]
async fn an_all_run_partitions_candidates_by_kind() {
    let t = setup(all_sources_fetcher());
    let report = t.app.crawl(RunKind::All, &CrawlConfig::new("AAPL")).await;
    assert!(report.success, "{:?}", report.error);
    assert_eq!(report.candidates_emitted, 2);
    assert_eq!(report.filings_inserted, 1);
    assert_eq!(report.news_inserted, 1);

    let stats = t.app.stats().unwrap();
    assert_eq!(stats.filings, 1);
    assert_eq!(stats.news, 1);
}

#[tokio::test]
async fn each_run_writes_one_snapshot_file_per_kind() {
    let t = setup(all_sources_fetcher());
    let report = t.app.crawl(RunKind::All, &CrawlConfig::new("AAPL")).await;
    assert_eq!(report.snapshots.len(), 2);

    let names: Vec<String> = report
        .snapshots
        .iter()
        .map(|p| {
            Path::new(p)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert!(names.iter().any(|n| n.starts_with("sec_filings_") && n.ends_with(".parquet")));
    assert!(names.iter().any(|n| n.starts_with("news_") && n.ends_with(".parquet")));
    for path in &report.snapshots {
        assert!(Path::new(path).exists(), "snapshot {path} missing on disk");
    }
}

#[tokio::test]
async fn snapshot_files_from_separate_runs_never_collide() {
    let t = setup(all_sources_fetcher());
    let first = t.app.crawl(RunKind::News, &CrawlConfig::new("AAPL")).await;
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    let second = t.app.crawl(RunKind::News, &CrawlConfig::new("AAPL")).await;

    assert_eq!(first.snapshots.len(), 1);
    assert_eq!(second.snapshots.len(), 1);
    assert_ne!(first.snapshots[0], second.snapshots[0]);
    assert!(Path::new(&first.snapshots[0]).exists());
    assert!(Path::new(&second.snapshots[0]).exists());
}

#[tokio::test]
async fn warehouse_rows_accumulate_across_runs() {
    let t = setup(all_sources_fetcher());
    t.app.crawl(RunKind::News, &CrawlConfig::new("AAPL")).await;
    t.app.crawl(RunKind::News, &CrawlConfig::new("AAPL")).await;

    // append-only: the same headline crawled twice is stored twice
    assert_eq!(t.app.stats().unwrap().news, 2);

    let rows = t.app.news("AAPL", 1).unwrap();
    assert_eq!(rows.len(), 1, "query limit is honored");
}

#[tokio::test]
async fn query_side_never_touches_the_network() {
    let t = setup(StubFetcher::new());
    assert_eq!(t.app.stats().unwrap().filings, 0);
    assert!(t.app.filings("AAPL", 10).unwrap().is_empty());
    assert!(t.app.news("AAPL", 10).unwrap().is_empty());
}
