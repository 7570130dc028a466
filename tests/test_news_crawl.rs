mod common;

use common::*;
use stockintel::application::run::{CrawlConfig, RunKind};

#[tokio::test]
async fn news_run_follows_feed_entries_in_order_up_to_the_ceiling() {
    let fetcher = StubFetcher::new()
        .page(
            AAPL_FEED_URL,
            rss_feed(&[
                (
                    "Apple hits record high",
                    "https://finance.example.com/a1",
                    Some("Mon, 05 Aug 2024 12:00:00 GMT"),
                ),
                (
                    "iPhone sales beat estimates",
                    "https://finance.example.com/a2",
                    Some("Sun, 04 Aug 2024 09:00:00 GMT"),
                ),
                (
                    "Analyst downgrades",
                    "https://finance.example.com/a3",
                    Some("Sat, 03 Aug 2024 10:00:00 GMT"),
                ),
            ]),
        )
        .page(
            "https://finance.example.com/a1",
            article_html("Shares closed at an all time high on strong guidance."),
        )
        .page(
            "https://finance.example.com/a2",
            article_html("Quarterly unit sales came in ahead of consensus."),
        );

    let mut config = CrawlConfig::new("aapl");
    config.max_items = 2;

    let t = setup(fetcher);
    let report = t.app.crawl(RunKind::News, &config).await;
    assert!(report.success, "{:?}", report.error);
    assert!(report.cik.is_none(), "news runs never resolve a CIK");
    assert_eq!(report.news_inserted, 2);

    let rows = t.app.news("AAPL", 10).unwrap();
    assert_eq!(rows.len(), 2);
    // newest published first
    assert_eq!(rows[0].title, "Apple hits record high");
    assert_eq!(rows[1].title, "iPhone sales beat estimates");
    assert_eq!(rows[0].source, "YahooFinanceRSS");
    assert_eq!(rows[0].ticker, "AAPL");
    assert!(rows[0].article_text.contains("all time high"));
}

#[tokio::test]
async fn missing_body_container_and_missing_pubdate_are_acceptable() {
    let fetcher = StubFetcher::new()
        .page(
            AAPL_FEED_URL,
            rss_feed(&[("Undated story", "https://finance.example.com/b1", None)]),
        )
        .page(
            "https://finance.example.com/b1",
            "<html><body><div class='other'>Not the article container</div></body></html>",
        );

    let t = setup(fetcher);
    let report = t.app.crawl(RunKind::News, &CrawlConfig::new("AAPL")).await;
    assert!(report.success);
    assert_eq!(report.news_inserted, 1);

    let rows = t.app.news("AAPL", 10).unwrap();
    assert!(rows[0].published.is_none(), "missing pubDate stays unknown");
    assert!(rows[0].article_text.is_empty());
    assert_eq!(rows[0].summary, "Undated story summary");
}

#[tokio::test]
async fn unreachable_article_still_yields_a_record() {
    let fetcher = StubFetcher::new().page(
        AAPL_FEED_URL,
        rss_feed(&[(
            "Story behind a broken link",
            "https://finance.example.com/gone",
            Some("Mon, 05 Aug 2024 12:00:00 GMT"),
        )]),
    );

    let t = setup(fetcher);
    let report = t.app.crawl(RunKind::News, &CrawlConfig::new("AAPL")).await;
    assert!(report.success);
    assert_eq!(report.news_inserted, 1);
    assert!(t.app.news("AAPL", 10).unwrap()[0].article_text.is_empty());
}

#[tokio::test]
async fn unreachable_feed_means_an_empty_but_successful_run() {
    let t = setup(StubFetcher::new());
    let report = t.app.crawl(RunKind::News, &CrawlConfig::new("AAPL")).await;
    assert!(report.success, "a dry source is not a run failure");
    assert_eq!(report.candidates_emitted, 0);
    assert_eq!(report.news_inserted, 0);
}
