mod common;

use common::*;
use std::sync::Arc;
use stockintel::application::run::{CrawlConfig, RunKind};
use stockintel::domain::ports::analyzer::Analysis;
use stockintel::domain::values::sentiment::SentimentLabel;

fn feed_with_article() -> StubFetcher {
    StubFetcher::new()
        .page(
            AAPL_FEED_URL,
            rss_feed(&[(
                "Record quarter",
                "https://finance.example.com/a1",
                Some("Mon, 05 Aug 2024 12:00:00 GMT"),
            )]),
        )
        .page(
            "https://finance.example.com/a1",
            article_html("Revenue and margins both expanded well past expectations."),
        )
}

#[tokio::test]
async fn valid_analysis_lands_whole_on_the_stored_row() {
    let analyzer = ScriptedAnalyzer {
        result: Ok(Analysis {
            summary: "Strong results across the board.".into(),
            sentiment: SentimentLabel::Positive,
            sentiment_score: 0.7,
        }),
    };

    let t = setup_with_analyzer(feed_with_article(), Arc::new(analyzer));
    let report = t.app.crawl(RunKind::News, &CrawlConfig::new("AAPL")).await;
    assert!(report.success);

    let rows = t.app.news("AAPL", 10).unwrap();
    assert_eq!(rows[0].summary_ai, "Strong results across the board.");
    assert_eq!(rows[0].sentiment, "Positive");
    assert_eq!(rows[0].sentiment_score, 0.7);
}

#[tokio::test]
async fn failed_analysis_falls_back_to_error_defaults() {
    let analyzer = ScriptedAnalyzer {
        result: Err("upstream 500".into()),
    };

    let t = setup_with_analyzer(feed_with_article(), Arc::new(analyzer));
    let report = t.app.crawl(RunKind::News, &CrawlConfig::new("AAPL")).await;
    assert!(report.success, "an analysis failure never fails the run");

    let rows = t.app.news("AAPL", 10).unwrap();
    assert_eq!(rows[0].summary_ai, "Error in analysis.");
    assert_eq!(rows[0].sentiment, "Unknown");
    assert_eq!(rows[0].sentiment_score, 0.0);
}

#[tokio::test]
async fn out_of_range_score_counts_as_a_failed_analysis() {
    let analyzer = ScriptedAnalyzer {
        result: Ok(Analysis {
            summary: "Looks fine".into(),
            sentiment: SentimentLabel::Positive,
            sentiment_score: 12.0,
        }),
    };

    let t = setup_with_analyzer(feed_with_article(), Arc::new(analyzer));
    t.app.crawl(RunKind::News, &CrawlConfig::new("AAPL")).await;

    let rows = t.app.news("AAPL", 10).unwrap();
    assert_eq!(rows[0].summary_ai, "Error in analysis.");
    assert_eq!(rows[0].sentiment_score, 0.0);
}

#[tokio::test]
async fn disabled_analyzer_records_skip_defaults() {
    let t = setup(feed_with_article());
    t.app.crawl(RunKind::News, &CrawlConfig::new("AAPL")).await;

    let rows = t.app.news("AAPL", 10).unwrap();
    assert_eq!(rows[0].summary_ai, "");
    assert_eq!(rows[0].sentiment, "Unknown");
    assert_eq!(rows[0].sentiment_score, 0.0);
}

#[tokio::test]
async fn short_text_is_skipped_even_with_a_working_analyzer() {
    // article body missing and the title/summary fallback is still analyzed;
    // an entry with a nearly empty title stays below the analysis threshold
    let fetcher = StubFetcher::new().page(
        AAPL_FEED_URL,
        "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>t</title><item><title>x</title><link></link></item></channel></rss>",
    );
    let analyzer = ScriptedAnalyzer {
        result: Ok(Analysis {
            summary: "should not be used".into(),
            sentiment: SentimentLabel::Negative,
            sentiment_score: -0.5,
        }),
    };

    let t = setup_with_analyzer(fetcher, Arc::new(analyzer));
    t.app.crawl(RunKind::News, &CrawlConfig::new("AAPL")).await;

    let rows = t.app.news("AAPL", 10).unwrap();
    assert_eq!(rows[0].summary_ai, "", "skip defaults, not the analysis");
    assert_eq!(rows[0].sentiment, "Unknown");
}
