use crate::application::run::RunLog;
use crate::domain::entities::candidate::Candidate;
use crate::domain::entities::news::NewsCandidate;
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::domain::values::item_budget::ItemBudget;
use crate::infrastructure::extract::{element_text, parse_feed, truncate_tokens, FeedItem};
use crate::infrastructure::feeds::yahoo_news::{feed_url, ARTICLE_BODY_SELECTOR, SOURCE_LABEL};
use futures::future::join_all;
use std::sync::Arc;

/// Article payload bound before enrichment.
const ARTICLE_TOKEN_LIMIT: usize = 2000;

/// Two-level news expansion: fetch the ticker feed, follow each entry's
/// article link and emit one candidate per entry. A missing or unreachable
/// article body is acceptable; the record keeps the feed's own summary.
pub struct CrawlNewsUseCase {
    fetcher: Arc<dyn PageFetcher>,
}

impl CrawlNewsUseCase {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn execute(&self, ticker: &str, budget: &ItemBudget, log: &RunLog) -> Vec<Candidate> {
        let body = match self.fetcher.fetch(&feed_url(ticker)).await {
            Ok(body) => body,
            Err(e) => {
                log.warn(format!("news feed fetch failed: {e}"));
                return Vec::new();
            }
        };

        let items = match parse_feed(body.as_bytes()) {
            Ok(items) => items,
            Err(e) => {
                log.warn(format!("news feed unusable: {e}"));
                return Vec::new();
            }
        };
        log.info(format!("{} entries on feed for {ticker}", items.len()));

        let mut selected: Vec<FeedItem> = Vec::new();
        for item in items {
            if !budget.try_claim() {
                log.info("item ceiling reached; stopping feed selection");
                break;
            }
            selected.push(item);
        }

        let ticker = ticker.to_uppercase();
        let mut tasks = Vec::with_capacity(selected.len());
        for item in selected {
            let ticker = ticker.clone();
            tasks.push(async move { self.expand_one(ticker, item, log).await });
        }

        join_all(tasks).await
    }

    async fn expand_one(&self, ticker: String, item: FeedItem, log: &RunLog) -> Candidate {
        let article_text = if item.link.is_empty() {
            String::new()
        } else {
            match self.fetcher.fetch(&item.link).await {
                Ok(html) => truncate_tokens(
                    &element_text(&html, ARTICLE_BODY_SELECTOR).unwrap_or_default(),
                    ARTICLE_TOKEN_LIMIT,
                ),
                Err(e) => {
                    log.warn(format!("article fetch failed for {}: {e}", item.link));
                    String::new()
                }
            }
        };

        Candidate::News(NewsCandidate {
            ticker,
            source: SOURCE_LABEL.to_string(),
            title: item.title,
            link: item.link,
            published: item.published,
            summary: item.summary,
            article_text,
            enrichment: None,
        })
    }
}
