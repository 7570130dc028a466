//! Yahoo Finance ticker-scoped headline feed.

/// Source label recorded on every news row from this feed.
pub const SOURCE_LABEL: &str = "YahooFinanceRSS";

/// CSS container Yahoo Finance article bodies live in. When it is absent the
/// article text is recorded as empty, which is not a failure.
pub const ARTICLE_BODY_SELECTOR: &str = "div.caas-body";

pub fn feed_url(ticker: &str) -> String {
    format!(
        "https://feeds.finance.yahoo.com/rss/2.0/headline?s={}&region=US&lang=en-US",
        ticker.to_uppercase()
    )
}
