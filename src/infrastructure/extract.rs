//! Pure extraction adapters: raw fetched bytes in, plain text or structured
//! fields out. No I/O happens here.

use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};
use scraper::{Html, Selector};

/// Visible text of a whole HTML document, whitespace-normalized. Script,
/// style and noscript contents are not visible text.
pub fn html_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut parts: Vec<&str> = Vec::new();
    for node in doc.tree.nodes() {
        if let Some(text) = node.value().as_text() {
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .map(|e| matches!(e.name(), "script" | "style" | "noscript"))
                    .unwrap_or(false)
            });
            if !hidden {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed);
                }
            }
        }
    }
    parts.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of the first element matching a CSS selector, or None when the
/// container is absent from the document.
pub fn element_text(html: &str, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    let doc = Html::parse_document(html);
    let el = doc.select(&selector).next()?;
    let text = el
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    Some(text)
}

/// First `limit` whitespace-delimited tokens, rejoined with single spaces.
/// Bounds payload size before enrichment and persistence.
pub fn truncate_tokens(text: &str, limit: usize) -> String {
    text.split_whitespace().take(limit).collect::<Vec<_>>().join(" ")
}

/// One parsed feed entry, reduced to the fields the news crawler consumes.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub published: Option<DateTime<Utc>>,
    pub summary: String,
}

/// Parse an RSS/Atom document into feed items, preserving feed order. A
/// missing publish time stays None; it is never substituted with "now".
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedItem>, DomainError> {
    let feed = feed_rs::parser::parse(bytes)
        .map_err(|e| DomainError::Extraction(format!("feed parse failed: {e}")))?;

    Ok(feed
        .entries
        .into_iter()
        .map(|entry| FeedItem {
            title: entry.title.map(|t| t.content).unwrap_or_default(),
            link: entry.links.first().map(|l| l.href.clone()).unwrap_or_default(),
            published: entry.published.map(|dt| dt.with_timezone(&Utc)),
            summary: entry.summary.map(|s| s.content).unwrap_or_default(),
        })
        .collect())
}
