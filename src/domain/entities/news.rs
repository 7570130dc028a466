use crate::domain::entities::enrichment::Enrichment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One feed entry with its article body expanded. An empty body is a valid
/// state; the feed's own short summary still carries the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsCandidate {
    pub ticker: String,
    pub source: String,
    pub title: String,
    pub link: String,
    /// Present only when the feed supplied a parseable publish time; never
    /// fabricated.
    pub published: Option<DateTime<Utc>>,
    pub summary: String,
    /// Article body text, truncated upstream to 2000 whitespace tokens. May
    /// be empty when the expected content container was absent.
    pub article_text: String,
    pub enrichment: Option<Enrichment>,
}

impl NewsCandidate {
    /// Text handed to the analyzer. Falls back to the title and feed summary
    /// when the article body came back empty.
    pub fn analysis_text(&self) -> String {
        if self.article_text.trim().is_empty() {
            format!("{} - {}", self.title, self.summary)
        } else {
            self.article_text.clone()
        }
    }
}
