use crate::domain::values::sentiment::SentimentLabel;
use serde::{Deserialize, Serialize};

/// Fields the enrichment stage attaches to a candidate. Score is always
/// present (0.0 on failure), label is always present (Unknown on failure);
/// a candidate never carries a partially applied analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrichment {
    pub summary: String,
    pub sentiment: SentimentLabel,
    pub sentiment_score: f64,
}

impl Enrichment {
    pub fn new(summary: String, sentiment: SentimentLabel, sentiment_score: f64) -> Self {
        Self {
            summary,
            sentiment,
            sentiment_score,
        }
    }

    /// Defaults used when the candidate text is too short to analyze. No
    /// external call was made, so the summary stays empty.
    pub fn skipped() -> Self {
        Self {
            summary: String::new(),
            sentiment: SentimentLabel::Unknown,
            sentiment_score: 0.0,
        }
    }

    /// Full fallback for a failed or malformed analysis call.
    pub fn failed() -> Self {
        Self {
            summary: "Error in analysis.".to_string(),
            sentiment: SentimentLabel::Unknown,
            sentiment_score: 0.0,
        }
    }
}

impl Default for Enrichment {
    fn default() -> Self {
        Self::skipped()
    }
}
