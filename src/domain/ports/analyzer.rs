use crate::domain::values::sentiment::SentimentLabel;
use async_trait::async_trait;

/// Parsed output of one text-analysis call. Construction implies the
/// three-key contract held: summary present, label in the allowed set,
/// score inside [-1.0, 1.0].
#[derive(Debug, Clone)]
pub struct Analysis {
    pub summary: String,
    pub sentiment: SentimentLabel,
    pub sentiment_score: f64,
}

/// External summarization/sentiment service. One call per candidate, no
/// retries; the enrich stage maps any error to fixed fallback defaults.
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Analysis, String>;

    /// False for the no-op provider; the enrich stage then skips the call
    /// entirely instead of recording an analysis failure.
    fn is_enabled(&self) -> bool {
        true
    }
}
