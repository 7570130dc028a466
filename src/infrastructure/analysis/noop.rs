use crate::domain::ports::analyzer::{Analysis, TextAnalyzer};

/// Analyzer used when no API key is configured. The enrich stage sees it as
/// disabled and attaches skip defaults without making a call.
pub struct NoopAnalyzer;

#[async_trait::async_trait]
impl TextAnalyzer for NoopAnalyzer {
    async fn analyze(&self, _text: &str) -> Result<Analysis, String> {
        Err("no analyzer configured".to_string())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
