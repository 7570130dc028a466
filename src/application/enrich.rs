use crate::application::run::RunLog;
use crate::domain::entities::candidate::Candidate;
use crate::domain::entities::enrichment::Enrichment;
use crate::domain::ports::analyzer::TextAnalyzer;
use crate::domain::values::sentiment::score_in_range;
use std::sync::Arc;

/// Candidates with less usable text than this are not worth an analysis call.
const MIN_TEXT_LEN: usize = 10;

/// How much of the candidate text the analyzer actually sees.
const MAX_ANALYSIS_CHARS: usize = 1000;

/// Attaches exactly one enrichment to every candidate. The outcome is always
/// total: a skip default, a failure default, or a full valid analysis. No
/// candidate leaves this stage partially enriched.
pub struct EnrichStage {
    analyzer: Arc<dyn TextAnalyzer>,
}

impl EnrichStage {
    pub fn new(analyzer: Arc<dyn TextAnalyzer>) -> Self {
        Self { analyzer }
    }

    pub async fn enrich_all(&self, candidates: &mut [Candidate], log: &RunLog) {
        let enabled = self.analyzer.is_enabled();
        if !enabled {
            log.info("analyzer disabled; marking all candidates as skipped");
        }

        let mut analyzed = 0usize;
        let mut skipped = 0usize;
        let mut failed = 0usize;

        for candidate in candidates.iter_mut() {
            let text = candidate.analysis_text();
            if !enabled || text.trim().len() < MIN_TEXT_LEN {
                candidate.set_enrichment(Enrichment::skipped());
                skipped += 1;
                continue;
            }

            let excerpt: String = text.chars().take(MAX_ANALYSIS_CHARS).collect();
            match self.analyzer.analyze(&excerpt).await {
                Ok(a) if score_in_range(a.sentiment_score) => {
                    candidate.set_enrichment(Enrichment {
                        summary: a.summary,
                        sentiment: a.sentiment,
                        sentiment_score: a.sentiment_score,
                    });
                    analyzed += 1;
                }
                Ok(a) => {
                    log.warn(format!(
                        "analysis score {} out of range; using failure defaults",
                        a.sentiment_score
                    ));
                    candidate.set_enrichment(Enrichment::failed());
                    failed += 1;
                }
                Err(e) => {
                    log.warn(format!("analysis failed: {e}"));
                    candidate.set_enrichment(Enrichment::failed());
                    failed += 1;
                }
            }
        }

        log.info(format!(
            "enrichment: {analyzed} analyzed, {skipped} skipped, {failed} failed"
        ));
    }
}
