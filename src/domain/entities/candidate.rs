use crate::domain::entities::enrichment::Enrichment;
use crate::domain::entities::filing::FilingCandidate;
use crate::domain::entities::news::NewsCandidate;
use serde::{Deserialize, Serialize};

/// Tagged record flowing through the pipeline. The variant is the sole
/// discriminator at persist time; a record is never both kinds or neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Candidate {
    Filing(FilingCandidate),
    News(NewsCandidate),
}

impl Candidate {
    pub fn ticker(&self) -> &str {
        match self {
            Candidate::Filing(f) => &f.ticker,
            Candidate::News(n) => &n.ticker,
        }
    }

    /// Text the enrichment stage analyzes.
    pub fn analysis_text(&self) -> String {
        match self {
            Candidate::Filing(f) => f.analysis_text().to_string(),
            Candidate::News(n) => n.analysis_text(),
        }
    }

    pub fn set_enrichment(&mut self, enrichment: Enrichment) {
        match self {
            Candidate::Filing(f) => f.enrichment = Some(enrichment),
            Candidate::News(n) => n.enrichment = Some(enrichment),
        }
    }

    pub fn enrichment(&self) -> Option<&Enrichment> {
        match self {
            Candidate::Filing(f) => f.enrichment.as_ref(),
            Candidate::News(n) => n.enrichment.as_ref(),
        }
    }
}
