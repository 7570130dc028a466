use crate::domain::entities::enrichment::Enrichment;
use crate::domain::values::cik::Cik;
use crate::domain::values::form_type::FormType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One regulatory filing pulled off the EDGAR index, after its primary
/// document has been fetched and reduced to text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingCandidate {
    pub cik: Cik,
    pub ticker: String,
    pub company_name: String,
    pub form: FormType,
    pub filing_date: Option<NaiveDate>,
    pub accession_no: String,
    pub primary_doc: String,
    pub report_url: String,
    /// Visible text of the primary document, truncated upstream to 4000
    /// whitespace tokens.
    pub report_text: String,
    pub enrichment: Option<Enrichment>,
}

impl FilingCandidate {
    /// Text handed to the analyzer.
    pub fn analysis_text(&self) -> &str {
        &self.report_text
    }
}
