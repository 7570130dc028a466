use crate::domain::error::DomainError;
use serde::Deserialize;

/// One row of the filing index, still untyped: the form label has not been
/// checked against the allow-list yet.
#[derive(Debug, Clone)]
pub struct FilingRef {
    pub form: String,
    pub filing_date: String,
    pub accession_no: String,
    pub primary_doc: String,
}

#[derive(Debug, Deserialize)]
struct Submissions {
    name: Option<String>,
    filings: Filings,
}

#[derive(Debug, Deserialize)]
struct Filings {
    recent: Recent,
}

/// EDGAR publishes the recent-filings index column-wise: parallel arrays
/// zipped by position.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Recent {
    #[serde(default)]
    form: Vec<String>,
    #[serde(default)]
    filing_date: Vec<String>,
    #[serde(default)]
    accession_number: Vec<String>,
    #[serde(default)]
    primary_document: Vec<String>,
}

/// Parse a submissions document into (company name, index rows). Zipping
/// stops at the shortest column, matching how the index is consumed upstream.
pub fn parse_submissions(json: &str) -> Result<(String, Vec<FilingRef>), DomainError> {
    let subs: Submissions = serde_json::from_str(json)
        .map_err(|e| DomainError::Extraction(format!("submissions parse failed: {e}")))?;

    let recent = subs.filings.recent;
    let refs = recent
        .form
        .into_iter()
        .zip(recent.filing_date)
        .zip(recent.accession_number)
        .zip(recent.primary_document)
        .map(|(((form, filing_date), accession_no), primary_doc)| FilingRef {
            form,
            filing_date,
            accession_no,
            primary_doc,
        })
        .collect();

    Ok((subs.name.unwrap_or_default(), refs))
}
