use crate::application::run::RunLog;
use crate::domain::entities::candidate::Candidate;
use crate::domain::entities::filing::FilingCandidate;
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::domain::values::cik::Cik;
use crate::domain::values::form_type::FormType;
use crate::domain::values::item_budget::ItemBudget;
use crate::infrastructure::edgar::submissions::{parse_submissions, FilingRef};
use crate::infrastructure::edgar::{document_url, submissions_url};
use crate::infrastructure::extract::{html_text, truncate_tokens};
use chrono::NaiveDate;
use futures::future::join_all;
use std::sync::Arc;

/// Filing payload bound before enrichment.
const REPORT_TOKEN_LIMIT: usize = 4000;

/// Two-level filing expansion: fetch the index for a CIK, keep the three
/// relevant form categories, follow each primary document and emit one
/// candidate per document that yields text.
pub struct CrawlFilingsUseCase {
    fetcher: Arc<dyn PageFetcher>,
}

impl CrawlFilingsUseCase {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Per-item fetch failures are logged and skipped; an index-level failure
    /// empties this source without failing the run.
    pub async fn execute(
        &self,
        ticker: &str,
        cik: &Cik,
        budget: &ItemBudget,
        log: &RunLog,
    ) -> Vec<Candidate> {
        let index = match self.fetcher.fetch(&submissions_url(cik)).await {
            Ok(body) => body,
            Err(e) => {
                log.warn(format!("filing index fetch failed: {e}"));
                return Vec::new();
            }
        };

        let (company_name, refs) = match parse_submissions(&index) {
            Ok(parsed) => parsed,
            Err(e) => {
                log.warn(format!("filing index unusable: {e}"));
                return Vec::new();
            }
        };
        log.info(format!(
            "{company_name}: {} filings on index for CIK {cik}",
            refs.len()
        ));

        // Selection happens in index order; the budget check between items is
        // the cooperative ceiling.
        let mut selected: Vec<(FormType, FilingRef)> = Vec::new();
        for filing_ref in refs {
            let Some(form) = FormType::from_index_label(&filing_ref.form) else {
                continue;
            };
            if !budget.try_claim() {
                log.info("item ceiling reached; stopping filing selection");
                break;
            }
            selected.push((form, filing_ref));
        }
        log.info(format!("{} relevant filings selected", selected.len()));

        let ticker = ticker.to_uppercase();
        let mut tasks = Vec::with_capacity(selected.len());
        for (form, filing_ref) in selected {
            let company_name = company_name.clone();
            let ticker = ticker.clone();
            tasks.push(async move {
                self.expand_one(&ticker, cik, company_name, form, filing_ref, log)
                    .await
            });
        }

        join_all(tasks).await.into_iter().flatten().collect()
    }

    async fn expand_one(
        &self,
        ticker: &str,
        cik: &Cik,
        company_name: String,
        form: FormType,
        filing_ref: FilingRef,
        log: &RunLog,
    ) -> Option<Candidate> {
        let report_url = document_url(cik, &filing_ref.accession_no, &filing_ref.primary_doc);
        let html = match self.fetcher.fetch(&report_url).await {
            Ok(html) => html,
            Err(e) => {
                log.warn(format!("skipping {}: {e}", filing_ref.accession_no));
                return None;
            }
        };

        let report_text = truncate_tokens(&html_text(&html), REPORT_TOKEN_LIMIT);
        if report_text.is_empty() {
            log.warn(format!("no text content in {report_url}; skipping"));
            return None;
        }

        Some(Candidate::Filing(FilingCandidate {
            cik: cik.clone(),
            ticker: ticker.to_string(),
            company_name,
            form,
            filing_date: NaiveDate::parse_from_str(&filing_ref.filing_date, "%Y-%m-%d").ok(),
            accession_no: filing_ref.accession_no,
            primary_doc: filing_ref.primary_doc,
            report_url,
            report_text,
            enrichment: None,
        }))
    }
}
