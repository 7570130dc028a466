pub mod resolver;
pub mod submissions;

use crate::domain::values::cik::Cik;

pub const TICKER_TABLE_URL: &str = "https://www.sec.gov/files/company_tickers.json";

pub fn submissions_url(cik: &Cik) -> String {
    format!("https://data.sec.gov/submissions/CIK{}.json", cik.padded())
}

/// Canonical Archives URL for a filing's primary document. The Archives path
/// wants the CIK unpadded and the accession number with its dashes stripped.
pub fn document_url(cik: &Cik, accession_no: &str, primary_doc: &str) -> String {
    let accession: String = accession_no.chars().filter(|c| *c != '-').collect();
    format!(
        "https://www.sec.gov/Archives/edgar/data/{}/{}/{}",
        cik.unpadded(),
        accession,
        primary_doc
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submissions_url_uses_padded_cik() {
        let cik = Cik::new(320193);
        assert_eq!(
            submissions_url(&cik),
            "https://data.sec.gov/submissions/CIK0000320193.json"
        );
    }

    #[test]
    fn document_url_strips_accession_dashes_and_cik_padding() {
        let cik = Cik::new(320193);
        assert_eq!(
            document_url(&cik, "0000320193-24-000123", "aapl-20240928.htm"),
            "https://www.sec.gov/Archives/edgar/data/320193/000032019324000123/aapl-20240928.htm"
        );
    }
}
