use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Ticker could not be mapped to a CIK. Fatal for the run.
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// A single network fetch failed. Absorbed locally by skipping the item.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// A fetched document could not be parsed into the expected shape.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The text-analysis call failed or returned malformed output.
    #[error("Enrichment error: {0}")]
    Enrichment(String),

    /// Warehouse insert or lake write failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The whole-run wall-clock timeout elapsed. Fatal for the run.
    #[error("Run timed out after {0}s")]
    Timeout(u64),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    /// Only resolution failures and timeouts surface as run-level failures;
    /// every other kind is absorbed where it occurs.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::Resolution(_) | DomainError::Timeout(_))
    }
}

impl From<String> for DomainError {
    fn from(s: String) -> Self {
        DomainError::Database(s)
    }
}

impl From<&str> for DomainError {
    fn from(s: &str) -> Self {
        DomainError::InvalidInput(s.to_string())
    }
}
