use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Outbound document fetch. The production implementation bounds concurrency,
/// paces requests per host, and honors robots.txt; crawl workers never talk
/// to the network except through this port.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a URL and return the response body as text. Non-success status,
    /// transport failure, and robots disallow all surface as
    /// `DomainError::Fetch`.
    async fn fetch(&self, url: &str) -> Result<String, DomainError>;
}
