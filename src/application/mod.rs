pub mod crawl_filings;
pub mod crawl_news;
pub mod enrich;
pub mod persist;
pub mod query;
pub mod run;
