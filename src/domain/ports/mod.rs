pub mod analyzer;
pub mod filing_repository;
pub mod news_repository;
pub mod page_fetcher;
pub mod snapshot_store;
