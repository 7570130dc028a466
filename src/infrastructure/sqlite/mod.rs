pub mod filing_repo;
pub mod migrations;
pub mod news_repo;
