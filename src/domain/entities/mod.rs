pub mod candidate;
pub mod enrichment;
pub mod filing;
pub mod news;
