use crate::application::run::{
    DEFAULT_CONCURRENCY, DEFAULT_DELAY_MS, DEFAULT_MAX_ITEMS, DEFAULT_TIMEOUT_SECS,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stockintel")]
#[command(about = "SEC filing and news crawler with AI enrichment", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a crawl for one ticker: filings, news, or all
    Crawl {
        /// Which sources to crawl: filings | news | all
        kind: String,

        /// Ticker symbol, e.g. AAPL
        #[arg(long)]
        ticker: String,

        /// Shared item ceiling across both sources
        #[arg(long, default_value_t = DEFAULT_MAX_ITEMS)]
        max_items: usize,

        /// Concurrent in-flight requests
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Base per-host delay between requests, in milliseconds
        #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
        delay_ms: u64,

        /// Wall-clock ceiling for the whole run, in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },

    /// List stored filings for a ticker, newest first
    Filings {
        #[arg(long)]
        ticker: String,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// List stored news for a ticker, newest first
    News {
        #[arg(long)]
        ticker: String,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Row counts per warehouse table
    Stats,
}
