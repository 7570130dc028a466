use clap::Parser;
use stockintel::application::run::{CrawlConfig, RunKind};
use stockintel::cli::commands::{Cli, Commands};
use stockintel::{AppConfig, StockIntel};
use std::time::Duration;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    let app = match StockIntel::new(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error initializing stockintel: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(app, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(app: StockIntel, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Crawl {
            kind,
            ticker,
            max_items,
            concurrency,
            delay_ms,
            timeout_secs,
        } => {
            let kind: RunKind = kind.parse().map_err(|e: String| e)?;
            let mut config = CrawlConfig::new(ticker);
            config.max_items = max_items;
            config.concurrency = concurrency;
            config.delay = Duration::from_millis(delay_ms);
            config.timeout = Duration::from_secs(timeout_secs);

            let report = app.crawl(kind, &config).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.success {
                std::process::exit(1);
            }
        }
        Commands::Filings { ticker, limit } => {
            let rows = app.filings(&ticker, limit)?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Commands::News { ticker, limit } => {
            let rows = app.news(&ticker, limit)?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Commands::Stats => {
            let stats = app.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
