use rusqlite::Connection;

/// Two append-only tables with fixed schemas. Reconciliation guarantees every
/// column is populated before a row gets here; only news.published is ever
/// NULL.
pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sec_filings (
            cik TEXT NOT NULL,
            ticker TEXT NOT NULL,
            company_name TEXT NOT NULL,
            form TEXT NOT NULL,
            filing_date TEXT,
            accession_no TEXT NOT NULL,
            primary_doc TEXT NOT NULL,
            report_url TEXT NOT NULL,
            report_text TEXT NOT NULL,
            summary_ai TEXT NOT NULL,
            sentiment TEXT NOT NULL,
            sentiment_score REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS news (
            ticker TEXT NOT NULL,
            source TEXT NOT NULL,
            title TEXT NOT NULL,
            link TEXT NOT NULL,
            published TEXT,
            summary TEXT NOT NULL,
            article_text TEXT NOT NULL,
            summary_ai TEXT NOT NULL,
            sentiment TEXT NOT NULL,
            sentiment_score REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_filings_ticker ON sec_filings(ticker);
        CREATE INDEX IF NOT EXISTS idx_filings_date ON sec_filings(filing_date);
        CREATE INDEX IF NOT EXISTS idx_news_ticker ON news(ticker);
        CREATE INDEX IF NOT EXISTS idx_news_published ON news(published);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
