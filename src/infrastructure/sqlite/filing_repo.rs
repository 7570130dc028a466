use crate::domain::error::DomainError;
use crate::domain::ports::filing_repository::{FilingRepository, FilingRow};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::sync::Mutex;

const COLS: &str = "cik, ticker, company_name, form, filing_date, accession_no, primary_doc, report_url, report_text, summary_ai, sentiment, sentiment_score";

pub struct SqliteFilingRepo {
    conn: Mutex<Connection>,
}

impl SqliteFilingRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_record(row: &rusqlite::Row) -> Result<FilingRow, rusqlite::Error> {
        let date_str: Option<String> = row.get(4)?;
        Ok(FilingRow {
            cik: row.get(0)?,
            ticker: row.get(1)?,
            company_name: row.get(2)?,
            form: row.get(3)?,
            filing_date: date_str.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            accession_no: row.get(5)?,
            primary_doc: row.get(6)?,
            report_url: row.get(7)?,
            report_text: row.get(8)?,
            summary_ai: row.get(9)?,
            sentiment: row.get(10)?,
            sentiment_score: row.get(11)?,
        })
    }
}

impl FilingRepository for SqliteFilingRepo {
    fn insert_batch(&self, rows: &[FilingRow]) -> Result<usize, DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        for row in rows {
            tx.execute(
                "INSERT INTO sec_filings (cik, ticker, company_name, form, filing_date, accession_no, primary_doc, report_url, report_text, summary_ai, sentiment, sentiment_score)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    row.cik,
                    row.ticker,
                    row.company_name,
                    row.form,
                    row.filing_date.map(|d| d.format("%Y-%m-%d").to_string()),
                    row.accession_no,
                    row.primary_doc,
                    row.report_url,
                    row.report_text,
                    row.summary_ai,
                    row.sentiment,
                    row.sentiment_score,
                ],
            )
            .map_err(|e| DomainError::Persistence(format!("filing insert failed: {e}")))?;
        }
        tx.commit()
            .map_err(|e| DomainError::Persistence(format!("filing batch commit failed: {e}")))?;
        Ok(rows.len())
    }

    fn query_by_ticker(&self, ticker: &str, limit: usize) -> Result<Vec<FilingRow>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!(
            "SELECT {COLS} FROM sec_filings WHERE ticker = ?1 ORDER BY filing_date DESC LIMIT ?2"
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![ticker.to_uppercase(), limit as i64], Self::row_to_record)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    fn count(&self) -> Result<usize, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row("SELECT COUNT(*) FROM sec_filings", [], |r| r.get(0))
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}
