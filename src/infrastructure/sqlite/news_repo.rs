use crate::domain::error::DomainError;
use crate::domain::ports::news_repository::{NewsRepository, NewsRow};
use chrono::DateTime;
use rusqlite::{params, Connection};
use std::sync::Mutex;

const COLS: &str = "ticker, source, title, link, published, summary, article_text, summary_ai, sentiment, sentiment_score";

pub struct SqliteNewsRepo {
    conn: Mutex<Connection>,
}

impl SqliteNewsRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_record(row: &rusqlite::Row) -> Result<NewsRow, rusqlite::Error> {
        let published_str: Option<String> = row.get(4)?;
        Ok(NewsRow {
            ticker: row.get(0)?,
            source: row.get(1)?,
            title: row.get(2)?,
            link: row.get(3)?,
            published: published_str
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&chrono::Utc)),
            summary: row.get(5)?,
            article_text: row.get(6)?,
            summary_ai: row.get(7)?,
            sentiment: row.get(8)?,
            sentiment_score: row.get(9)?,
        })
    }
}

impl NewsRepository for SqliteNewsRepo {
    fn insert_batch(&self, rows: &[NewsRow]) -> Result<usize, DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        for row in rows {
            tx.execute(
                "INSERT INTO news (ticker, source, title, link, published, summary, article_text, summary_ai, sentiment, sentiment_score)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    row.ticker,
                    row.source,
                    row.title,
                    row.link,
                    row.published.map(|dt| dt.to_rfc3339()),
                    row.summary,
                    row.article_text,
                    row.summary_ai,
                    row.sentiment,
                    row.sentiment_score,
                ],
            )
            .map_err(|e| DomainError::Persistence(format!("news insert failed: {e}")))?;
        }
        tx.commit()
            .map_err(|e| DomainError::Persistence(format!("news batch commit failed: {e}")))?;
        Ok(rows.len())
    }

    fn query_by_ticker(&self, ticker: &str, limit: usize) -> Result<Vec<NewsRow>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        // Unknown publish times sort after dated rows.
        let sql = format!(
            "SELECT {COLS} FROM news WHERE ticker = ?1 ORDER BY published IS NULL, published DESC LIMIT ?2"
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
        conn.query_row("SELECT COUNT(*) FROM news", [], |r| r.get(0))
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}
