use crate::domain::error::DomainError;
use crate::domain::ports::filing_repository::FilingRow;
use crate::domain::ports::news_repository::NewsRow;
use crate::domain::ports::snapshot_store::SnapshotStore;
use arrow_array::{ArrayRef, Float64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Append-only parquet lake: one file per run per kind under `dir`, named by
/// the run's wall-clock stamp. Files are never rewritten.
pub struct ParquetSnapshotStore {
    dir: PathBuf,
}

impl ParquetSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn write_batch(&self, path: &Path, batch: RecordBatch) -> Result<(), DomainError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| DomainError::Persistence(format!("lake dir create failed: {e}")))?;
        let file = File::create(path)
            .map_err(|e| DomainError::Persistence(format!("lake file create failed: {e}")))?;
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None)
            .map_err(|e| DomainError::Persistence(format!("parquet writer open failed: {e}")))?;
        writer
            .write(&batch)
            .map_err(|e| DomainError::Persistence(format!("parquet write failed: {e}")))?;
        writer
            .close()
            .map_err(|e| DomainError::Persistence(format!("parquet close failed: {e}")))?;
        Ok(())
    }
}

fn string_col(values: Vec<String>) -> ArrayRef {
    Arc::new(StringArray::from(values))
}

fn nullable_string_col(values: Vec<Option<String>>) -> ArrayRef {
    Arc::new(StringArray::from(values))
}

impl SnapshotStore for ParquetSnapshotStore {
    fn write_filings(&self, rows: &[FilingRow], stamp: &str) -> Result<PathBuf, DomainError> {
        let schema = Arc::new(Schema::new(vec![
            Field::new("cik", DataType::Utf8, false),
            Field::new("ticker", DataType::Utf8, false),
            Field::new("company_name", DataType::Utf8, false),
            Field::new("form", DataType::Utf8, false),
            Field::new("filing_date", DataType::Utf8, true),
            Field::new("accession_no", DataType::Utf8, false),
            Field::new("primary_doc", DataType::Utf8, false),
            Field::new("report_url", DataType::Utf8, false),
            Field::new("report_text", DataType::Utf8, false),
            Field::new("summary_ai", DataType::Utf8, false),
            Field::new("sentiment", DataType::Utf8, false),
            Field::new("sentiment_score", DataType::Float64, false),
        ]));

        let batch = RecordBatch::try_new(
            schema,
            vec![
                string_col(rows.iter().map(|r| r.cik.clone()).collect()),
                string_col(rows.iter().map(|r| r.ticker.clone()).collect()),
                string_col(rows.iter().map(|r| r.company_name.clone()).collect()),
                string_col(rows.iter().map(|r| r.form.clone()).collect()),
                nullable_string_col(
                    rows.iter()
                        .map(|r| r.filing_date.map(|d| d.format("%Y-%m-%d").to_string()))
                        .collect(),
                ),
                string_col(rows.iter().map(|r| r.accession_no.clone()).collect()),
                string_col(rows.iter().map(|r| r.primary_doc.clone()).collect()),
                string_col(rows.iter().map(|r| r.report_url.clone()).collect()),
                string_col(rows.iter().map(|r| r.report_text.clone()).collect()),
                string_col(rows.iter().map(|r| r.summary_ai.clone()).collect()),
                string_col(rows.iter().map(|r| r.sentiment.clone()).collect()),
                Arc::new(Float64Array::from(
                    rows.iter().map(|r| r.sentiment_score).collect::<Vec<_>>(),
                )),
            ],
        )
        .map_err(|e| DomainError::Persistence(format!("filing batch build failed: {e}")))?;

        let path = self.dir.join(format!("sec_filings_{stamp}.parquet"));
        self.write_batch(&path, batch)?;
        Ok(path)
    }

    fn write_news(&self, rows: &[NewsRow], stamp: &str) -> Result<PathBuf, DomainError> {
        let schema = Arc::new(Schema::new(vec![
            Field::new("ticker", DataType::Utf8, false),
            Field::new("source", DataType::Utf8, false),
            Field::new("title", DataType::Utf8, false),
            Field::new("link", DataType::Utf8, false),
            Field::new("published", DataType::Utf8, true),
            Field::new("summary", DataType::Utf8, false),
            Field::new("article_text", DataType::Utf8, false),
            Field::new("summary_ai", DataType::Utf8, false),
            Field::new("sentiment", DataType::Utf8, false),
            Field::new("sentiment_score", DataType::Float64, false),
        ]));

        let batch = RecordBatch::try_new(
            schema,
            vec![
                string_col(rows.iter().map(|r| r.ticker.clone()).collect()),
                string_col(rows.iter().map(|r| r.source.clone()).collect()),
                string_col(rows.iter().map(|r| r.title.clone()).collect()),
                string_col(rows.iter().map(|r| r.link.clone()).collect()),
                nullable_string_col(
                    rows.iter()
                        .map(|r| r.published.map(|dt| dt.to_rfc3339()))
                        .collect(),
                ),
                string_col(rows.iter().map(|r| r.summary.clone()).collect()),
                string_col(rows.iter().map(|r| r.article_text.clone()).collect()),
                string_col(rows.iter().map(|r| r.summary_ai.clone()).collect()),
                string_col(rows.iter().map(|r| r.sentiment.clone()).collect()),
                Arc::new(Float64Array::from(
                    rows.iter().map(|r| r.sentiment_score).collect::<Vec<_>>(),
                )),
            ],
        )
        .map_err(|e| DomainError::Persistence(format!("news batch build failed: {e}")))?;

        let path = self.dir.join(format!("news_{stamp}.parquet"));
        self.write_batch(&path, batch)?;
        Ok(path)
    }
}
