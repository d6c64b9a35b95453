//! Loading input feeds from disk.
//!
//! Two layouts are supported, chosen by file extension:
//! - `.jsonl`: one object per line with `context`, `comment` and an
//!   optional `suggestions` field (array or raw list text)
//! - `.csv`: header row with `Context`, `Comment` and an optional
//!   suggestion column
//!
//! File-level problems (unreadable file, missing columns) fail the load.
//! Row-level problems are collected so one bad row never hides the rest.
//! Suggestion cells are not parsed here; a row with unusable suggestions
//! is only rejected by a provider that reads them.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

use super::{FeedRow, RowError, RowFailure, SuggestionCell};

/// Default header of the suggestion column in CSV feeds
pub const DEFAULT_SUGGESTION_COLUMN: &str = "Suggestions";

/// Errors that fail a whole feed
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to read feed {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Feed is missing required column: {0}")]
    MissingColumn(String),

    #[error("Unsupported feed format: {0} (expected .jsonl or .csv)")]
    UnsupportedFormat(String),
}

/// On-disk layout of a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Jsonl,
    Csv,
}

impl FeedFormat {
    /// Detect the layout from a file extension
    pub fn from_path(path: &Path) -> Result<Self, FeedError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "jsonl" | "ndjson" => Ok(FeedFormat::Jsonl),
            "csv" => Ok(FeedFormat::Csv),
            _ => Err(FeedError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Which slice of the feed to load
#[derive(Debug, Clone)]
pub struct FeedOptions {
    /// Rows to skip from the start of the feed
    pub offset: usize,

    /// Maximum rows to take after the offset
    pub limit: Option<usize>,

    /// Header of the suggestion column (CSV only)
    pub suggestion_column: String,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: None,
            suggestion_column: DEFAULT_SUGGESTION_COLUMN.to_string(),
        }
    }
}

impl FeedOptions {
    fn in_window(&self, index: usize) -> bool {
        index >= self.offset && self.limit.map_or(true, |limit| index - self.offset < limit)
    }
}

/// Rows loaded from a feed, plus the rows that could not be read
#[derive(Debug, Default)]
pub struct FeedBatch {
    pub rows: Vec<FeedRow>,
    pub failures: Vec<RowFailure>,
}

impl FeedBatch {
    fn push(&mut self, index: usize, row: Result<FeedRow, RowError>) {
        match row {
            Ok(row) => self.rows.push(row),
            Err(error) => {
                warn!(row = index, %error, "Skipping unreadable feed row");
                self.failures.push(RowFailure { index, error });
            }
        }
    }
}

/// Load a feed file
pub async fn load_feed(path: &Path, options: &FeedOptions) -> Result<FeedBatch, FeedError> {
    let format = FeedFormat::from_path(path)?;
    let content = fs::read_to_string(path).await.map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let batch = match format {
        FeedFormat::Jsonl => parse_jsonl(&content, options),
        FeedFormat::Csv => parse_csv(&content, options)?,
    };

    debug!(
        path = %path.display(),
        rows = batch.rows.len(),
        failures = batch.failures.len(),
        "Feed loaded"
    );

    Ok(batch)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SuggestionField {
    List(Vec<String>),
    Raw(String),
}

impl From<SuggestionField> for SuggestionCell {
    fn from(field: SuggestionField) -> Self {
        match field {
            SuggestionField::List(names) => SuggestionCell::List(names),
            SuggestionField::Raw(raw) => SuggestionCell::Raw(raw),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonRow {
    #[serde(alias = "Context")]
    context: String,
    #[serde(alias = "Comment")]
    comment: String,
    #[serde(default, alias = "Suggestions")]
    suggestions: Option<SuggestionField>,
}

/// Parse JSONL feed content
///
/// Blank lines are ignored and do not count as rows.
pub fn parse_jsonl(content: &str, options: &FeedOptions) -> FeedBatch {
    let mut batch = FeedBatch::default();

    let lines = content.lines().filter(|l| !l.trim().is_empty());
    for (index, line) in lines.enumerate() {
        if !options.in_window(index) {
            continue;
        }

        let row = serde_json::from_str::<JsonRow>(line)
            .map(|row| FeedRow {
                index,
                context: row.context,
                comment: row.comment,
                suggestions: row.suggestions.map(Into::into),
            })
            .map_err(|e| RowError::Malformed(e.to_string()));

        batch.push(index, row);
    }

    batch
}

/// Parse CSV feed content
pub fn parse_csv(content: &str, options: &FeedOptions) -> Result<FeedBatch, FeedError> {
    let mut reader = csv::ReaderBuilder::new().from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let required = |name: &str| column(name).ok_or_else(|| FeedError::MissingColumn(name.to_string()));
    let context_col = required("Context")?;
    let comment_col = required("Comment")?;
    let suggestion_col = column(&options.suggestion_column);

    let mut batch = FeedBatch::default();
    for (index, record) in reader.records().enumerate() {
        if !options.in_window(index) {
            continue;
        }

        let row = record
            .map(|record| {
                let field = |col: usize| record.get(col).unwrap_or_default().to_string();
                FeedRow {
                    index,
                    context: field(context_col),
                    comment: field(comment_col),
                    suggestions: suggestion_col
                        .map(field)
                        .filter(|cell| !cell.trim().is_empty())
                        .map(SuggestionCell::Raw),
                }
            })
            .map_err(|e| RowError::Malformed(e.to_string()));

        batch.push(index, row);
    }

    Ok(batch)
}
