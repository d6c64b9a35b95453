//! Serializing finalized rows for download.
//!
//! CSV mirrors the spreadsheet reviewers already use: `original_index`,
//! `context`, `comment`, then one 0/1 column per votable stance, headed by
//! the stance name. JSONL carries the same data with the label vector as an
//! array plus the names of the checked stances.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::info;

use crate::catalog::Catalog;
use crate::domain::FinalizedRow;

/// Default export file name
pub const DEFAULT_EXPORT_FILE: &str = "verified_stances.csv";

/// Errors while writing an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write export {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}

/// Export file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Csv,
    Jsonl,
}

impl ExportFormat {
    /// Pick the layout from a file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        match path.extension().and_then(|e| e.to_str()) {
            None => Ok(ExportFormat::Csv),
            Some(ext) => match ext.to_lowercase().as_str() {
                "csv" => Ok(ExportFormat::Csv),
                "jsonl" | "ndjson" => Ok(ExportFormat::Jsonl),
                other => Err(ExportError::UnsupportedFormat(other.to_string())),
            },
        }
    }
}

/// A JSONL export line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportLine {
    pub original_index: usize,
    pub context: String,
    pub comment: String,
    pub labels: Vec<u8>,
    /// Names of the stances set to 1
    pub stances: Vec<String>,
}

/// Render rows as CSV with one named column per stance
pub fn to_csv(catalog: &Catalog, rows: &[FinalizedRow]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["original_index", "context", "comment"];
    header.extend(catalog.votable_names());
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.source_index.to_string(),
            row.context.clone(),
            row.comment.clone(),
        ];
        record.extend(row.labels.as_slice().iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))
}

/// Render rows as JSON lines
pub fn to_jsonl(catalog: &Catalog, rows: &[FinalizedRow]) -> Result<Vec<u8>, ExportError> {
    let names = catalog.votable_names();
    let mut out = Vec::new();

    for row in rows {
        let line = ExportLine {
            original_index: row.source_index,
            context: row.context.clone(),
            comment: row.comment.clone(),
            labels: row.labels.into(),
            stances: row
                .labels
                .ones()
                .into_iter()
                .map(|i| names[i].to_string())
                .collect(),
        };
        serde_json::to_writer(&mut out, &line)?;
        out.push(b'\n');
    }

    Ok(out)
}

/// Write rows to a file, choosing the layout from its extension
pub async fn write_export(
    catalog: &Catalog,
    rows: &[FinalizedRow],
    path: &Path,
) -> Result<ExportFormat, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let bytes = match format {
        ExportFormat::Csv => to_csv(catalog, rows)?,
        ExportFormat::Jsonl => to_jsonl(catalog, rows)?,
    };

    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    fs::write(path, bytes).await.map_err(io_err)?;

    info!(path = %path.display(), rows = rows.len(), "Export written");
    Ok(format)
}
