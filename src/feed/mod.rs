//! Input feed ingestion.
//!
//! A feed is an ordered table of rows, each with a context, a comment and
//! optionally a list of classifier-suggested stance names. This module
//! loads feeds from disk and builds review records, reporting failures
//! per row. Suggestion cells are kept as read and only parsed by a
//! provider that uses them.

pub mod ingest;
pub mod loader;
pub mod suggestions;

use thiserror::Error;

use crate::catalog::CatalogError;

pub use ingest::{build_records, ingest, IngestReport};
pub use loader::{load_feed, FeedBatch, FeedError, FeedFormat, FeedOptions};
pub use suggestions::{parse_suggestions, SuggestionError};

/// One row of an input feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRow {
    /// Zero-based position in the feed file
    pub index: usize,
    pub context: String,
    pub comment: String,
    /// Classifier-suggested stance names, if the feed carries them
    pub suggestions: Option<SuggestionCell>,
}

/// A suggestion cell as stored in the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionCell {
    /// Already a list of names (JSONL arrays)
    List(Vec<String>),

    /// Unparsed list text
    Raw(String),
}

impl SuggestionCell {
    /// Stance names in the cell, `None` when the cell is blank
    pub fn names(&self) -> Result<Option<Vec<String>>, SuggestionError> {
        match self {
            SuggestionCell::List(names) => Ok(Some(names.clone())),
            SuggestionCell::Raw(raw) => parse_suggestions(raw),
        }
    }
}

impl From<Vec<String>> for SuggestionCell {
    fn from(names: Vec<String>) -> Self {
        SuggestionCell::List(names)
    }
}

/// Why a single row was left out
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("malformed row: {0}")]
    Malformed(String),

    #[error("malformed suggestion list: {0}")]
    Suggestions(#[from] SuggestionError),

    #[error(transparent)]
    Stance(#[from] CatalogError),
}

/// A rejected row and the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub index: usize,
    pub error: RowError,
}

impl std::fmt::Display for RowFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.index, self.error)
    }
}
