//! Units of review work and their finalized results.

use serde::{Deserialize, Serialize};

use super::labels::LabelVector;

/// One comment awaiting review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Position of the source row in the input feed
    pub source_index: usize,

    /// Content the comment replies to
    pub context: String,

    /// The comment being judged
    pub comment: String,

    /// Pre-filled labels shown to the reviewer
    pub initial_labels: LabelVector,
}

impl Record {
    /// Create a record with all labels unset
    pub fn new(source_index: usize, context: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            source_index,
            context: context.into(),
            comment: comment.into(),
            initial_labels: LabelVector::zeros(),
        }
    }

    /// Replace the initial labels
    pub fn with_labels(mut self, labels: LabelVector) -> Self {
        self.initial_labels = labels;
        self
    }
}

/// A reviewed record with the reviewer's final labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedRow {
    #[serde(rename = "original_index")]
    pub source_index: usize,
    pub context: String,
    pub comment: String,
    pub labels: LabelVector,
}

impl FinalizedRow {
    /// Pair a record with its confirmed labels
    pub fn from_record(record: &Record, labels: LabelVector) -> Self {
        Self {
            source_index: record.source_index,
            context: record.context.clone(),
            comment: record.comment.clone(),
            labels,
        }
    }
}
