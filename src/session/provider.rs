//! Initial label vector providers.
//!
//! One session type serves every pre-labeling variant; the provider
//! decides what the reviewer sees pre-checked for each row.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::LabelVector;
use crate::feed::{FeedRow, RowError, SuggestionCell};
use crate::vectorize::{VectorizeMode, Vectorizer};

/// Record cap applied by the debug sample provider
pub const DEBUG_SAMPLE_SIZE: usize = 10;

/// Strategy for a record's pre-filled labels
pub trait Prelabel {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Labels shown pre-checked for a feed row
    fn initial_labels(&self, row: &FeedRow) -> Result<LabelVector, RowError>;

    /// Upper bound on records this provider prepares
    fn max_records(&self) -> Option<usize> {
        None
    }
}

/// Every record starts with no stances checked
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroPrelabel;

impl Prelabel for ZeroPrelabel {
    fn name(&self) -> &str {
        "none"
    }

    fn initial_labels(&self, _row: &FeedRow) -> Result<LabelVector, RowError> {
        Ok(LabelVector::zeros())
    }
}

/// Pre-checks the stances an automated classifier suggested
#[derive(Debug, Clone, Copy)]
pub struct SuggestionPrelabel<'a> {
    vectorizer: Vectorizer<'a>,
}

impl<'a> SuggestionPrelabel<'a> {
    pub fn new(catalog: &'a Catalog, mode: VectorizeMode) -> Self {
        Self {
            vectorizer: Vectorizer::new(catalog, mode),
        }
    }
}

impl Prelabel for SuggestionPrelabel<'_> {
    fn name(&self) -> &str {
        "suggestions"
    }

    fn initial_labels(&self, row: &FeedRow) -> Result<LabelVector, RowError> {
        let names = row
            .suggestions
            .as_ref()
            .map(SuggestionCell::names)
            .transpose()?
            .flatten();

        match names {
            Some(names) => Ok(self.vectorizer.vector_from_names(&names)?),
            None => Ok(LabelVector::zeros()),
        }
    }
}

/// Small fixed sample with no pre-labels, for trying the tool out
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugSample;

impl Prelabel for DebugSample {
    fn name(&self) -> &str {
        "sample"
    }

    fn initial_labels(&self, _row: &FeedRow) -> Result<LabelVector, RowError> {
        Ok(LabelVector::zeros())
    }

    fn max_records(&self) -> Option<usize> {
        Some(DEBUG_SAMPLE_SIZE)
    }
}

/// Provider selection for config files and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrelabelKind {
    #[default]
    None,
    Suggestions,
    Sample,
}

impl PrelabelKind {
    /// Build the provider this kind names
    pub fn provider<'a>(self, catalog: &'a Catalog, mode: VectorizeMode) -> Box<dyn Prelabel + 'a> {
        match self {
            PrelabelKind::None => Box::new(ZeroPrelabel),
            PrelabelKind::Suggestions => Box::new(SuggestionPrelabel::new(catalog, mode)),
            PrelabelKind::Sample => Box::new(DebugSample),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(suggestions: Option<Vec<&str>>) -> FeedRow {
        let cell = suggestions.map(|s| SuggestionCell::List(s.into_iter().map(String::from).collect()));
        raw_row(cell)
    }

    fn raw_row(suggestions: Option<SuggestionCell>) -> FeedRow {
        FeedRow {
            index: 0,
            context: "ctx".to_string(),
            comment: "comment".to_string(),
            suggestions,
        }
    }

    #[test]
    fn test_zero_prelabel_ignores_suggestions() {
        let labels = ZeroPrelabel
            .initial_labels(&row(Some(vec!["Support for abortion rights"])))
            .unwrap();
        assert_eq!(labels, LabelVector::zeros());
        assert_eq!(ZeroPrelabel.max_records(), None);
    }

    #[test]
    fn test_unparseable_cell_only_matters_to_suggestions() {
        let broken = raw_row(Some(SuggestionCell::Raw("[broken".to_string())));

        assert_eq!(ZeroPrelabel.initial_labels(&broken).unwrap(), LabelVector::zeros());
        assert_eq!(DebugSample.initial_labels(&broken).unwrap(), LabelVector::zeros());

        let catalog = Catalog::new();
        let provider = SuggestionPrelabel::new(&catalog, VectorizeMode::Strict);
        assert!(matches!(
            provider.initial_labels(&broken),
            Err(RowError::Suggestions(_))
        ));
    }

    #[test]
    fn test_suggestion_prelabel_parses_raw_cells() {
        let catalog = Catalog::new();
        let provider = SuggestionPrelabel::new(&catalog, VectorizeMode::Strict);

        let cell = SuggestionCell::Raw("['Support for abortion rights', \"Support for abortion ban\"]".to_string());
        let labels = provider.initial_labels(&raw_row(Some(cell))).unwrap();
        assert_eq!(labels.ones(), vec![8, 9]);

        let blank = raw_row(Some(SuggestionCell::Raw("  ".to_string())));
        assert_eq!(provider.initial_labels(&blank).unwrap(), LabelVector::zeros());
    }

    #[test]
    fn test_suggestion_prelabel() {
        let catalog = Catalog::new();
        let provider = SuggestionPrelabel::new(&catalog, VectorizeMode::Strict);

        let labels = provider
            .initial_labels(&row(Some(vec!["Support for abortion rights"])))
            .unwrap();
        assert_eq!(labels.ones(), vec![8]);

        let labels = provider.initial_labels(&row(None)).unwrap();
        assert_eq!(labels, LabelVector::zeros());
    }

    #[test]
    fn test_debug_sample_caps_records() {
        assert_eq!(DebugSample.max_records(), Some(DEBUG_SAMPLE_SIZE));
    }

    #[test]
    fn test_kind_builds_matching_provider() {
        let catalog = Catalog::new();

        for (kind, name) in [
            (PrelabelKind::None, "none"),
            (PrelabelKind::Suggestions, "suggestions"),
            (PrelabelKind::Sample, "sample"),
        ] {
            assert_eq!(kind.provider(&catalog, VectorizeMode::Strict).name(), name);
        }
    }
}
