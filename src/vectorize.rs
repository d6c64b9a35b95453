//! Mapping free-text stance suggestions to label vectors.
//!
//! The sentinel dominates: if it appears anywhere in the input the result
//! is all-zero, regardless of what else is present (unknown names
//! included). Otherwise every name is resolved by exact match and its
//! position set.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{Catalog, CatalogError};
use crate::domain::LabelVector;

/// How unresolvable names are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorizeMode {
    /// Any unknown name fails the whole derivation
    #[default]
    Strict,

    /// Unknown names are skipped with a warning
    Lenient,
}

impl std::fmt::Display for VectorizeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorizeMode::Strict => write!(f, "strict"),
            VectorizeMode::Lenient => write!(f, "lenient"),
        }
    }
}

impl std::str::FromStr for VectorizeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(VectorizeMode::Strict),
            "lenient" => Ok(VectorizeMode::Lenient),
            _ => anyhow::bail!("Unknown vectorize mode: {}", s),
        }
    }
}

/// Derives label vectors from stance names
#[derive(Debug, Clone, Copy)]
pub struct Vectorizer<'a> {
    catalog: &'a Catalog,
    mode: VectorizeMode,
}

impl<'a> Vectorizer<'a> {
    /// Create a vectorizer over a catalog
    pub fn new(catalog: &'a Catalog, mode: VectorizeMode) -> Self {
        Self { catalog, mode }
    }

    /// Build a 28-length vector from a sequence of stance names
    pub fn vector_from_names<I, S>(&self, names: I) -> Result<LabelVector, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();
        let sentinel = self.catalog.sentinel().name;

        if names.iter().any(|n| n.as_ref() == sentinel) {
            return Ok(LabelVector::zeros());
        }

        let mut labels = LabelVector::zeros();
        for name in &names {
            let name = name.as_ref();
            match self.catalog.resolve_name(name) {
                Ok(id) => {
                    if let Some(index) = id.vector_index() {
                        labels.set(index);
                    }
                }
                Err(e) => match self.mode {
                    VectorizeMode::Strict => return Err(e),
                    VectorizeMode::Lenient => {
                        warn!(stance = name, "Skipping unknown stance suggestion");
                    }
                },
            }
        }

        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABORTION: &str = "Support for abortion rights";
    const SENTINEL: &str = "Does not express any politically relevant opinion";

    #[test]
    fn test_single_suggestion() {
        let catalog = Catalog::new();
        let vectorizer = Vectorizer::new(&catalog, VectorizeMode::Strict);

        let labels = vectorizer.vector_from_names([ABORTION]).unwrap();
        assert_eq!(labels.ones(), vec![8]);
    }

    #[test]
    fn test_sentinel_dominates() {
        let catalog = Catalog::new();
        let vectorizer = Vectorizer::new(&catalog, VectorizeMode::Strict);

        let labels = vectorizer.vector_from_names([ABORTION, SENTINEL]).unwrap();
        assert_eq!(labels, LabelVector::zeros());

        let labels = vectorizer.vector_from_names([SENTINEL, ABORTION]).unwrap();
        assert_eq!(labels, LabelVector::zeros());
    }

    #[test]
    fn test_sentinel_wins_over_unknown_names() {
        let catalog = Catalog::new();
        let vectorizer = Vectorizer::new(&catalog, VectorizeMode::Strict);

        let labels = vectorizer
            .vector_from_names(["not a stance", SENTINEL])
            .unwrap();
        assert_eq!(labels, LabelVector::zeros());
    }

    #[test]
    fn test_strict_mode_fails_on_unknown() {
        let catalog = Catalog::new();
        let vectorizer = Vectorizer::new(&catalog, VectorizeMode::Strict);

        let result = vectorizer.vector_from_names([ABORTION, "Support for pizza"]);
        assert_eq!(
            result,
            Err(CatalogError::UnknownStance("Support for pizza".to_string()))
        );
    }

    #[test]
    fn test_lenient_mode_skips_unknown() {
        let catalog = Catalog::new();
        let vectorizer = Vectorizer::new(&catalog, VectorizeMode::Lenient);

        let labels = vectorizer
            .vector_from_names([ABORTION, "Support for pizza"])
            .unwrap();
        assert_eq!(labels.ones(), vec![8]);
    }

    #[test]
    fn test_order_independent_and_idempotent() {
        let catalog = Catalog::new();
        let vectorizer = Vectorizer::new(&catalog, VectorizeMode::Strict);
        let first = catalog.stance_name(1).unwrap();
        let last = catalog.stance_name(28).unwrap();

        let a = vectorizer.vector_from_names([first, last]).unwrap();
        let b = vectorizer.vector_from_names([last, first, last]).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.ones(), vec![0, 27]);
    }

    #[test]
    fn test_every_distinct_subset_count() {
        let catalog = Catalog::new();
        let vectorizer = Vectorizer::new(&catalog, VectorizeMode::Strict);
        let names = catalog.votable_names();

        for take in [0usize, 1, 5, 28] {
            let labels = vectorizer.vector_from_names(&names[..take]).unwrap();
            assert_eq!(labels.count_ones(), take);
            assert_eq!(labels.ones(), (0..take).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("strict".parse::<VectorizeMode>().unwrap(), VectorizeMode::Strict);
        assert_eq!("Lenient".parse::<VectorizeMode>().unwrap(), VectorizeMode::Lenient);
        assert!("loose".parse::<VectorizeMode>().is_err());
    }
}
