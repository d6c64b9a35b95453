//! Stance catalog with forward and reverse lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::table::{GROUPS, SENTINEL_ID, STANCES, VOTABLE_COUNT};

/// Errors from catalog lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Stance id not found: {0}")]
    NotFound(u8),

    #[error("Unknown stance: {0:?}")]
    UnknownStance(String),
}

/// Stable 1-based stance identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StanceId(u8);

impl StanceId {
    /// Get the raw id value
    pub fn get(self) -> u8 {
        self.0
    }

    /// Position of this stance in a label vector, `None` for the sentinel
    pub fn vector_index(self) -> Option<usize> {
        let index = usize::from(self.0).checked_sub(1)?;
        (index < VOTABLE_COUNT).then_some(index)
    }

    /// Whether this is the "no politically relevant opinion" sentinel
    pub fn is_sentinel(self) -> bool {
        self.0 == SENTINEL_ID
    }
}

impl std::fmt::Display for StanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stance {
    pub id: StanceId,
    pub name: &'static str,
    /// Topic group title (display only, `None` for the sentinel)
    pub group: Option<&'static str>,
}

/// Topic bucket used for display clustering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StanceGroup {
    pub title: &'static str,
    pub members: Vec<StanceId>,
}

/// The fixed stance catalog
///
/// Built once from the static table. Lookups by name use exact string
/// equality; there is no case folding or fuzzy matching.
#[derive(Debug, Clone)]
pub struct Catalog {
    stances: Vec<Stance>,
    groups: Vec<StanceGroup>,
    by_name: HashMap<&'static str, StanceId>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Build the catalog from the static stance table
    pub fn new() -> Self {
        let groups: Vec<StanceGroup> = GROUPS
            .iter()
            .map(|&(title, ids)| StanceGroup {
                title,
                members: ids.iter().copied().map(StanceId).collect(),
            })
            .collect();

        let stances: Vec<Stance> = STANCES
            .iter()
            .map(|&(id, name)| Stance {
                id: StanceId(id),
                name,
                group: groups
                    .iter()
                    .find(|g| g.members.contains(&StanceId(id)))
                    .map(|g| g.title),
            })
            .collect();

        let by_name = stances.iter().map(|s| (s.name, s.id)).collect();

        Self {
            stances,
            groups,
            by_name,
        }
    }

    /// Topic groups in display order
    pub fn list_groups(&self) -> &[StanceGroup] {
        &self.groups
    }

    /// Look up a stance name by id (1..=29)
    pub fn stance_name(&self, id: u8) -> Result<&'static str, CatalogError> {
        self.get(id).map(|s| s.name)
    }

    /// Look up a full catalog entry by id
    pub fn get(&self, id: u8) -> Result<&Stance, CatalogError> {
        usize::from(id)
            .checked_sub(1)
            .and_then(|index| self.stances.get(index))
            .ok_or(CatalogError::NotFound(id))
    }

    /// The 28 votable ids in declaration order
    pub fn votable_ids(&self) -> Vec<StanceId> {
        self.votable().map(|s| s.id).collect()
    }

    /// Names of the votable stances, in vector order
    pub fn votable_names(&self) -> Vec<&'static str> {
        self.votable().map(|s| s.name).collect()
    }

    /// Resolve an exact stance name to its id
    pub fn resolve_name(&self, name: &str) -> Result<StanceId, CatalogError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| CatalogError::UnknownStance(name.to_string()))
    }

    /// The sentinel entry
    pub fn sentinel(&self) -> &Stance {
        &self.stances[usize::from(SENTINEL_ID) - 1]
    }

    /// All entries including the sentinel
    pub fn stances(&self) -> &[Stance] {
        &self.stances
    }

    fn votable(&self) -> impl Iterator<Item = &Stance> {
        self.stances.iter().filter(|s| !s.id.is_sentinel())
    }
}
