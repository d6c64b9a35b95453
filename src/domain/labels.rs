//! Fixed-length binary label vectors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::VOTABLE_COUNT;

/// Reasons a submitted vector is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidVector {
    #[error("expected {expected} labels, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("label at position {index} must be 0 or 1, got {value}")]
    Value { index: usize, value: u8 },
}

/// One 0/1 flag per votable stance, position = stance id - 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct LabelVector([u8; VOTABLE_COUNT]);

impl Default for LabelVector {
    fn default() -> Self {
        Self::zeros()
    }
}

impl LabelVector {
    /// All stances unset
    pub fn zeros() -> Self {
        Self([0; VOTABLE_COUNT])
    }

    /// Set the flag at a vector position
    ///
    /// Positions past the end are ignored; callers derive positions from
    /// `StanceId::vector_index`, which never yields one.
    pub fn set(&mut self, index: usize) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = 1;
        }
    }

    /// Flip the flag at a vector position, returning the new state
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot ^= 1;
                *slot == 1
            }
            None => false,
        }
    }

    /// Whether the flag at a vector position is set
    pub fn is_set(&self, index: usize) -> bool {
        self.0.get(index).is_some_and(|v| *v == 1)
    }

    /// Number of set flags
    pub fn count_ones(&self) -> usize {
        self.0.iter().filter(|v| **v == 1).count()
    }

    /// Positions of set flags, ascending
    pub fn ones(&self) -> Vec<usize> {
        (0..VOTABLE_COUNT).filter(|i| self.is_set(*i)).collect()
    }

    /// Raw 0/1 values
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for LabelVector {
    type Error = InvalidVector;

    fn try_from(values: &[u8]) -> Result<Self, Self::Error> {
        if values.len() != VOTABLE_COUNT {
            return Err(InvalidVector::Length {
                expected: VOTABLE_COUNT,
                actual: values.len(),
            });
        }

        let mut labels = [0; VOTABLE_COUNT];
        for (index, (slot, &value)) in labels.iter_mut().zip(values).enumerate() {
            if value > 1 {
                return Err(InvalidVector::Value { index, value });
            }
            *slot = value;
        }

        Ok(Self(labels))
    }
}

impl TryFrom<Vec<u8>> for LabelVector {
    type Error = InvalidVector;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(values.as_slice())
    }
}

impl From<LabelVector> for Vec<u8> {
    fn from(labels: LabelVector) -> Self {
        labels.0.to_vec()
    }
}

impl std::fmt::Display for LabelVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for value in &self.0 {
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
