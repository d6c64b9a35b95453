//! Domain types for the review loop.
//!
//! - LabelVector: one 0/1 flag per votable stance
//! - Record: a comment awaiting review
//! - FinalizedRow: a reviewed comment with its confirmed labels

pub mod labels;
pub mod record;

pub use labels::{InvalidVector, LabelVector};
pub use record::{FinalizedRow, Record};
