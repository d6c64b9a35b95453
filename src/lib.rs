//! stance-verifier - Single-annotator stance labeling
//!
//! A reviewer reads a social-media comment and the content it replies to,
//! checks which of 28 political stances it expresses, and moves on. The
//! verified labels accumulate into a table for export.
//!
//! # Architecture
//!
//! - A fixed stance catalog (28 votable stances plus a "no opinion"
//!   sentinel) with exact name lookup
//! - A vectorizer that turns classifier-suggested stance names into
//!   28-length 0/1 label vectors
//! - A review session: records, a cursor, and append-only results
//! - Pluggable pre-label providers (none, suggestions, debug sample)
//!
//! # Modules
//!
//! - `catalog`: Stance table, topic groups, reverse lookup
//! - `domain`: Data structures (LabelVector, Record, FinalizedRow)
//! - `vectorize`: Suggestion names to label vectors
//! - `session`: Review state machine and pre-label providers
//! - `feed`: Input loading and per-row error collection
//! - `export`: CSV and JSONL output
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Review the first 50 rows of a feed with AI pre-labels
//! stance-verifier review samples.csv --prelabel suggestions
//!
//! # Check which rows of a feed would be rejected
//! stance-verifier ingest samples.jsonl --prelabel suggestions
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod feed;
pub mod session;
pub mod vectorize;

// Re-export main types at crate root for convenience
pub use catalog::{Catalog, CatalogError, StanceId};
pub use domain::{FinalizedRow, LabelVector, Record};
pub use session::{Prelabel, PrelabelKind, ReviewSession, SessionError, SessionState};
pub use vectorize::{VectorizeMode, Vectorizer};
