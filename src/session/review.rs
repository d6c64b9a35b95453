//! The review session state machine.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{FinalizedRow, InvalidVector, LabelVector, Record};

/// Errors from session operations
///
/// All of these are caller bugs; none are worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Invalid label vector: {0}")]
    InvalidVector(#[from] InvalidVector),

    #[error("Session is complete: all {0} records have been reviewed")]
    SessionComplete(usize),

    #[error("Session is not complete: {reviewed} of {total} records reviewed")]
    SessionNotComplete { reviewed: usize, total: usize },
}

/// State of a review session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Records remain to be reviewed
    Active,

    /// Every record has been reviewed
    Complete,
}

/// Review progress snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub reviewed: usize,
    pub total: usize,
}

impl Progress {
    /// Whole-number percentage reviewed (100 for an empty session)
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            self.reviewed * 100 / self.total
        }
    }
}

/// Ordered queue of records with a cursor and append-only results
///
/// Invariant: `results.len() == cursor`. `submit` is the only mutator and
/// is not idempotent; each `current`/`submit` pair must happen exactly once.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    records: Vec<Record>,
    cursor: usize,
    results: Vec<FinalizedRow>,
}

impl ReviewSession {
    /// Start a session over a fixed queue of records
    pub fn new(records: Vec<Record>) -> Self {
        let results = Vec::with_capacity(records.len());
        Self {
            records,
            cursor: 0,
            results,
        }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        if self.cursor < self.records.len() {
            SessionState::Active
        } else {
            SessionState::Complete
        }
    }

    /// Check if every record has been reviewed
    pub fn is_complete(&self) -> bool {
        self.state() == SessionState::Complete
    }

    /// Index of the next record to review
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of records in the queue
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the queue has no records at all
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reviewed and total counts
    pub fn progress(&self) -> Progress {
        Progress {
            reviewed: self.cursor,
            total: self.records.len(),
        }
    }

    /// The record awaiting review
    pub fn current(&self) -> Result<&Record, SessionError> {
        self.records
            .get(self.cursor)
            .ok_or(SessionError::SessionComplete(self.records.len()))
    }

    /// Confirm labels for the current record and advance
    ///
    /// Fails without mutating anything if the session is already complete
    /// or the vector is malformed, checked in that order.
    pub fn submit(&mut self, labels: &[u8]) -> Result<(), SessionError> {
        let record = self.current()?;
        let labels = LabelVector::try_from(labels)?;
        let row = FinalizedRow::from_record(record, labels);

        debug!(
            cursor = self.cursor,
            source_index = row.source_index,
            stances = labels.count_ones(),
            "Record reviewed"
        );

        self.results.push(row);
        self.cursor += 1;

        if self.is_complete() {
            info!(records = self.results.len(), "Review session complete");
        }

        Ok(())
    }

    /// Finalized rows, available once the session is complete
    pub fn export(&self) -> Result<&[FinalizedRow], SessionError> {
        if !self.is_complete() {
            return Err(SessionError::SessionNotComplete {
                reviewed: self.cursor,
                total: self.records.len(),
            });
        }
        Ok(&self.results)
    }

    /// Rows finalized so far, in review order
    pub fn results(&self) -> &[FinalizedRow] {
        &self.results
    }
}
