//! Review sessions.
//!
//! A session owns an ordered queue of records, a cursor and the rows
//! finalized so far. It performs no I/O; waiting for the reviewer is the
//! front-end's concern. Sessions live in memory only, so unexported
//! results are lost when the process exits.

pub mod provider;
pub mod review;

pub use provider::{DebugSample, Prelabel, PrelabelKind, SuggestionPrelabel, ZeroPrelabel};
pub use review::{Progress, ReviewSession, SessionError, SessionState};
