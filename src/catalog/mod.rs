//! The fixed catalog of political stances.
//!
//! Ids 1..=28 are votable and map to label vector positions `id - 1`.
//! Id 29 is the sentinel ("no politically relevant opinion") and never
//! occupies a vector position.
//!
//! Topic groups exist for display only; nothing that enforces an
//! invariant consults them.

pub mod stance;
pub mod table;

pub use stance::{Catalog, CatalogError, Stance, StanceGroup, StanceId};
pub use table::{SENTINEL_ID, VOTABLE_COUNT};
