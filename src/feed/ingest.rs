//! Turning feed rows into review records.
//!
//! Every row is processed. A row the provider cannot pre-label is reported
//! with its index and left out; the rest of the batch is kept.
//! Whether a partial batch is acceptable is the caller's decision.

use std::path::Path;

use tracing::{info, warn};

use super::loader::{load_feed, FeedError, FeedOptions};
use super::{FeedRow, RowFailure};
use crate::domain::Record;
use crate::session::Prelabel;

/// Records prepared for a session, plus the rows that were rejected
#[derive(Debug, Default)]
pub struct IngestReport {
    pub records: Vec<Record>,
    pub failures: Vec<RowFailure>,
}

impl IngestReport {
    /// Check if every row in the window became a record
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fail unless every row became a record
    pub fn require_clean(self) -> Result<Vec<Record>, Vec<RowFailure>> {
        if self.failures.is_empty() {
            Ok(self.records)
        } else {
            Err(self.failures)
        }
    }
}

/// Build records from rows using a pre-label provider
///
/// The provider's record cap applies to the rows in order; rejected rows
/// inside the cap still count toward it.
pub fn build_records(rows: Vec<FeedRow>, provider: &dyn Prelabel) -> IngestReport {
    let cap = provider.max_records().unwrap_or(usize::MAX);
    let mut report = IngestReport::default();

    for row in rows.into_iter().take(cap) {
        match provider.initial_labels(&row) {
            Ok(labels) => report
                .records
                .push(Record::new(row.index, row.context, row.comment).with_labels(labels)),
            Err(error) => {
                warn!(row = row.index, %error, "Rejecting row with unusable suggestions");
                report.failures.push(RowFailure {
                    index: row.index,
                    error,
                });
            }
        }
    }

    report
}

/// Load a feed and build records in one step
///
/// Loader and vectorization failures are merged and sorted by row index.
pub async fn ingest(
    path: &Path,
    options: &FeedOptions,
    provider: &dyn Prelabel,
) -> Result<IngestReport, FeedError> {
    let batch = load_feed(path, options).await?;
    let mut report = build_records(batch.rows, provider);

    let mut failures = batch.failures;
    failures.append(&mut report.failures);
    failures.sort_by_key(|f| f.index);
    report.failures = failures;

    info!(
        provider = provider.name(),
        records = report.records.len(),
        failures = report.failures.len(),
        "Feed ingested"
    );

    Ok(report)
}
