//! Command-line interface for stance-verifier.
//!
//! Provides commands for reviewing a feed interactively, checking a feed
//! for bad rows, listing the stance catalog, vectorizing suggestion lists,
//! and showing the resolved configuration.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::catalog::Catalog;
use crate::config::{self, ReviewSettings};
use crate::domain::FinalizedRow;
use crate::export::{write_export, DEFAULT_EXPORT_FILE};
use crate::feed::{self, FeedOptions, IngestReport};
use crate::session::{PrelabelKind, ReviewSession};
use crate::vectorize::{VectorizeMode, Vectorizer};

pub mod review;

pub use review::{parse_command, run_review, ReviewCommand, ReviewOutcome};

/// stance-verifier - Review political stance labels one comment at a time
#[derive(Parser, Debug)]
#[command(name = "stance-verifier")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Feed selection shared by `review` and `ingest`
#[derive(clap::Args, Debug, Clone)]
pub struct FeedArgs {
    /// Input feed (.jsonl or .csv)
    pub input: PathBuf,

    /// How records are pre-labeled
    #[arg(short, long, value_enum)]
    pub prelabel: Option<PrelabelArg>,

    /// Rows to skip from the start of the feed
    #[arg(long)]
    pub offset: Option<usize>,

    /// Maximum rows to review
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// How unknown suggested stances are handled
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Header of the suggestion column in CSV feeds
    #[arg(long)]
    pub suggestion_column: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Review a feed interactively and export the verified labels
    Review {
        #[command(flatten)]
        feed: FeedArgs,

        /// Export path (.csv or .jsonl; defaults to the export directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Refuse to start if any row in the window was rejected
        #[arg(long)]
        strict_batch: bool,

        /// Export the rows reviewed so far if you quit early
        #[arg(long)]
        allow_partial: bool,
    },

    /// Check a feed and report rows that cannot be reviewed
    Ingest {
        #[command(flatten)]
        feed: FeedArgs,
    },

    /// List the stance catalog grouped by topic
    Stances {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert stance names to a label vector
    Vectorize {
        /// Stance names, exactly as they appear in the catalog
        names: Vec<String>,

        /// Skip unknown names instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Pre-label source for CLI (maps to PrelabelKind)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PrelabelArg {
    /// No pre-labels
    None,

    /// Pre-check the feed's suggested stances
    Suggestions,

    /// First ten rows, no pre-labels
    Sample,
}

impl From<PrelabelArg> for PrelabelKind {
    fn from(arg: PrelabelArg) -> Self {
        match arg {
            PrelabelArg::None => PrelabelKind::None,
            PrelabelArg::Suggestions => PrelabelKind::Suggestions,
            PrelabelArg::Sample => PrelabelKind::Sample,
        }
    }
}

/// Vectorize mode for CLI (maps to VectorizeMode)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Strict,
    Lenient,
}

impl From<ModeArg> for VectorizeMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Strict => VectorizeMode::Strict,
            ModeArg::Lenient => VectorizeMode::Lenient,
        }
    }
}

impl FeedArgs {
    /// Apply command-line overrides on top of configured settings
    fn settings(&self, base: &ReviewSettings) -> ReviewSettings {
        ReviewSettings {
            batch_offset: self.offset.unwrap_or(base.batch_offset),
            batch_size: self.limit.unwrap_or(base.batch_size),
            prelabel: self.prelabel.map(Into::into).unwrap_or(base.prelabel),
            vectorize_mode: self.mode.map(Into::into).unwrap_or(base.vectorize_mode),
            suggestion_column: self
                .suggestion_column
                .clone()
                .unwrap_or_else(|| base.suggestion_column.clone()),
            allow_partial_export: base.allow_partial_export,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Review {
                feed,
                output,
                strict_batch,
                allow_partial,
            } => review_feed(&feed, output, strict_batch, allow_partial).await,
            Commands::Ingest { feed } => check_feed(&feed).await,
            Commands::Stances { json } => list_stances(json),
            Commands::Vectorize { names, lenient } => vectorize_names(&names, lenient),
            Commands::Config => show_config(),
        }
    }
}

/// Load the feed window and build records
async fn load_records(
    catalog: &Catalog,
    path: &Path,
    settings: &ReviewSettings,
) -> Result<IngestReport> {
    let options = FeedOptions {
        offset: settings.batch_offset,
        limit: Some(settings.batch_size),
        suggestion_column: settings.suggestion_column.clone(),
    };
    let provider = settings.prelabel.provider(catalog, settings.vectorize_mode);

    feed::ingest(path, &options, provider.as_ref())
        .await
        .with_context(|| format!("Failed to load feed: {}", path.display()))
}

fn print_failures(report: &IngestReport) {
    if report.failures.is_empty() {
        return;
    }
    eprintln!("{} row(s) rejected:", report.failures.len());
    for failure in &report.failures {
        eprintln!("  {}", failure);
    }
}

/// Fail if any row in the window was rejected
fn ensure_clean(report: &IngestReport) -> Result<()> {
    if !report.is_clean() {
        anyhow::bail!("{} row(s) rejected", report.failures.len());
    }
    Ok(())
}

/// Refuse to start on a batch with rejected rows when asked to
fn check_batch(report: &IngestReport, strict_batch: bool) -> Result<()> {
    if strict_batch {
        ensure_clean(report).context("Refusing to review; fix the feed or drop --strict-batch")?;
    }
    Ok(())
}

/// Rows to export once the review loop ends
///
/// `None` means the reviewer quit and partial export is off.
fn rows_to_export(
    session: &ReviewSession,
    outcome: ReviewOutcome,
    allow_partial: bool,
) -> Result<Option<&[FinalizedRow]>> {
    match outcome {
        ReviewOutcome::Completed => Ok(Some(session.export()?)),
        ReviewOutcome::Quit if allow_partial => Ok(Some(session.results())),
        ReviewOutcome::Quit => Ok(None),
    }
}

/// Review a feed interactively
async fn review_feed(
    args: &FeedArgs,
    output: Option<PathBuf>,
    strict_batch: bool,
    allow_partial: bool,
) -> Result<()> {
    let cfg = config::config()?;
    let settings = args.settings(&cfg.review);
    let catalog = Catalog::new();

    let report = load_records(&catalog, &args.input, &settings).await?;
    print_failures(&report);
    check_batch(&report, strict_batch)?;

    let mut session = ReviewSession::new(report.records);
    if session.is_empty() {
        anyhow::bail!("No records to review in {}", args.input.display());
    }

    let outcome = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout().lock();
        run_review(&mut session, &catalog, &mut input, &mut out)?
    };

    let allow_partial = allow_partial || settings.allow_partial_export;
    let rows = match rows_to_export(&session, outcome, allow_partial)? {
        Some(rows) => rows,
        None => {
            eprintln!(
                "Stopped after {} of {} comments; nothing exported (use --allow-partial to keep them)",
                session.cursor(),
                session.len()
            );
            return Ok(());
        }
    };

    if rows.is_empty() {
        eprintln!("No comments reviewed; nothing exported");
        return Ok(());
    }

    let path = match output {
        Some(path) => path,
        None => config::exports_dir()?.join(DEFAULT_EXPORT_FILE),
    };
    write_export(&catalog, rows, &path)
        .await
        .with_context(|| format!("Failed to export to {}", path.display()))?;

    eprintln!("Exported {} verified comment(s) to {}", rows.len(), path.display());
    Ok(())
}

/// Report rows that would be rejected
async fn check_feed(args: &FeedArgs) -> Result<()> {
    let cfg = config::config()?;
    let settings = args.settings(&cfg.review);
    let catalog = Catalog::new();

    let report = load_records(&catalog, &args.input, &settings).await?;

    println!("Records ready: {}", report.records.len());
    println!(
        "Pre-labeled:   {}",
        report
            .records
            .iter()
            .filter(|r| r.initial_labels.count_ones() > 0)
            .count()
    );
    println!("Rejected:      {}", report.failures.len());
    for failure in &report.failures {
        println!("  {}", failure);
    }

    ensure_clean(&report)
}

/// List the catalog
fn list_stances(json: bool) -> Result<()> {
    let catalog = Catalog::new();

    if json {
        println!("{}", serde_json::to_string_pretty(catalog.stances())?);
        return Ok(());
    }

    for group in catalog.list_groups() {
        println!("{}", group.title);
        for id in &group.members {
            println!("  {:>2}. {}", id, catalog.stance_name(id.get())?);
        }
    }
    let sentinel = catalog.sentinel();
    println!("\n  {:>2}. {} (excluded from label vectors)", sentinel.id, sentinel.name);

    Ok(())
}

/// Print the label vector for a list of names
fn vectorize_names(names: &[String], lenient: bool) -> Result<()> {
    let catalog = Catalog::new();
    let mode = if lenient {
        VectorizeMode::Lenient
    } else {
        VectorizeMode::Strict
    };

    let labels = Vectorizer::new(&catalog, mode).vector_from_names(names)?;
    println!("{}", labels);
    for index in labels.ones() {
        let id = catalog.votable_ids()[index];
        println!("  {:>2}. {}", id, catalog.stance_name(id.get())?);
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("Config file: {}", cfg.config_file.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "(none - using defaults)".to_string()));
    println!();
    println!("Paths:");
    println!("  Home:    {}", cfg.home.display());
    println!("  Exports: {}", cfg.exports.display());
    println!();
    println!("Review:");
    println!("  Batch offset:    {}", cfg.review.batch_offset);
    println!("  Batch size:      {}", cfg.review.batch_size);
    println!("  Pre-labels:      {:?}", cfg.review.prelabel);
    println!("  Vectorize mode:  {}", cfg.review.vectorize_mode);
    println!("  Suggestion col:  {}", cfg.review.suggestion_column);
    println!("  Partial export:  {}", cfg.review.allow_partial_export);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;
    use crate::feed::{RowError, RowFailure};

    fn session(n: usize) -> ReviewSession {
        let records = (0..n)
            .map(|i| Record::new(i, format!("context {}", i), format!("comment {}", i)))
            .collect();
        ReviewSession::new(records)
    }

    #[test]
    fn test_strict_batch_refuses_rejected_rows() {
        let mut report = IngestReport::default();
        report.records.push(Record::new(0, "ctx", "comment"));
        assert!(check_batch(&report, true).is_ok());

        report.failures.push(RowFailure {
            index: 1,
            error: RowError::Malformed("not json".to_string()),
        });
        assert!(check_batch(&report, false).is_ok());

        let err = check_batch(&report, true).unwrap_err();
        assert!(err.to_string().contains("--strict-batch"));
        assert!(format!("{:#}", err).contains("1 row(s) rejected"));
    }

    #[test]
    fn test_rejected_rows_fail_feed_check() {
        let mut report = IngestReport::default();
        assert!(ensure_clean(&report).is_ok());

        for index in [2, 5] {
            report.failures.push(RowFailure {
                index,
                error: RowError::Malformed("bad".to_string()),
            });
        }
        let err = ensure_clean(&report).unwrap_err();
        assert_eq!(err.to_string(), "2 row(s) rejected");
    }

    #[test]
    fn test_completed_review_exports_every_row() {
        let mut session = session(2);
        session.submit(&[0; 28]).unwrap();
        session.submit(&[1; 28]).unwrap();

        let rows = rows_to_export(&session, ReviewOutcome::Completed, false)
            .unwrap()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].labels.count_ones(), 28);
    }

    #[test]
    fn test_quit_exports_partial_rows_only_when_allowed() {
        let mut session = session(3);
        session.submit(&[0; 28]).unwrap();

        assert!(rows_to_export(&session, ReviewOutcome::Quit, false)
            .unwrap()
            .is_none());

        let rows = rows_to_export(&session, ReviewOutcome::Quit, true)
            .unwrap()
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source_index, 0);
    }

    #[test]
    fn test_completed_outcome_on_unfinished_session_fails() {
        let session = session(2);
        assert!(rows_to_export(&session, ReviewOutcome::Completed, true).is_err());
    }
}
