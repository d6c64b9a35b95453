//! Terminal front-end for a review session.
//!
//! Shows one record at a time with the stance checklist grouped by topic.
//! The reviewer toggles stances by id and presses Enter to verify and move
//! on. Reading from any `BufRead` and writing to any `Write` keeps the loop
//! testable without a terminal.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::catalog::{Catalog, StanceId};
use crate::domain::{LabelVector, Record};
use crate::session::ReviewSession;

const RULE_WIDTH: usize = 72;
const BAR_WIDTH: usize = 30;

/// How the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Every record was verified
    Completed,

    /// The reviewer quit (or input ended) with records left
    Quit,
}

/// A parsed line of reviewer input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewCommand {
    /// Verify the current labels and advance
    Submit,
    /// Flip the listed stances
    Toggle(Vec<StanceId>),
    /// Uncheck everything
    Clear,
    /// Restore the pre-filled labels
    Reset,
    Help,
    Quit,
}

/// Parse one line of input
///
/// Ids may be separated by spaces or commas. Only votable ids (1..=28) are
/// accepted; a line with any bad token is rejected as a whole.
pub fn parse_command(catalog: &Catalog, line: &str) -> Result<ReviewCommand, String> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "" => return Ok(ReviewCommand::Submit),
        "q" | "quit" => return Ok(ReviewCommand::Quit),
        "c" | "clear" => return Ok(ReviewCommand::Clear),
        "r" | "reset" => return Ok(ReviewCommand::Reset),
        "?" | "h" | "help" => return Ok(ReviewCommand::Help),
        _ => {}
    }

    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|token| {
            token
                .parse::<u8>()
                .ok()
                .and_then(|id| catalog.get(id).ok())
                .map(|stance| stance.id)
                .filter(|id| !id.is_sentinel())
                .ok_or_else(|| format!("Unknown stance id: {}", token))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(ReviewCommand::Toggle)
}

/// Drive a session until it completes or the reviewer quits
pub fn run_review<R: BufRead, W: Write>(
    session: &mut ReviewSession,
    catalog: &Catalog,
    input: &mut R,
    out: &mut W,
) -> Result<ReviewOutcome> {
    while !session.is_complete() {
        let record = session.current()?.clone();
        let mut labels = record.initial_labels;

        render_record(session, &record, out)?;
        render_checklist(catalog, &labels, out)?;

        loop {
            write!(out, "\nToggle ids, Enter to verify & next, ? for help > ")?;
            out.flush()?;

            let mut line = String::new();
            let read = input.read_line(&mut line).context("Failed to read reviewer input")?;
            if read == 0 {
                writeln!(out)?;
                return Ok(ReviewOutcome::Quit);
            }

            match parse_command(catalog, &line) {
                Ok(ReviewCommand::Submit) => {
                    session.submit(labels.as_slice())?;
                    break;
                }
                Ok(ReviewCommand::Quit) => return Ok(ReviewOutcome::Quit),
                Ok(ReviewCommand::Toggle(ids)) => {
                    for index in ids.iter().filter_map(|id| id.vector_index()) {
                        labels.toggle(index);
                    }
                    render_checklist(catalog, &labels, out)?;
                }
                Ok(ReviewCommand::Clear) => {
                    labels = LabelVector::zeros();
                    render_checklist(catalog, &labels, out)?;
                }
                Ok(ReviewCommand::Reset) => {
                    labels = record.initial_labels;
                    render_checklist(catalog, &labels, out)?;
                }
                Ok(ReviewCommand::Help) => render_help(out)?,
                Err(message) => writeln!(out, "{}", message)?,
            }
        }
    }

    writeln!(out, "\nVerification complete. You have reviewed all comments.")?;
    Ok(ReviewOutcome::Completed)
}

fn render_record<W: Write>(session: &ReviewSession, record: &Record, out: &mut W) -> Result<()> {
    let progress = session.progress();
    let filled = BAR_WIDTH * progress.reviewed / progress.total.max(1);

    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Comment {} of {}", progress.reviewed + 1, progress.total)?;
    writeln!(
        out,
        "[{}{}] {}% ({}/{})",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress.percent(),
        progress.reviewed,
        progress.total
    )?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "\nContext:\n  {}", record.context)?;
    writeln!(out, "\nComment:\n  {}", record.comment)?;
    Ok(())
}

fn render_checklist<W: Write>(catalog: &Catalog, labels: &LabelVector, out: &mut W) -> Result<()> {
    writeln!(out, "\nStances (check all that apply):")?;
    for group in catalog.list_groups() {
        writeln!(out, "  {}", group.title)?;
        for id in &group.members {
            let checked = id.vector_index().is_some_and(|i| labels.is_set(i));
            let name = catalog.stance_name(id.get())?;
            writeln!(
                out,
                "    [{}] {:>2}. {}",
                if checked { "x" } else { " " },
                id,
                name
            )?;
        }
    }
    Ok(())
}

fn render_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "  <ids>   toggle stances, e.g. '3 9' or '3,9'")?;
    writeln!(out, "  Enter   verify the checked stances and go to the next comment")?;
    writeln!(out, "  c       clear all checks")?;
    writeln!(out, "  r       restore the pre-filled checks")?;
    writeln!(out, "  q       quit")?;
    Ok(())
}
