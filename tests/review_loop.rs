//! Review Loop Integration Tests
//!
//! Drives the terminal front-end with scripted reviewer input.

use std::io::Cursor;

use stance_verifier::cli::{run_review, ReviewOutcome};
use stance_verifier::{Catalog, LabelVector, Record, ReviewSession};

fn session(n: usize) -> ReviewSession {
    let records = (0..n)
        .map(|i| Record::new(i, format!("context {}", i), format!("comment {}", i)))
        .collect();
    ReviewSession::new(records)
}

fn drive(session: &mut ReviewSession, script: &str) -> (ReviewOutcome, String) {
    let catalog = Catalog::new();
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut out = Vec::new();
    let outcome = run_review(session, &catalog, &mut input, &mut out).unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn test_toggle_and_submit_all() {
    let mut session = session(2);
    let (outcome, output) = drive(&mut session, "1 9\n\n9,28\nc\n28\n\n");

    assert_eq!(outcome, ReviewOutcome::Completed);
    assert!(output.contains("Comment 1 of 2"));
    assert!(output.contains("Comment 2 of 2"));
    assert!(output.contains("Verification complete"));

    let rows = session.export().unwrap();
    assert_eq!(rows[0].labels.ones(), vec![0, 8]);
    assert_eq!(rows[1].labels.ones(), vec![27]);
}

#[test]
fn test_quit_keeps_partial_results() {
    let mut session = session(3);
    let (outcome, _) = drive(&mut session, "5\n\nq\n");

    assert_eq!(outcome, ReviewOutcome::Quit);
    assert_eq!(session.cursor(), 1);
    assert_eq!(session.results()[0].labels.ones(), vec![4]);
    assert!(session.export().is_err());
}

#[test]
fn test_end_of_input_quits() {
    let mut session = session(2);
    let (outcome, _) = drive(&mut session, "\n");

    assert_eq!(outcome, ReviewOutcome::Quit);
    assert_eq!(session.cursor(), 1);
}

#[test]
fn test_bad_ids_leave_labels_unchanged() {
    let mut session = session(1);
    let (outcome, output) = drive(&mut session, "3 29\n\n");

    assert_eq!(outcome, ReviewOutcome::Completed);
    assert!(output.contains("Unknown stance id: 29"));
    assert_eq!(session.export().unwrap()[0].labels, LabelVector::zeros());
}

#[test]
fn test_reset_restores_prelabels() {
    let mut labels = LabelVector::zeros();
    labels.set(8);
    let record = Record::new(0, "ctx", "comment").with_labels(labels);
    let mut session = ReviewSession::new(vec![record]);

    let (outcome, output) = drive(&mut session, "9 10\nr\n\n");

    assert_eq!(outcome, ReviewOutcome::Completed);
    assert!(output.contains("[x]  9. Support for abortion rights"));
    assert_eq!(session.export().unwrap()[0].labels.ones(), vec![8]);
}
