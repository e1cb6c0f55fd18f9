use mathmentor::solve::SOLVER_ERROR_STEP;
use mathmentor::{ErrorKind, Feedback, FeedbackLog, Pipeline, SolveError, SolveOutcome};

fn outcome(text: &str) -> SolveOutcome {
    Pipeline::default().run(text).expect("runs").solution
}

#[test]
fn records_append_as_json_lines() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log = FeedbackLog::new(dir.path().join("feedback.jsonl"));
    assert!(log.entries().expect("missing log reads as empty").is_empty());

    log.record("solve x + 2 = 5", &outcome("solve x + 2 = 5"), Feedback::Correct, None);
    log.record(
        "determinant of [1, 2], [3, 4]",
        &outcome("determinant of [1, 2], [3, 4]"),
        Feedback::Incorrect,
        Some("expected -2"),
    );

    let raw = std::fs::read_to_string(log.path()).expect("log written");
    assert_eq!(raw.lines().count(), 2);

    let entries = log.entries().expect("log readable");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].question, "solve x + 2 = 5");
    assert_eq!(entries[0].feedback, Feedback::Correct);
    assert_eq!(entries[0].solution.final_answer, "[3]");
    assert_eq!(entries[0].comment, None);
    assert_eq!(entries[1].feedback, Feedback::Incorrect);
    assert_eq!(entries[1].solution.final_answer, "-2");
    assert_eq!(entries[1].comment.as_deref(), Some("expected -2"));
    assert!(entries[0].timestamp <= entries[1].timestamp);
}

#[test]
fn failed_solutions_are_logged_as_solver_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log = FeedbackLog::new(dir.path().join("feedback.jsonl"));
    let failed: SolveOutcome = Err(SolveError::unhandled());
    log.record("maximize x", &failed, Feedback::Incorrect, None);

    let entries = log.entries().expect("log readable");
    assert_eq!(entries[0].solution.steps, vec![SOLVER_ERROR_STEP]);
    assert_eq!(entries[0].solution.final_answer, "Could not solve automatically");
    assert_eq!(entries[0].solution.error, Some(ErrorKind::Unhandled));
}

#[test]
fn malformed_lines_are_skipped() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("feedback.jsonl");
    std::fs::write(&path, "not json\n\n").expect("seed log");
    let log = FeedbackLog::new(&path);
    log.record("solve x = 1", &outcome("solve x = 1"), Feedback::Correct, None);

    let entries = log.entries().expect("log readable");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].question, "solve x = 1");
}

#[test]
fn unwritable_log_does_not_panic() {
    let dir = tempfile::tempdir().expect("temp dir");
    // A directory cannot be opened for appending.
    let log = FeedbackLog::new(dir.path());
    log.record("solve x = 1", &outcome("solve x = 1"), Feedback::Correct, None);
}

#[test]
fn feedback_parses_from_text() {
    assert_eq!("Correct".parse::<Feedback>(), Ok(Feedback::Correct));
    assert_eq!(" incorrect ".parse::<Feedback>(), Ok(Feedback::Incorrect));
    assert!("maybe".parse::<Feedback>().is_err());
    assert_eq!(Feedback::Incorrect.to_string(), "incorrect");
}
