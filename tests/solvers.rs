use std::time::{Duration, Instant};

use mathmentor::{
    Answer, ErrorKind, LimitValue, SolveOutcome, SolverConfig, SolverResult, parse_problem,
    route_problem, solve_problem,
};

fn solve_with(text: &str, config: &SolverConfig) -> SolveOutcome {
    let parsed = parse_problem(text);
    let route = route_problem(&parsed);
    solve_problem(&parsed, &route, config)
}

fn solved(text: &str) -> SolverResult {
    match solve_with(text, &SolverConfig::default()) {
        Ok(result) => result,
        Err(err) => panic!("{text:?} failed: {err}"),
    }
}

fn failure(text: &str) -> ErrorKind {
    match solve_with(text, &SolverConfig::default()) {
        Ok(result) => panic!("{text:?} unexpectedly solved: {}", result.final_answer),
        Err(err) => err.kind,
    }
}

fn assert_answer(text: &str, expected: &str) {
    let result = solved(text);
    assert_eq!(result.final_answer.to_string(), expected, "answer for {text:?}");
}

#[test]
fn linear_equation() {
    let result = solved("solve x + 2 = 5");
    assert_eq!(
        result.steps,
        vec!["Converted equation to symbolic form", "Solved for x"]
    );
    assert_eq!(result.final_answer.to_string(), "[3]");
}

#[test]
fn polynomial_equations() {
    assert_answer("solve x^2 - 5x + 6 = 0", "[2, 3]");
    assert_answer("Solve for x: x^2 = 4", "[-2, 2]");
    assert_answer("solve 2x = 1", "[1/2]");
}

#[test]
fn no_real_roots_is_reported() {
    let result = solved("solve x^2 + 1 = 0");
    assert_eq!(
        result.steps,
        vec!["Converted equation to symbolic form", "Solved for x", "No real roots"]
    );
    assert_eq!(result.final_answer, Answer::Roots(Vec::new()));
}

#[test]
fn large_constants_finish_quickly() {
    let started = Instant::now();
    let result = solved("solve x^2 = 10000000000000007");
    assert_eq!(
        result.final_answer.to_string(),
        "[-sqrt(10000000000000007), sqrt(10000000000000007)]"
    );
    assert_eq!(failure("solve x^3 + x = 10000000000000007"), ErrorKind::Engine);
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "took {:?}",
        started.elapsed()
    );
}

#[test]
fn irrational_roots_stay_exact() {
    let result = solved("solve x^2 - 2 = 0");
    match &result.final_answer {
        Answer::Roots(roots) => assert_eq!(roots.len(), 2, "roots of x^2 - 2"),
        other => panic!("expected roots, got {other}"),
    }
    assert!(result.final_answer.to_string().contains("sqrt(2)"));
}

#[test]
fn algebra_failures() {
    assert_eq!(failure("solve x + * 5 = 2"), ErrorKind::Parse);
    assert_eq!(failure("solve x^3 = 2"), ErrorKind::Engine);
}

#[test]
fn derivatives() {
    let result = solved("Find the derivative of x^2 + 3x");
    assert_eq!(result.steps, vec!["Identified function", "Applied differentiation"]);
    assert_eq!(result.final_answer.to_string(), "2*x+3");
    assert_answer("derivative of 5", "0");
    assert_answer("derivative of t^3 with respect to t", "3*t^2");
}

#[test]
fn derivative_uses_configured_variable() {
    let config = SolverConfig::default().with_variable("y");
    let result = solve_with("derivative of y^2", &config).expect("differentiable");
    assert_eq!(result.final_answer.to_string(), "2*y");
}

#[test]
fn limits() {
    let result = solved("limit of (x^2 - 1)/(x - 1) as x -> 1");
    assert_eq!(result.steps, vec!["Evaluated limit at x -> 1"]);
    assert!(matches!(
        &result.final_answer,
        Answer::Limit(LimitValue::Finite(_))
    ));
    assert_eq!(result.final_answer.to_string(), "2");

    let result = solved("limit of sin(x)/x");
    assert_eq!(result.steps, vec!["Evaluated limit at x -> 0"]);
    assert_eq!(result.final_answer.to_string(), "1");

    assert_answer("limit of 1/x as x approaches 0", "oo");
}

#[test]
fn calculus_without_intent_is_unhandled() {
    assert_eq!(failure("maximize x^2"), ErrorKind::Unhandled);
}

#[test]
fn coin_probability() {
    let result = solved("A coin is tossed 3 times. Probability of all heads?");
    assert_eq!(
        result.steps,
        vec![
            "Coin tossed 3 times",
            "Favorable outcome: all heads",
            "Probability = 1/8",
        ]
    );
    assert_eq!(result.final_answer.to_string(), "1/8");
}

#[test]
fn unknown_probability_is_not_available() {
    let result = solved("probability of rain tomorrow");
    assert_eq!(result.steps, vec!["Could not recognize probability type"]);
    assert_eq!(result.final_answer, Answer::NotAvailable);
    assert_eq!(result.final_answer.to_string(), "N/A");
}

#[test]
fn determinants() {
    let result = solved("Find the determinant of [[1, 2], [3, 4]]");
    assert_eq!(result.steps, vec!["Parsed matrix", "Computed determinant"]);
    assert_eq!(result.final_answer.to_string(), "-2");

    assert_answer("determinant of the matrix", "-2");
    assert_answer("determinant of [2, 0, 0], [0, 3, 0], [0, 0, -1]", "-6");
}

#[test]
fn matrix_failures() {
    assert_eq!(failure("determinant of [1, 2], [3]"), ErrorKind::MatrixShape);
    assert_eq!(failure("determinant of [1, 2], [3, 4], [5, 6]"), ErrorKind::MatrixShape);
    assert_eq!(failure("invert the matrix [1, 2], [3, 4]"), ErrorKind::Unhandled);
}
