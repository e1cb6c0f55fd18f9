//! Equations in one unknown.

use tracing::debug;

use crate::config::SolverConfig;
use crate::extract::extract_expression;
use crate::parser::parse_expr;
use crate::roots::solve_equation;

use super::{Answer, Certificate, SolveOutcome, SolverResult};

/// Recorded when the equation has no real solution. Complex roots are not
/// reported.
pub const NO_REAL_ROOTS_STEP: &str = "No real roots";

pub fn solve(text: &str, config: &SolverConfig) -> SolveOutcome {
    let var = config.variable.as_str();
    let normalized = extract_expression(text);
    debug!(%normalized, "extracted equation");

    let mut steps = Vec::new();
    let equation = parse_expr(&normalized)?;
    steps.push("Converted equation to symbolic form".to_string());

    let roots = solve_equation(&equation, var)?;
    steps.push(format!("Solved for {var}"));
    if roots.is_empty() {
        steps.push(NO_REAL_ROOTS_STEP.to_string());
    }

    Ok(SolverResult::new(steps, Answer::Roots(roots)).certified(Certificate::Roots {
        equation,
        variable: var.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solve::ErrorKind;

    #[test]
    fn solves_for_configured_variable() {
        let config = SolverConfig::default().with_variable("t");
        let result = solve("solve 2t - 6 = 0", &config).expect("solvable");
        assert_eq!(result.steps[1], "Solved for t");
        assert_eq!(result.final_answer.to_string(), "[3]");
    }

    #[test]
    fn malformed_expression_is_a_parse_error() {
        let err = solve("solve x + * 5 = 2", &SolverConfig::default()).expect_err("malformed");
        assert_eq!(err.kind, ErrorKind::Parse);
    }
}
