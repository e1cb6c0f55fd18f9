//! Derivatives and limits.

use std::sync::LazyLock;

use num_traits::Zero;
use regex::Regex;
use tracing::debug;

use crate::calculus::{differentiate, limit};
use crate::config::SolverConfig;
use crate::error::CasError;
use crate::expr::Rational;
use crate::extract::extract_expression;
use crate::parser::{parse_expr, signed_decimal_to_rational};

use super::{Answer, Certificate, SolveError, SolveOutcome, SolverResult};

/// Markers that ask for a derivative; checked before any limit marker.
pub const DERIVATIVE_MARKERS: &[&str] = &["derivative", "differentiate", "dx/dx", "d/dx"];
pub const LIMIT_MARKER: &str = "limit";

/// `limit ... x -> 2`, also written with `→`, `approaches` or `tends to`.
static LIMIT_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"limit.*?([a-z])\s*(?:->|→|approaches|tends to)\s*([-+]?\d+(?:\.\d+)?)").unwrap()
});

static RESPECT_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:with respect to|wrt)\s+([a-z])\b").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalculusIntent {
    Derivative,
    Limit,
    Unrecognized,
}

pub fn detect_intent(text: &str) -> CalculusIntent {
    let lowered = text.to_lowercase();
    if DERIVATIVE_MARKERS.iter().any(|m| lowered.contains(m)) {
        CalculusIntent::Derivative
    } else if lowered.contains(LIMIT_MARKER) {
        CalculusIntent::Limit
    } else {
        CalculusIntent::Unrecognized
    }
}

pub fn solve(text: &str, config: &SolverConfig) -> SolveOutcome {
    let intent = detect_intent(text);
    debug!(?intent, "calculus intent");
    match intent {
        CalculusIntent::Derivative => solve_derivative(text, config),
        CalculusIntent::Limit => solve_limit(text, config),
        CalculusIntent::Unrecognized => Err(SolveError::unhandled()),
    }
}

fn solve_derivative(text: &str, config: &SolverConfig) -> SolveOutcome {
    let lowered = text.to_lowercase();
    let var = RESPECT_CLAUSE
        .captures(&lowered)
        .and_then(|caps| caps.get(1))
        .map_or(config.variable.clone(), |m| m.as_str().to_string());

    let mut steps = Vec::new();
    let function = parse_expr(&extract_expression(text))?;
    steps.push("Identified function".to_string());

    let derivative = differentiate(&var, &function);
    steps.push("Applied differentiation".to_string());

    Ok(SolverResult::new(steps, Answer::Value(derivative))
        .certified(Certificate::Derivative { function, variable: var }))
}

fn solve_limit(text: &str, config: &SolverConfig) -> SolveOutcome {
    let lowered = text.to_lowercase();
    let (body, var, point, shown) = match LIMIT_CLAUSE.captures(&lowered) {
        Some(caps) => {
            let (Some(var), Some(target), Some(whole)) = (caps.get(1), caps.get(2), caps.get(0))
            else {
                return Err(SolveError::unhandled());
            };
            let point = signed_decimal_to_rational(target.as_str())
                .ok_or_else(|| CasError::parse(target.as_str(), "invalid limit target"))?;
            // Drop `x -> 2` so only the function is left to extract.
            let body = format!("{}{}", &lowered[..var.start()], &lowered[whole.end()..]);
            (body, var.as_str().to_string(), point, target.as_str().to_string())
        }
        None => (
            lowered.clone(),
            config.variable.clone(),
            Rational::zero(),
            "0".to_string(),
        ),
    };
    debug!(%var, target = %shown, "limit clause");

    let function = parse_expr(&extract_expression(&body))?;
    let value = limit(&function, &var, &point, config.lhopital_depth)?;
    let steps = vec![format!("Evaluated limit at {var} -> {shown}")];

    Ok(SolverResult::new(steps, Answer::Limit(value)).certified(Certificate::Limit {
        function,
        variable: var,
        point,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivative_takes_priority_over_limit() {
        assert_eq!(
            detect_intent("Derivative of the limit"),
            CalculusIntent::Derivative
        );
        assert_eq!(detect_intent("LIMIT of x"), CalculusIntent::Limit);
        assert_eq!(detect_intent("maximize x"), CalculusIntent::Unrecognized);
    }

    #[test]
    fn respect_clause_selects_variable() {
        let result = solve(
            "derivative of t^3 with respect to t",
            &SolverConfig::default(),
        )
        .expect("differentiable");
        assert_eq!(result.final_answer.to_string(), "3*t^2");
    }
}
