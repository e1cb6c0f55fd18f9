//! Independent checks of solver output.
//!
//! A [`Verifier`] looks at a finished [`SolveOutcome`] and decides whether it
//! may be explained. [`ConsistencyVerifier`] re-derives what it can from the
//! result's [`Certificate`] using methods unrelated to the solver's own:
//! floating-point substitution for roots, finite differences for
//! derivatives, one-sided sampling for limits, cofactor expansion (Bareiss
//! elimination past a small size) for determinants and plain counting bounds
//! for probabilities.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use serde::Serialize;
use tracing::debug;

use crate::calculus::LimitValue;
use crate::evaluate::numeric_value;
use crate::expr::{Expr, Rational};
use crate::matrix::Matrix;
use crate::polynomial::RationalFunction;
use crate::solve::{Answer, Certificate, SolveOutcome, SolverResult};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub valid: bool,
    /// Checks that passed, in the order they ran.
    pub checks: Vec<String>,
    /// Reasons the result was rejected.
    pub issues: Vec<String>,
}

impl VerificationResult {
    fn pass(&mut self, check: impl Into<String>) {
        self.checks.push(check.into());
    }

    fn fail(&mut self, issue: impl Into<String>) {
        self.issues.push(issue.into());
    }

    fn finish(mut self) -> Self {
        self.valid = self.issues.is_empty();
        self
    }
}

pub trait Verifier {
    fn verify(&self, outcome: &SolveOutcome) -> VerificationResult;
}

/// Sample points for identities in one variable. Chosen away from the
/// integers where textbook functions tend to have poles.
pub const SAMPLE_POINTS: [f64; 4] = [-1.73, 0.37, 1.21, 2.53];

const ROOT_TOLERANCE: f64 = 1e-9;
const DIFFERENCE_STEP: f64 = 1e-5;
const DERIVATIVE_TOLERANCE: f64 = 1e-4;
const LIMIT_OFFSET: f64 = 1e-5;
const LIMIT_TOLERANCE: f64 = 1e-3;
/// Magnitude just right of a pole that counts as "unbounded".
const POLE_MAGNITUDE: f64 = 1e3;
/// Largest matrix re-checked by cofactor expansion; bigger ones use Bareiss.
const COFACTOR_LIMIT: usize = 6;

#[derive(Clone, Copy, Debug, Default)]
pub struct ConsistencyVerifier;

impl Verifier for ConsistencyVerifier {
    fn verify(&self, outcome: &SolveOutcome) -> VerificationResult {
        let mut report = VerificationResult::default();
        match outcome {
            Err(err) => report.fail(format!("solver failed: {err}")),
            Ok(result) => {
                check_shape(result, &mut report);
                if let Some(certificate) = &result.certificate {
                    check_certificate(certificate, &result.final_answer, &mut report);
                }
            }
        }
        let report = report.finish();
        debug!(valid = report.valid, issues = report.issues.len(), "verified");
        report
    }
}

fn check_shape(result: &SolverResult, report: &mut VerificationResult) {
    if result.steps.is_empty() {
        report.fail("no solution steps recorded");
    } else if result.steps.iter().any(|step| step.trim().is_empty()) {
        report.fail("a solution step is empty");
    } else {
        report.pass(format!("{} solution steps recorded", result.steps.len()));
    }
    if result.final_answer == Answer::NotAvailable {
        report.fail("no final answer");
    }
}

fn check_certificate(certificate: &Certificate, answer: &Answer, report: &mut VerificationResult) {
    match (certificate, answer) {
        (Certificate::Roots { equation, variable }, Answer::Roots(roots)) => {
            check_roots(equation, variable, roots, report)
        }
        (Certificate::Derivative { function, variable }, Answer::Value(derivative)) => {
            check_derivative(function, variable, derivative, report)
        }
        (
            Certificate::Limit {
                function,
                variable,
                point,
            },
            Answer::Limit(value),
        ) => check_limit(function, variable, point, value, report),
        (Certificate::Determinant { rows }, Answer::Value(value)) => {
            check_determinant(rows, value, report)
        }
        (Certificate::Probability { favorable, total }, Answer::Probability(p)) => {
            check_probability(favorable, total, p, report)
        }
        _ => report.fail("answer does not match the kind of problem solved"),
    }
}

fn check_roots(equation: &Expr, var: &str, roots: &[Expr], report: &mut VerificationResult) {
    if roots.is_empty() {
        // Only a nonzero constant equation has no solutions at all.
        let degree = RationalFunction::from_expr(equation, var).and_then(|rf| rf.numer.degree());
        if degree == Some(0) {
            report.pass("equation is a nonzero constant and has no solutions");
        } else {
            report.fail(format!(
                "no roots reported for an equation in {var} that may have some"
            ));
        }
        return;
    }
    for root in roots {
        let Some(r) = numeric_value(root, &[]) else {
            report.fail(format!("root {root} is not a real number"));
            continue;
        };
        let at = |x: f64| numeric_value(equation, &[(var, x)]);
        let Some(residual) = at(r) else {
            report.fail(format!("equation is undefined at root {root}"));
            continue;
        };
        // Scale by the size of the equation near the root.
        let scale = [r - 1.0, r + 1.0]
            .into_iter()
            .filter_map(at)
            .fold(1.0_f64, |acc, v| acc.max(v.abs()));
        if residual.abs() <= ROOT_TOLERANCE * scale {
            report.pass(format!("{var} = {root} satisfies the equation"));
        } else {
            report.fail(format!("{var} = {root} leaves residual {residual:e}"));
        }
    }
}

fn check_derivative(function: &Expr, var: &str, derivative: &Expr, report: &mut VerificationResult) {
    let mut compared = 0;
    for x in SAMPLE_POINTS {
        let f = |t: f64| numeric_value(function, &[(var, t)]);
        let (Some(ahead), Some(behind), Some(claimed)) = (
            f(x + DIFFERENCE_STEP),
            f(x - DIFFERENCE_STEP),
            numeric_value(derivative, &[(var, x)]),
        ) else {
            continue;
        };
        let estimate = (ahead - behind) / (2.0 * DIFFERENCE_STEP);
        if (estimate - claimed).abs() > DERIVATIVE_TOLERANCE * (1.0 + claimed.abs()) {
            report.fail(format!(
                "derivative at {var} = {x} is {claimed}, finite difference gives {estimate}"
            ));
            return;
        }
        compared += 1;
    }
    if compared > 0 {
        report.pass(format!("derivative matches finite differences at {compared} points"));
    } else {
        report.pass("derivative could not be sampled numerically");
    }
}

fn check_limit(
    function: &Expr,
    var: &str,
    point: &Rational,
    value: &LimitValue,
    report: &mut VerificationResult,
) {
    let Some(p) = point.to_f64() else {
        return;
    };
    let x = p + LIMIT_OFFSET * (1.0 + p.abs());
    let Some(sampled) = numeric_value(function, &[(var, x)]) else {
        report.pass("limit could not be sampled numerically");
        return;
    };
    let agrees = match value {
        LimitValue::Finite(expr) => match numeric_value(expr, &[]) {
            Some(claimed) => (sampled - claimed).abs() <= LIMIT_TOLERANCE * (1.0 + claimed.abs()),
            None => {
                report.fail(format!("limit {expr} is not a real number"));
                return;
            }
        },
        LimitValue::PositiveInfinity => sampled > POLE_MAGNITUDE,
        LimitValue::NegativeInfinity => sampled < -POLE_MAGNITUDE,
    };
    if agrees {
        report.pass(format!("function approaches {value} right of {var} = {p}"));
    } else {
        report.fail(format!("function is {sampled} right of {var} = {p}, not near {value}"));
    }
}

fn check_determinant(rows: &[Vec<BigInt>], value: &Expr, report: &mut VerificationResult) {
    let (method, recomputed) = match Matrix::from_rows(rows.to_vec()) {
        Ok(m) if m.rows() <= COFACTOR_LIMIT => {
            ("cofactor expansion", m.cofactor_determinant())
        }
        Ok(m) => ("fraction-free elimination", m.bareiss_determinant()),
        Err(err) => ("reconstruction", Err(err)),
    };
    match (recomputed, value.as_constant()) {
        (Ok(expected), Some(claimed)) if &expected == claimed => {
            report.pass(format!("determinant agrees with {method}"))
        }
        (Ok(expected), _) => report.fail(format!(
            "{method} gives {expected}, solver reported {value}"
        )),
        (Err(err), _) => report.fail(format!("matrix cannot be rebuilt: {err}")),
    }
}

fn check_probability(
    favorable: &BigInt,
    total: &BigInt,
    reported: &Rational,
    report: &mut VerificationResult,
) {
    if !total.is_positive() {
        report.fail("sample space is empty");
        return;
    }
    if favorable.is_negative() || favorable > total {
        report.fail(format!("{favorable} favorable outcomes out of {total}"));
        return;
    }
    let expected = Rational::new(favorable.clone(), total.clone());
    if &expected != reported {
        report.fail(format!("{favorable}/{total} does not reduce to {reported}"));
    } else {
        report.pass(format!("{favorable} of {total} outcomes gives {reported}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;

    fn certified(answer: Answer, certificate: Certificate) -> SolveOutcome {
        Ok(SolverResult::new(vec!["Did the work".to_string()], answer).certified(certificate))
    }

    #[test]
    fn wrong_root_is_rejected() {
        let outcome = certified(
            Answer::Roots(vec![Expr::integer(4)]),
            Certificate::Roots {
                equation: parse_expr("x - 3").expect("parse input"),
                variable: "x".to_string(),
            },
        );
        let result = ConsistencyVerifier.verify(&outcome);
        assert!(!result.valid, "{result:?}");
    }

    #[test]
    fn empty_roots_only_pass_for_constant_equations() {
        let roots = |equation: &str| {
            certified(
                Answer::Roots(Vec::new()),
                Certificate::Roots {
                    equation: parse_expr(equation).expect("parse input"),
                    variable: "x".to_string(),
                },
            )
        };
        assert!(!ConsistencyVerifier.verify(&roots("x^2 + 1")).valid);
        assert!(!ConsistencyVerifier.verify(&roots("x - x")).valid);
        assert!(ConsistencyVerifier.verify(&roots("1 - (2)")).valid);
    }

    #[test]
    fn large_determinant_is_checked_by_elimination() {
        let rows: Vec<Vec<BigInt>> = (0..8)
            .map(|i| (0..8).map(|j| BigInt::from(if i == j { 2 } else { 0 })).collect())
            .collect();
        let outcome = |det: i64| {
            certified(
                Answer::Value(Expr::integer(det)),
                Certificate::Determinant { rows: rows.clone() },
            )
        };
        let accepted = ConsistencyVerifier.verify(&outcome(256));
        assert!(accepted.valid, "{accepted:?}");
        assert!(accepted.checks.iter().any(|c| c.contains("fraction-free")));
        assert!(!ConsistencyVerifier.verify(&outcome(255)).valid);
    }

    #[test]
    fn wrong_derivative_is_rejected() {
        let outcome = certified(
            Answer::Value(parse_expr("x^2").expect("parse input")),
            Certificate::Derivative {
                function: parse_expr("x^3").expect("parse input"),
                variable: "x".to_string(),
            },
        );
        assert!(!ConsistencyVerifier.verify(&outcome).valid);
    }

    #[test]
    fn unreduced_probability_is_rejected() {
        let outcome = certified(
            Answer::Probability(Rational::new(BigInt::from(1), BigInt::from(4))),
            Certificate::Probability {
                favorable: BigInt::from(4),
                total: BigInt::from(52),
            },
        );
        assert!(!ConsistencyVerifier.verify(&outcome).valid);
    }
}
