//! One-sided (right-hand) limits of single-variable expressions.

use std::fmt;

use num_traits::{One, Signed, Zero};
use tracing::trace;

use crate::calculus::differentiate;
use crate::error::{CasError, Result};
use crate::evaluate::{exact_value, numeric_value};
use crate::expr::{Expr, Rational};
use crate::format::show_rational;
use crate::polynomial::{Poly, RationalFunction};
use crate::simplify::{simplify_fully, substitute};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LimitValue {
    Finite(Expr),
    PositiveInfinity,
    NegativeInfinity,
}

impl LimitValue {
    pub fn is_finite(&self) -> bool {
        matches!(self, LimitValue::Finite(_))
    }
}

impl fmt::Display for LimitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitValue::Finite(expr) => write!(f, "{expr}"),
            LimitValue::PositiveInfinity => write!(f, "oo"),
            LimitValue::NegativeInfinity => write!(f, "-oo"),
        }
    }
}

/// Limit of `expr` as `var` approaches `point` from the right.
///
/// Tries, in order: direct substitution, cancellation of a rational function
/// (poles resolve to a signed infinity), and L'Hôpital's rule on `0/0`
/// quotients, applied at most `lhopital_depth` times.
pub fn limit(expr: &Expr, var: &str, point: &Rational, lhopital_depth: usize) -> Result<LimitValue> {
    let value = Expr::Constant(point.clone());
    if let Some(found) = evaluate_limit(expr, var, point, &value, lhopital_depth) {
        return Ok(found);
    }
    Err(CasError::Unsupported(format!(
        "cannot evaluate limit of {expr} as {var} -> {}",
        show_rational(point)
    )))
}

fn evaluate_limit(
    expr: &Expr,
    var: &str,
    point: &Rational,
    value: &Expr,
    depth: usize,
) -> Option<LimitValue> {
    let simplified = simplify_fully(expr.clone());

    if let Some(found) = direct_substitution(&simplified, var, value) {
        trace!(%expr, "limit by substitution");
        return Some(found);
    }

    if let Some(rf) = RationalFunction::from_expr(&simplified, var) {
        trace!(%expr, "limit of rational function");
        return Some(rational_limit(&rf, point, var));
    }

    if depth == 0 {
        return None;
    }
    let (numer, denom) = split_quotient(expr).or_else(|| split_quotient(&simplified))?;
    let at_point = |e: &Expr| exact_value(&simplify_fully(substitute(e, var, value)));
    if !at_point(&numer)?.is_zero() || !at_point(&denom)?.is_zero() {
        return None;
    }
    trace!(%numer, %denom, "applying l'hopital");
    let next = Expr::Div(
        differentiate(var, &numer).boxed(),
        differentiate(var, &denom).boxed(),
    );
    evaluate_limit(&next, var, point, value, depth - 1)
}

fn direct_substitution(expr: &Expr, var: &str, value: &Expr) -> Option<LimitValue> {
    let substituted = substitute(expr, var, value);
    if let Some(exact) = exact_value(&substituted) {
        return Some(LimitValue::Finite(Expr::Constant(exact)));
    }
    // A finite floating-point value means every subterm is defined at the point.
    numeric_value(&substituted, &[])?;
    Some(LimitValue::Finite(simplify_fully(substituted)))
}

fn rational_limit(rf: &RationalFunction, point: &Rational, var: &str) -> LimitValue {
    let denom_at = rf.denom.evaluate(point);
    if !denom_at.is_zero() {
        let value = rf.numer.evaluate(point) / denom_at;
        return LimitValue::Finite(Expr::Constant(value));
    }

    // Lowest terms: the numerator cannot vanish at a pole of the denominator.
    let multiplicity = rf.denom.root_multiplicity(point);
    let linear = Poly::from_coeffs([-point.clone(), Rational::one()]);
    let cofactor = rf.denom.div_exact(&linear.pow(multiplicity));
    let cofactor_at = cofactor.map(|c| c.evaluate(point)).unwrap_or_else(Rational::zero);
    let numer_at = rf.numer.evaluate(point);
    trace!(var, multiplicity, "pole in rational function");

    // (x - a)^m is positive just right of a.
    if (numer_at * cofactor_at).is_positive() {
        LimitValue::PositiveInfinity
    } else {
        LimitValue::NegativeInfinity
    }
}

/// Split a top-level quotient, pulling constant factors into the numerator.
fn split_quotient(expr: &Expr) -> Option<(Expr, Expr)> {
    match expr {
        Expr::Div(a, b) => Some(((**a).clone(), (**b).clone())),
        Expr::Mul(a, b) => match (&**a, &**b) {
            (factor, Expr::Div(n, d)) | (Expr::Div(n, d), factor) => Some((
                Expr::Mul(factor.clone().boxed(), n.clone()),
                (**d).clone(),
            )),
            _ => None,
        },
        Expr::Neg(inner) => {
            let (n, d) = split_quotient(inner)?;
            Some((Expr::Neg(n.boxed()), d))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::rational;
    use crate::parser::parse_expr;

    fn limit_of(input: &str, point: Rational) -> LimitValue {
        let expr = parse_expr(input).expect("parse input");
        limit(&expr, "x", &point, 4).expect("limit exists")
    }

    #[test]
    fn removable_singularity_cancels() {
        assert_eq!(
            limit_of("(x^2 - 1)/(x - 1)", rational(1, 1)),
            LimitValue::Finite(Expr::integer(2))
        );
    }

    #[test]
    fn poles_approach_from_the_right() {
        assert_eq!(limit_of("1/x", rational(0, 1)), LimitValue::PositiveInfinity);
        assert_eq!(limit_of("-1/x", rational(0, 1)), LimitValue::NegativeInfinity);
        assert_eq!(limit_of("1/x^2", rational(0, 1)), LimitValue::PositiveInfinity);
    }

    #[test]
    fn lhopital_handles_trigonometric_quotients() {
        assert_eq!(
            limit_of("sin(x)/x", rational(0, 1)),
            LimitValue::Finite(Expr::integer(1))
        );
        assert_eq!(
            limit_of("(1 - cos(x))/x^2", rational(0, 1)),
            LimitValue::Finite(Expr::Constant(rational(1, 2)))
        );
    }

    #[test]
    fn exhausted_depth_is_an_error() {
        let expr = parse_expr("(1 - cos(x))/x^2").expect("parse input");
        assert!(limit(&expr, "x", &rational(0, 1), 1).is_err());
    }
}
