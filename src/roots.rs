//! Exact real roots of single-variable equations.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use tracing::debug;

use crate::error::{CasError, Result};
use crate::expr::{Expr, Rational};
use crate::polynomial::{Poly, RationalFunction};
use crate::simplify::simplify_fully;

/// A root together with its floating-point value, used for ordering.
#[derive(Clone, Debug)]
struct Root {
    expr: Expr,
    approx: f64,
}

/// Real solutions of `expr = 0` for `var`, sorted ascending without repeats.
///
/// The expression must be a rational function of `var`. Roots of the
/// numerator that are poles of the original expression cannot occur because
/// the quotient is kept in lowest terms.
pub fn solve_equation(expr: &Expr, var: &str) -> Result<Vec<Expr>> {
    let rf = RationalFunction::from_expr(expr, var).ok_or_else(|| {
        CasError::Unsupported(format!("{expr} is not a polynomial equation in {var}"))
    })?;
    real_roots(&rf.numer)
}

/// Trial division stops here; larger factors are left unsplit.
const TRIAL_DIVISION_BOUND: u32 = 100_000;

/// Real roots of `poly`, rational ones exact and quadratic surds in radical form.
/// Irreducible factors of degree three or more are rejected.
pub fn real_roots(poly: &Poly) -> Result<Vec<Expr>> {
    let mut roots = Vec::new();
    for (part, _) in poly.square_free_decomposition() {
        let mut remaining = part;
        loop {
            match remaining.degree() {
                None | Some(0) => break,
                Some(1) => {
                    roots.extend(remaining.linear_root().map(rational_root));
                    break;
                }
                Some(2) => {
                    roots.extend(quadratic_roots(&remaining));
                    break;
                }
                Some(degree) => {
                    let Some(root) = find_rational_root(&remaining)? else {
                        debug!(degree, "irreducible factor left after rational roots");
                        return Err(CasError::Unsupported(format!(
                            "no closed form for the roots of an irreducible degree {degree} factor"
                        )));
                    };
                    let linear = Poly::from_coeffs([-root.clone(), Rational::one()]);
                    remaining = remaining.div_exact(&linear).unwrap_or_else(Poly::zero);
                    roots.push(rational_root(root));
                }
            }
        }
    }
    roots.sort_by(|a, b| a.approx.total_cmp(&b.approx));
    roots.dedup_by(|a, b| a.expr == b.expr);
    Ok(roots.into_iter().map(|root| root.expr).collect())
}

fn rational_root(value: Rational) -> Root {
    Root {
        approx: value.to_f64().unwrap_or(f64::NAN),
        expr: Expr::Constant(value),
    }
}

/// Real roots of a square-free quadratic: `-b/2a ± (s/q)·sqrt(r)`, or exact
/// rationals when the discriminant is a perfect square.
fn quadratic_roots(poly: &Poly) -> Vec<Root> {
    let a = poly.coeff(2);
    let b = poly.coeff(1);
    let c = poly.coeff(0);
    let discriminant = &b * &b - Rational::from_integer(BigInt::from(4)) * &a * &c;
    if discriminant.is_negative() {
        return Vec::new();
    }

    let two_a = Rational::from_integer(BigInt::from(2)) * &a;
    let center = -b / &two_a;
    // sqrt(p/q) = sqrt(p*q)/q
    let radicand = discriminant.numer() * discriminant.denom();
    let (square, free) = split_square_factor(&radicand);
    let scale = (Rational::new(square, discriminant.denom().clone()) / &two_a).abs();
    if free.is_one() {
        return vec![
            rational_root(center.clone() - &scale),
            rational_root(center + scale),
        ];
    }

    let surd = Expr::integer(free.clone()).sqrt();
    let surd_approx = free.to_f64().unwrap_or(f64::NAN).sqrt();
    [-Rational::one(), Rational::one()]
        .into_iter()
        .map(|sign| {
            let offset = sign * &scale;
            let approx = center.to_f64().unwrap_or(f64::NAN)
                + offset.to_f64().unwrap_or(f64::NAN) * surd_approx;
            let expr = simplify_fully(Expr::Add(
                Expr::Constant(center.clone()).boxed(),
                Expr::Mul(Expr::Constant(offset).boxed(), surd.clone().boxed()).boxed(),
            ));
            Root { expr, approx }
        })
        .collect()
}

/// Write `n = s^2 * r`; returns `(s, r)`. Square factors of primes up to
/// [`TRIAL_DIVISION_BOUND`] are removed, and a remaining perfect square is
/// absorbed whole, so `r` is square-free unless it hides the square of a
/// larger prime.
fn split_square_factor(n: &BigInt) -> (BigInt, BigInt) {
    let mut square = BigInt::one();
    let mut rest = n.abs();
    let bound = BigInt::from(TRIAL_DIVISION_BOUND);
    let mut d = BigInt::from(2);
    while d <= bound && &d * &d <= rest {
        let dd = &d * &d;
        while rest.is_multiple_of(&dd) {
            rest /= &dd;
            square *= &d;
        }
        d += 1;
    }
    let root = rest.sqrt();
    if rest > BigInt::one() && &root * &root == rest {
        square *= root;
        rest = BigInt::one();
    }
    (square, rest)
}

/// A rational root by the rational-root theorem. Coefficients whose divisors
/// are out of reach of trial division are an engine error.
fn find_rational_root(poly: &Poly) -> Result<Option<Rational>> {
    let int_coeffs = integer_coeffs(poly);
    let (Some(constant), Some(leading)) = (int_coeffs.first(), int_coeffs.last()) else {
        return Ok(None);
    };
    if constant.is_zero() {
        return Ok(Some(Rational::zero()));
    }

    let too_large = |n: &BigInt| {
        CasError::Unsupported(format!(
            "coefficient {n} is too large to search for rational roots"
        ))
    };
    let numerators = divisors(constant).ok_or_else(|| too_large(constant))?;
    let denominators = divisors(leading).ok_or_else(|| too_large(leading))?;

    let mut candidates = Vec::new();
    for p in &numerators {
        for q in &denominators {
            let candidate = Rational::new(p.clone(), q.clone());
            candidates.push(-candidate.clone());
            candidates.push(candidate);
        }
    }
    candidates.sort();
    candidates.dedup();
    Ok(candidates
        .into_iter()
        .find(|candidate| poly.evaluate(candidate).is_zero()))
}

/// Coefficients scaled by the lcm of their denominators, lowest power first.
fn integer_coeffs(poly: &Poly) -> Vec<BigInt> {
    let lcm = poly
        .coeffs
        .values()
        .fold(BigInt::one(), |acc, coeff| acc.lcm(coeff.denom()));
    let degree = poly.degree().unwrap_or(0);
    let mut coeffs = vec![BigInt::zero(); degree + 1];
    for (exp, coeff) in &poly.coeffs {
        let scaled = coeff * Rational::from_integer(lcm.clone());
        coeffs[*exp] = scaled.to_integer();
    }
    coeffs
}

/// Positive divisors of `n`, or `None` when `|n|` exceeds the square of
/// [`TRIAL_DIVISION_BOUND`].
fn divisors(n: &BigInt) -> Option<Vec<BigInt>> {
    let abs_n = n.abs();
    let bound = BigInt::from(TRIAL_DIVISION_BOUND);
    if abs_n > &bound * &bound {
        return None;
    }
    let mut result = Vec::new();
    let mut d = BigInt::one();
    while &d * &d <= abs_n {
        if abs_n.is_multiple_of(&d) {
            let other = &abs_n / &d;
            if other != d {
                result.push(other);
            }
            result.push(d.clone());
        }
        d += 1;
    }
    result.sort();
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;

    fn roots_of(input: &str) -> Vec<String> {
        let expr = parse_expr(input).expect("parse input");
        solve_equation(&expr, "x")
            .expect("solvable")
            .iter()
            .map(|root| root.to_string())
            .collect()
    }

    #[test]
    fn square_factor_is_split_off() {
        assert_eq!(
            split_square_factor(&BigInt::from(72)),
            (BigInt::from(6), BigInt::from(2))
        );
        assert_eq!(
            split_square_factor(&BigInt::from(7)),
            (BigInt::from(1), BigInt::from(7))
        );
    }

    #[test]
    fn large_square_factors_are_found_without_full_trial_division() {
        let prime = BigInt::from(1_000_000_007u64);
        assert_eq!(
            split_square_factor(&(&prime * &prime * BigInt::from(4))),
            (BigInt::from(2) * &prime, BigInt::one())
        );
        let big = BigInt::from(10_000_000_000_000_007u64);
        let (square, free) = split_square_factor(&big);
        assert_eq!(&square * &square * &free, big);
    }

    #[test]
    fn divisor_search_is_bounded() {
        assert_eq!(
            divisors(&BigInt::from(-12)),
            Some([1, 2, 3, 4, 6, 12].map(BigInt::from).to_vec())
        );
        assert_eq!(divisors(&BigInt::from(10_000_000_000_000_007u64)), None);
    }

    #[test]
    fn quadratic_with_square_discriminant_has_rational_roots() {
        assert_eq!(roots_of("2x^2 - 3x + 1"), vec!["1/2", "1"]);
        assert_eq!(roots_of("x^2 - 10000000000"), vec!["-100000", "100000"]);
    }

    #[test]
    fn cubic_with_huge_constant_is_rejected() {
        let expr = parse_expr("x^3 + x + 10000000000000007").expect("parse input");
        assert!(matches!(
            solve_equation(&expr, "x"),
            Err(CasError::Unsupported(_))
        ));
    }

    #[test]
    fn rational_roots_are_sorted_and_unique() {
        assert_eq!(roots_of("(x-2)^2*(x+1)"), vec!["-1", "2"]);
        assert_eq!(roots_of("x^3 - x"), vec!["-1", "0", "1"]);
        assert_eq!(roots_of("2*x - 1"), vec!["1/2"]);
    }

    #[test]
    fn negative_discriminant_has_no_real_roots() {
        assert!(roots_of("x^2 + 1").is_empty());
    }

    #[test]
    fn cubic_without_rational_roots_is_rejected() {
        let expr = parse_expr("x^3 - 2").expect("parse input");
        assert!(matches!(
            solve_equation(&expr, "x"),
            Err(CasError::Unsupported(_))
        ));
    }
}
