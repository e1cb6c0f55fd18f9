//! Exact and floating-point evaluation of expressions.

use crate::expr::{Expr, Rational};
use crate::simplify::exact_sqrt;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Evaluate a variable-free expression to an exact rational.
///
/// Only values that are rational with certainty are produced: arithmetic,
/// integer powers, square roots of perfect squares, and the elementary
/// functions at their rational special points (`sin 0`, `cos 0`, `tan 0`,
/// `exp 0`, `log 1`). Division by zero yields `None`.
pub fn exact_value(expr: &Expr) -> Option<Rational> {
    match expr {
        Expr::Constant(c) => Some(c.clone()),
        Expr::Variable(_) => None,
        Expr::Add(a, b) => Some(exact_value(a)? + exact_value(b)?),
        Expr::Sub(a, b) => Some(exact_value(a)? - exact_value(b)?),
        Expr::Mul(a, b) => Some(exact_value(a)? * exact_value(b)?),
        Expr::Div(a, b) => {
            let denom = exact_value(b)?;
            if denom.is_zero() {
                return None;
            }
            Some(exact_value(a)? / denom)
        }
        Expr::Neg(a) => Some(-exact_value(a)?),
        Expr::Pow(a, b) => exact_power(exact_value(a)?, exact_value(b)?),
        Expr::Sin(a) | Expr::Tan(a) => exact_value(a)?.is_zero().then(Rational::zero),
        Expr::Cos(a) | Expr::Exp(a) => exact_value(a)?.is_zero().then(Rational::one),
        Expr::Log(a) => exact_value(a)?.is_one().then(Rational::zero),
    }
}

fn exact_power(base: Rational, exp: Rational) -> Option<Rational> {
    let root = if exp.denom().is_one() {
        base
    } else if *exp.denom() == BigInt::from(2) {
        exact_sqrt(&base)?
    } else {
        return None;
    };
    let k = exp.numer().abs().to_i32()?;
    if exp.is_negative() {
        if root.is_zero() {
            return None;
        }
        Some(num_traits::pow(root.recip(), k as usize))
    } else {
        Some(num_traits::pow(root, k as usize))
    }
}

/// Evaluate `expr` in floating point with the given variable bindings.
/// Unbound variables, domain errors and non-finite results yield `None`.
pub fn numeric_value(expr: &Expr, bindings: &[(&str, f64)]) -> Option<f64> {
    let value = match expr {
        Expr::Constant(c) => c.to_f64()?,
        Expr::Variable(name) => bindings
            .iter()
            .find(|(var, _)| *var == name.as_str())
            .map(|(_, value)| *value)?,
        Expr::Add(a, b) => numeric_value(a, bindings)? + numeric_value(b, bindings)?,
        Expr::Sub(a, b) => numeric_value(a, bindings)? - numeric_value(b, bindings)?,
        Expr::Mul(a, b) => numeric_value(a, bindings)? * numeric_value(b, bindings)?,
        Expr::Div(a, b) => numeric_value(a, bindings)? / numeric_value(b, bindings)?,
        Expr::Neg(a) => -numeric_value(a, bindings)?,
        Expr::Pow(a, b) => numeric_value(a, bindings)?.powf(numeric_value(b, bindings)?),
        Expr::Sin(a) => numeric_value(a, bindings)?.sin(),
        Expr::Cos(a) => numeric_value(a, bindings)?.cos(),
        Expr::Tan(a) => numeric_value(a, bindings)?.tan(),
        Expr::Exp(a) => numeric_value(a, bindings)?.exp(),
        Expr::Log(a) => numeric_value(a, bindings)?.ln(),
    };
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::rational;
    use crate::parser::parse_expr;

    #[test]
    fn exact_values_at_special_points() {
        let cases = [
            ("sin(0) + cos(0)", Some(rational(1, 1))),
            ("exp(0)*3/4", Some(rational(3, 4))),
            ("log(1)", Some(rational(0, 1))),
            ("sqrt(9/4)^3", Some(rational(27, 8))),
            ("2^-2", Some(rational(1, 4))),
            ("1/(2-2)", None),
            ("sqrt(2)", None),
            ("sin(1)", None),
        ];
        for (input, expected) in cases {
            let expr = parse_expr(input).expect("parse input");
            assert_eq!(exact_value(&expr), expected, "exact value of {input}");
        }
    }

    #[test]
    fn numeric_value_binds_variables() {
        let expr = parse_expr("x^2 + 1").expect("parse input");
        assert_eq!(numeric_value(&expr, &[("x", 3.0)]), Some(10.0));
        assert_eq!(numeric_value(&expr, &[]), None);
        let pole = parse_expr("1/x").expect("parse input");
        assert_eq!(numeric_value(&pole, &[("x", 0.0)]), None);
    }
}
