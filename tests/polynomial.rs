use mathmentor::{Poly, Rational, RationalFunction, parse_expr};

fn poly(input: &str) -> Poly {
    let expr = parse_expr(input).expect("parse polynomial");
    Poly::from_expr(&expr, "x").expect("build polynomial")
}

fn ratio(input: &str) -> RationalFunction {
    let expr = parse_expr(input).expect("parse rational function");
    RationalFunction::from_expr(&expr, "x").expect("build rational function")
}

#[test]
fn polynomial_division_exact() {
    let dividend = poly("x^3 - 1");
    let divisor = poly("x - 1");
    let (quotient, remainder) = dividend.div_rem(&divisor);
    assert!(remainder.is_zero());
    assert_eq!(quotient, poly("x^2 + x + 1"));
}

#[test]
fn polynomial_division_remainder() {
    let dividend = poly("x^3 + x + 1");
    let divisor = poly("x^2 + 1");
    let (quotient, remainder) = dividend.div_rem(&divisor);
    assert_eq!(quotient, poly("x"));
    assert_eq!(remainder, poly("1"));
}

#[test]
fn polynomial_division_non_exact() {
    let dividend = poly("x^2 + 1");
    let divisor = poly("x + 1");
    assert!(dividend.div_exact(&divisor).is_none());
}

#[test]
fn polynomial_gcd_is_monic() {
    let a = poly("x^2 - 1");
    let b = poly("x^2 - x");
    assert_eq!(Poly::gcd(&a, &b), poly("x - 1"));
}

#[test]
fn polynomial_gcd_ignores_content() {
    let a = poly("2*x^2 + 2*x");
    let b = poly("4*x");
    assert_eq!(Poly::gcd(&a, &b), poly("x"));
}

#[test]
fn square_free_parts_carry_multiplicity() {
    let parts = poly("(x - 1)^2 * (x + 2)").square_free_decomposition();
    assert_eq!(parts, vec![(poly("x + 2"), 1), (poly("x - 1"), 2)]);
}

#[test]
fn root_multiplicity_counts_repeated_factors() {
    let p = poly("x^3 - 3x^2 + 3x - 1");
    assert_eq!(p.root_multiplicity(&Rational::from_integer(1.into())), 3);
    assert_eq!(p.root_multiplicity(&Rational::from_integer(2.into())), 0);
}

#[test]
fn non_polynomials_are_rejected() {
    let expr = parse_expr("sin(x) + 1").expect("parse input");
    assert!(Poly::from_expr(&expr, "x").is_none());
    let expr = parse_expr("1/x").expect("parse input");
    assert!(Poly::from_expr(&expr, "x").is_none());
}

#[test]
fn rational_functions_cancel_common_factors() {
    let rf = ratio("(x^2 - 1)/(x - 1)");
    assert_eq!(rf.numer, poly("x + 1"));
    assert_eq!(rf.denom, poly("1"));
}

#[test]
fn rational_function_denominator_is_monic() {
    let rf = ratio("1/(2x + 4) + 1/2");
    assert_eq!(rf.denom, poly("x + 2"));
    assert_eq!(rf.numer, poly("1/2*x + 3/2"));
}

#[test]
fn polynomial_converts_back_to_expression() {
    let p = poly("2x^3 - x + 5");
    let rebuilt = Poly::from_expr(&p.to_expr("x"), "x").expect("rebuilt polynomial");
    assert_eq!(rebuilt, p, "expression form of {p:?}");
}
