//! Dense-by-exponent polynomials with exact rational coefficients, and
//! quotients of them.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::expr::{Expr, Rational};
use crate::simplify::simplify;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    pub(crate) coeffs: BTreeMap<usize, Rational>,
}

impl Poly {
    pub fn zero() -> Self {
        Poly {
            coeffs: BTreeMap::new(),
        }
    }

    pub fn one() -> Self {
        Poly::from_constant(Rational::one())
    }

    /// The monomial `x`.
    pub fn x() -> Self {
        let mut coeffs = BTreeMap::new();
        coeffs.insert(1, Rational::one());
        Poly { coeffs }
    }

    pub fn from_constant(c: Rational) -> Self {
        let mut coeffs = BTreeMap::new();
        if !c.is_zero() {
            coeffs.insert(0, c);
        }
        Poly { coeffs }
    }

    /// Build from coefficients listed lowest power first.
    pub fn from_coeffs(coeffs: impl IntoIterator<Item = Rational>) -> Self {
        let coeffs = coeffs
            .into_iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .collect();
        Poly { coeffs }
    }

    pub fn degree(&self) -> Option<usize> {
        self.coeffs.keys().next_back().copied()
    }

    pub fn leading_coeff(&self) -> Rational {
        self.degree()
            .and_then(|d| self.coeffs.get(&d).cloned())
            .unwrap_or_else(Rational::zero)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs.get(&0).map(|c| c.is_one()).unwrap_or(false)
    }

    pub fn coeff(&self, power: usize) -> Rational {
        self.coeffs
            .get(&power)
            .cloned()
            .unwrap_or_else(Rational::zero)
    }

    pub fn pow(&self, exp: usize) -> Self {
        let mut result = Poly::one();
        let mut base = self.clone();
        let mut n = exp;
        while n > 0 {
            if n % 2 == 1 {
                result = result * &base;
            }
            base = base.clone() * base;
            n /= 2;
        }
        result
    }

    pub fn scale(&self, k: &Rational) -> Self {
        if k.is_zero() {
            return Poly::zero();
        }
        let coeffs = self
            .coeffs
            .iter()
            .map(|(exp, coeff)| (*exp, coeff * k))
            .collect();
        Poly { coeffs }
    }

    pub fn from_expr(expr: &Expr, var: &str) -> Option<Self> {
        if !expr.contains_var(var) {
            return extract_rational(&simplify(expr.clone())).map(Poly::from_constant);
        }
        match expr {
            Expr::Variable(v) if v == var => Some(Poly::x()),
            Expr::Add(a, b) => Some(Self::from_expr(a, var)? + Self::from_expr(b, var)?),
            Expr::Sub(a, b) => Some(Self::from_expr(a, var)? - Self::from_expr(b, var)?),
            Expr::Mul(a, b) => Some(Self::from_expr(a, var)? * Self::from_expr(b, var)?),
            Expr::Div(a, b) => {
                let denom = extract_rational(&simplify((**b).clone())).filter(|d| !d.is_zero())?;
                Some(Self::from_expr(a, var)?.scale(&(Rational::one() / denom)))
            }
            Expr::Neg(inner) => Some(-Self::from_expr(inner, var)?),
            Expr::Pow(base, exp) => {
                let power = extract_integer(exp).filter(|k| !k.is_negative())?;
                Some(Self::from_expr(base, var)?.pow(power.to_usize()?))
            }
            _ => None,
        }
    }

    pub fn derivative(&self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .filter(|(exp, _)| **exp > 0)
            .map(|(exp, coeff)| {
                let factor = Rational::from_integer(BigInt::from(*exp));
                (exp - 1, coeff * factor)
            })
            .collect();
        Poly { coeffs }
    }

    pub fn monic(&self) -> Self {
        let lc = self.leading_coeff();
        if lc.is_zero() {
            return self.clone();
        }
        self.scale(&(Rational::one() / lc))
    }

    pub fn evaluate(&self, x: &Rational) -> Rational {
        let mut acc = Rational::zero();
        let mut pow = Rational::one();
        for exp in 0..=self.degree().unwrap_or(0) {
            if let Some(coeff) = self.coeffs.get(&exp) {
                acc += coeff * &pow;
            }
            pow *= x;
        }
        acc
    }

    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        let mut remainder = self.clone();
        let mut quotient = Poly::zero();
        let Some(divisor_degree) = divisor.degree() else {
            return (quotient, remainder);
        };
        let divisor_lc = divisor.leading_coeff();

        while let Some(r_deg) = remainder.degree() {
            if r_deg < divisor_degree {
                break;
            }
            let mut term = BTreeMap::new();
            term.insert(r_deg - divisor_degree, remainder.leading_coeff() / &divisor_lc);
            let term_poly = Poly { coeffs: term };
            quotient = quotient + &term_poly;
            remainder = remainder - &(term_poly * divisor);
        }

        (quotient, remainder)
    }

    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (q, r) = self.div_rem(divisor);
        if r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    pub fn linear_root(&self) -> Option<Rational> {
        if self.degree()? != 1 {
            return None;
        }
        let a = self.coeff(1);
        let b = self.coeff(0);
        Some(-b / a)
    }

    /// Multiplicity of `root` as a zero of the polynomial.
    pub fn root_multiplicity(&self, root: &Rational) -> usize {
        if self.is_zero() {
            return 0;
        }
        let divider = Poly::from_coeffs([-root.clone(), Rational::one()]);
        let mut current = self.clone();
        let mut count = 0;
        while let Some(next) = current.div_exact(&divider) {
            current = next;
            count += 1;
        }
        count
    }

    pub fn to_expr(&self, var: &str) -> Expr {
        let mut terms = self.coeffs.iter().rev().map(|(exp, coeff)| {
            let power = match exp {
                0 => return Expr::Constant(coeff.clone()),
                1 => Expr::var(var),
                _ => Expr::Pow(
                    Expr::var(var).boxed(),
                    Expr::integer(BigInt::from(*exp)).boxed(),
                ),
            };
            if coeff.is_one() {
                power
            } else {
                Expr::Mul(Expr::Constant(coeff.clone()).boxed(), power.boxed())
            }
        });
        let Some(first) = terms.next() else {
            return Expr::Constant(Rational::zero());
        };
        terms.fold(first, |a, b| Expr::Add(a.boxed(), b.boxed()))
    }

    pub fn gcd(a: &Poly, b: &Poly) -> Poly {
        let mut r0 = a.clone();
        let mut r1 = b.clone();
        while !r1.is_zero() {
            let (_, r) = r0.div_rem(&r1);
            r0 = r1;
            r1 = r;
        }
        r0.monic()
    }

    /// Yun's square-free decomposition: pairs of (square-free factor, multiplicity).
    pub fn square_free_decomposition(&self) -> Vec<(Poly, usize)> {
        if self.is_zero() || self.degree().unwrap_or(0) == 0 {
            return Vec::new();
        }

        let monic = self.monic();
        let mut result = Vec::new();
        let mut i = 1;
        let mut g = Poly::gcd(&monic, &monic.derivative());
        let mut y = monic.div_exact(&g).unwrap_or_else(Poly::zero);

        while !y.is_one() && !y.is_zero() {
            let z = Poly::gcd(&y, &g);
            let factor = y.div_exact(&z).unwrap_or_else(Poly::zero);
            if !factor.is_one() {
                result.push((factor, i));
            }
            y = z.clone();
            g = g.div_exact(&z).unwrap_or_else(Poly::zero);
            i += 1;
        }

        result
    }
}

impl std::ops::Add for Poly {
    type Output = Poly;
    fn add(self, rhs: Poly) -> Poly {
        self + &rhs
    }
}

impl std::ops::Add<&Poly> for Poly {
    type Output = Poly;
    fn add(self, rhs: &Poly) -> Poly {
        let mut coeffs = self.coeffs;
        for (exp, coeff) in &rhs.coeffs {
            match coeffs.entry(*exp) {
                Entry::Vacant(entry) => {
                    if !coeff.is_zero() {
                        entry.insert(coeff.clone());
                    }
                }
                Entry::Occupied(mut entry) => {
                    let updated = entry.get() + coeff;
                    if updated.is_zero() {
                        entry.remove();
                    } else {
                        *entry.get_mut() = updated;
                    }
                }
            }
        }
        Poly { coeffs }
    }
}

impl std::ops::Sub for Poly {
    type Output = Poly;
    fn sub(self, rhs: Poly) -> Poly {
        self + &(-rhs)
    }
}

impl std::ops::Sub<&Poly> for Poly {
    type Output = Poly;
    fn sub(self, rhs: &Poly) -> Poly {
        self + &(-rhs.clone())
    }
}

impl std::ops::Mul for Poly {
    type Output = Poly;
    fn mul(self, rhs: Poly) -> Poly {
        self * &rhs
    }
}

impl std::ops::Mul<&Poly> for Poly {
    type Output = Poly;
    fn mul(self, rhs: &Poly) -> Poly {
        let mut coeffs = BTreeMap::new();
        for (exp_a, coeff_a) in &self.coeffs {
            for (exp_b, coeff_b) in &rhs.coeffs {
                let product = coeff_a * coeff_b;
                if product.is_zero() {
                    continue;
                }
                match coeffs.entry(exp_a + exp_b) {
                    Entry::Vacant(entry) => {
                        entry.insert(product);
                    }
                    Entry::Occupied(mut entry) => {
                        let updated = entry.get() + &product;
                        if updated.is_zero() {
                            entry.remove();
                        } else {
                            *entry.get_mut() = updated;
                        }
                    }
                }
            }
        }
        Poly { coeffs }
    }
}

impl std::ops::Neg for Poly {
    type Output = Poly;
    fn neg(self) -> Poly {
        let coeffs = self
            .coeffs
            .into_iter()
            .map(|(exp, coeff)| (exp, -coeff))
            .collect();
        Poly { coeffs }
    }
}

/// A quotient `numer / denom` of polynomials in one variable, kept in lowest
/// terms with a monic denominator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RationalFunction {
    pub numer: Poly,
    pub denom: Poly,
}

impl RationalFunction {
    pub fn new(numer: Poly, denom: Poly) -> Option<Self> {
        if denom.is_zero() {
            return None;
        }
        if numer.is_zero() {
            return Some(RationalFunction {
                numer,
                denom: Poly::one(),
            });
        }
        let g = Poly::gcd(&numer, &denom);
        let numer = numer.div_exact(&g)?;
        let denom = denom.div_exact(&g)?;
        let lc = denom.leading_coeff();
        let inv = Rational::one() / lc;
        Some(RationalFunction {
            numer: numer.scale(&inv),
            denom: denom.scale(&inv),
        })
    }

    fn from_poly(poly: Poly) -> Self {
        RationalFunction {
            numer: poly,
            denom: Poly::one(),
        }
    }

    /// Bring `expr` to a single reduced quotient of polynomials in `var`.
    /// Returns `None` for anything that is not a rational function.
    pub fn from_expr(expr: &Expr, var: &str) -> Option<Self> {
        if !expr.contains_var(var) {
            return extract_rational(&simplify(expr.clone()))
                .map(|c| Self::from_poly(Poly::from_constant(c)));
        }
        match expr {
            Expr::Variable(v) if v == var => Some(Self::from_poly(Poly::x())),
            Expr::Add(a, b) => Self::from_expr(a, var)?.add(&Self::from_expr(b, var)?),
            Expr::Sub(a, b) => Self::from_expr(a, var)?.add(&Self::from_expr(b, var)?.neg()),
            Expr::Mul(a, b) => Self::from_expr(a, var)?.mul(&Self::from_expr(b, var)?),
            Expr::Div(a, b) => Self::from_expr(a, var)?.mul(&Self::from_expr(b, var)?.recip()?),
            Expr::Neg(inner) => Some(Self::from_expr(inner, var)?.neg()),
            Expr::Pow(base, exp) => {
                let k = extract_integer(exp)?;
                let base = Self::from_expr(base, var)?;
                let power = k.abs().to_usize()?;
                let raised = RationalFunction::new(base.numer.pow(power), base.denom.pow(power))?;
                if k.is_negative() {
                    raised.recip()
                } else {
                    Some(raised)
                }
            }
            _ => None,
        }
    }

    fn add(&self, other: &Self) -> Option<Self> {
        let numer = self.numer.clone() * &other.denom + &(other.numer.clone() * &self.denom);
        RationalFunction::new(numer, self.denom.clone() * &other.denom)
    }

    fn mul(&self, other: &Self) -> Option<Self> {
        RationalFunction::new(
            self.numer.clone() * &other.numer,
            self.denom.clone() * &other.denom,
        )
    }

    fn neg(&self) -> Self {
        RationalFunction {
            numer: -self.numer.clone(),
            denom: self.denom.clone(),
        }
    }

    fn recip(&self) -> Option<Self> {
        RationalFunction::new(self.denom.clone(), self.numer.clone())
    }
}

fn extract_integer(exp: &Expr) -> Option<BigInt> {
    match extract_rational(exp) {
        Some(c) if c.is_integer() => Some(c.to_integer()),
        _ => None,
    }
}

fn extract_rational(expr: &Expr) -> Option<Rational> {
    match expr {
        Expr::Constant(n) => Some(n.clone()),
        Expr::Neg(inner) => extract_rational(inner).map(|n| -n),
        _ => None,
    }
}
