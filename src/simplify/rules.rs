use std::collections::{BTreeMap, HashMap};

use crate::expr::{Expr, Rational, one, zero};
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

const DISTRIBUTE_TERM_LIMIT: usize = 64;
const FULL_SIMPLIFY_PASSES: usize = 16;

#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
struct CanonKey(Vec<Expr>);

pub fn simplify(expr: Expr) -> Expr {
    let mut cache = HashMap::new();
    simplify_cached(expr, &mut cache)
}

fn simplify_cached(expr: Expr, cache: &mut HashMap<Expr, Expr>) -> Expr {
    if let Some(hit) = cache.get(&expr) {
        return hit.clone();
    }

    let key = expr.clone();
    let result = match expr {
        Expr::Add(a, b) => simplify_add(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Sub(a, b) => simplify_sub(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Mul(a, b) => simplify_mul(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Div(a, b) => simplify_div(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Pow(a, b) => simplify_pow(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Neg(a) => simplify_neg(simplify_cached(*a, cache)),

        Expr::Sin(a) => match simplify_cached(*a, cache) {
            x if is_zero(&x) => zero(),
            Expr::Neg(inner) => simplify_neg(Expr::Sin(inner)),
            x => Expr::Sin(x.boxed()),
        },

        Expr::Cos(a) => match simplify_cached(*a, cache) {
            x if is_zero(&x) => one(),
            Expr::Neg(inner) => Expr::Cos(inner),
            x => Expr::Cos(x.boxed()),
        },

        Expr::Tan(a) => match simplify_cached(*a, cache) {
            x if is_zero(&x) => zero(),
            Expr::Neg(inner) => simplify_neg(Expr::Tan(inner)),
            x => Expr::Tan(x.boxed()),
        },

        Expr::Exp(a) => match simplify_cached(*a, cache) {
            x if is_zero(&x) => one(),
            Expr::Log(inner) => *inner,
            x => Expr::Exp(x.boxed()),
        },

        Expr::Log(a) => match simplify_cached(*a, cache) {
            x if is_one(&x) => zero(),
            Expr::Exp(inner) => *inner,
            x => Expr::Log(x.boxed()),
        },

        e @ (Expr::Variable(_) | Expr::Constant(_)) => e,
    };

    cache.insert(key, result.clone());
    result
}

/// Apply simplification passes until the expression stops changing or we hit the pass cap.
pub fn simplify_fully(expr: Expr) -> Expr {
    simplify_with_limit(expr, FULL_SIMPLIFY_PASSES)
}

/// Apply simplification passes up to `max_iters`, returning the last value if convergence is not reached.
pub fn simplify_with_limit(expr: Expr, max_iters: usize) -> Expr {
    let mut cache = HashMap::new();
    let mut current = expr;
    for _ in 0..max_iters {
        let next = simplify_cached(current.clone(), &mut cache);
        if next == current {
            return current;
        }
        current = next;
    }
    current
}

pub fn simplify_add(x: Expr, y: Expr) -> Expr {
    rebuild_sum(collect_sum(flatten_sum(&x).into_iter().chain(flatten_sum(&y))))
}

pub fn simplify_sub(x: Expr, y: Expr) -> Expr {
    simplify_add(x, simplify_neg(y))
}

fn flatten_sum(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Add(a, b) => {
            let mut out = flatten_sum(a);
            out.extend(flatten_sum(b));
            out
        }
        Expr::Sub(a, b) => {
            let mut out = flatten_sum(a);
            out.extend(flatten_sum(b).into_iter().map(simplify_neg));
            out
        }
        Expr::Neg(a) => flatten_sum(a).into_iter().map(simplify_neg).collect(),
        other => vec![other.clone()],
    }
}

fn count_sum_terms(expr: &Expr) -> usize {
    match expr {
        Expr::Add(a, b) | Expr::Sub(a, b) => count_sum_terms(a) + count_sum_terms(b),
        Expr::Neg(inner) => count_sum_terms(inner),
        _ => 1,
    }
}

fn split_coeff(expr: &Expr) -> (Rational, Expr) {
    match expr {
        Expr::Constant(c) => (c.clone(), one()),
        Expr::Neg(e) => {
            let (c, b) = split_coeff(e);
            (-c, b)
        }
        Expr::Mul(a, b) => {
            let (ca, ba) = split_coeff(a);
            let (cb, bb) = split_coeff(b);
            let (cm, base) = mul_norm(ba, bb);
            (ca * cb * cm, base)
        }
        other => (Rational::one(), other.clone()),
    }
}

fn canonical_factors(expr: &Expr) -> Vec<Expr> {
    let mut factors = factors(expr);
    factors.sort();
    factors
}

fn mul_from_sorted_factors(factors: &[Expr]) -> Expr {
    let mut iter = factors.iter().cloned();
    let Some(first) = iter.next() else {
        return one();
    };
    iter.fold(first, |acc, item| Expr::Mul(acc.boxed(), item.boxed()))
}

/// Multiply two coefficient-free products, merging repeated bases into powers.
/// Any factor that collapses to a constant is returned separately.
fn mul_norm(a: Expr, b: Expr) -> (Rational, Expr) {
    let mut exponents: BTreeMap<Expr, Rational> = BTreeMap::new();
    for factor in factors(&a).into_iter().chain(factors(&b)) {
        let (base, exp) = match factor {
            Expr::Pow(base, exp) => match *exp {
                Expr::Constant(e) => (*base, e),
                other => (Expr::Pow(base, other.boxed()), Rational::one()),
            },
            other => (other, Rational::one()),
        };
        *exponents.entry(base).or_insert_with(Rational::zero) += exp;
    }

    let mut coeff = Rational::one();
    let mut merged = Vec::with_capacity(exponents.len());
    for (base, exp) in exponents {
        match simplify_pow(base, Expr::Constant(exp)) {
            Expr::Constant(c) => coeff *= c,
            other => merged.push(other),
        }
    }
    (coeff, mk_mul_list(merged))
}

fn factors(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Mul(a, b) => {
            let mut out = factors(a);
            out.extend(factors(b));
            out
        }
        t if is_one(t) => vec![],
        t => vec![t.clone()],
    }
}

fn collect_sum<I>(terms: I) -> HashMap<CanonKey, Rational>
where
    I: IntoIterator<Item = Expr>,
{
    let mut map = HashMap::new();
    for term in terms {
        let (c, b) = split_coeff(&term);
        if c.is_zero() {
            continue;
        }
        let factors = canonical_factors(&b);
        map.entry(CanonKey(factors))
            .and_modify(|acc| *acc += &c)
            .or_insert(c);
    }
    map
}

fn rebuild_sum(mut map: HashMap<CanonKey, Rational>) -> Expr {
    let const_term = map
        .remove(&CanonKey(Vec::new()))
        .unwrap_or_else(Rational::zero);
    let mut items: Vec<(CanonKey, Rational)> = map.into_iter().collect();
    items.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut terms: Vec<Expr> = items
        .into_iter()
        .filter_map(|(CanonKey(factors), coef)| {
            if coef.is_zero() {
                None
            } else {
                Some(term_from(&coef, mul_from_sorted_factors(&factors)))
            }
        })
        .collect();

    if !const_term.is_zero() {
        terms.push(Expr::Constant(const_term));
    }

    mk_add_list(terms)
}

fn term_from(coef: &Rational, base: Expr) -> Expr {
    if coef.is_zero() {
        return zero();
    }

    if is_one(&base) {
        return Expr::Constant(coef.clone());
    }

    if coef.is_one() {
        return base;
    }

    if coef == &-Rational::one() {
        return simplify_neg(base);
    }

    Expr::Mul(Expr::Constant(coef.clone()).boxed(), base.boxed())
}

pub fn simplify_mul(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Add(a, b), t) => {
            let term_count = (count_sum_terms(&a) + count_sum_terms(&b)) * count_sum_terms(&t);
            if term_count <= DISTRIBUTE_TERM_LIMIT {
                simplify_add(simplify_mul(*a, t.clone()), simplify_mul(*b, t))
            } else {
                Expr::Mul(Expr::Add(a, b).boxed(), t.boxed())
            }
        }
        (Expr::Sub(a, b), t) => {
            let term_count = (count_sum_terms(&a) + count_sum_terms(&b)) * count_sum_terms(&t);
            if term_count <= DISTRIBUTE_TERM_LIMIT {
                simplify_sub(simplify_mul(*a, t.clone()), simplify_mul(*b, t))
            } else {
                Expr::Mul(Expr::Sub(a, b).boxed(), t.boxed())
            }
        }
        (t, Expr::Add(a, b)) => {
            let term_count = count_sum_terms(&t) * (count_sum_terms(&a) + count_sum_terms(&b));
            if term_count <= DISTRIBUTE_TERM_LIMIT {
                simplify_add(simplify_mul(t.clone(), *a), simplify_mul(t, *b))
            } else {
                Expr::Mul(t.boxed(), Expr::Add(a, b).boxed())
            }
        }
        (t, Expr::Sub(a, b)) => {
            let term_count = count_sum_terms(&t) * (count_sum_terms(&a) + count_sum_terms(&b));
            if term_count <= DISTRIBUTE_TERM_LIMIT {
                simplify_sub(simplify_mul(t.clone(), *a), simplify_mul(t, *b))
            } else {
                Expr::Mul(t.boxed(), Expr::Sub(a, b).boxed())
            }
        }
        (Expr::Constant(xc), Expr::Constant(yc)) => Expr::Constant(xc * yc),
        (x, y) if is_zero(&x) || is_zero(&y) => zero(),
        (x, y) if is_one(&x) => y,
        (x, y) if is_one(&y) => x,
        (x, y) => {
            let (c, b) = split_coeff(&Expr::Mul(x.boxed(), y.boxed()));
            term_from(&c, b)
        }
    }
}

pub fn simplify_div(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(n), Expr::Constant(d)) => {
            if d.is_zero() {
                Expr::Div(Expr::Constant(n).boxed(), Expr::Constant(d).boxed())
            } else {
                Expr::Constant(n / d)
            }
        }
        (x, _) if is_zero(&x) => zero(),
        (x, y) if is_one(&y) => x,
        (x, y) => {
            let (cx, bx) = split_coeff(&x);
            let (cy, by) = split_coeff(&y);
            if cy.is_zero() {
                return Expr::Div(x.boxed(), y.boxed());
            }
            let c = cx / cy;
            if bx == by && !is_one(&bx) {
                Expr::Constant(c)
            } else {
                let core = if is_one(&by) {
                    bx
                } else {
                    Expr::Div(bx.boxed(), by.boxed())
                };
                simplify_mul(Expr::Constant(c), core)
            }
        }
    }
}

pub fn simplify_pow(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (_, Expr::Constant(e)) if e.is_zero() => one(),
        (base, Expr::Constant(e)) if e.is_one() => base,
        (Expr::Constant(b), Expr::Constant(e)) => {
            if e.is_integer() {
                let k: BigInt = e.to_integer();
                if let Some(power) = k.abs().to_u32() {
                    if k >= BigInt::zero() {
                        let num = b.numer().pow(power);
                        let den = b.denom().pow(power);
                        return Expr::Constant(Rational::new(num, den));
                    } else if !b.is_zero() {
                        let num = b.denom().pow(power);
                        let den = b.numer().pow(power);
                        return Expr::Constant(Rational::new(num, den));
                    }
                }
            } else if *e.denom() == BigInt::from(2) && !b.is_negative() {
                if let Some(root) = exact_sqrt(&b) {
                    return simplify_pow(
                        Expr::Constant(root),
                        Expr::Constant(Rational::from_integer(e.numer().clone())),
                    );
                }
            }
            Expr::Pow(Expr::Constant(b).boxed(), Expr::Constant(e).boxed())
        }
        (Expr::Pow(base, inner), Expr::Constant(outer)) if outer.is_integer() => match *inner {
            Expr::Constant(k) => simplify_pow(*base, Expr::Constant(k * outer)),
            other => Expr::Pow(Expr::Pow(base, other.boxed()).boxed(), Expr::Constant(outer).boxed()),
        },
        (x, y) => Expr::Pow(x.boxed(), y.boxed()),
    }
}

pub fn simplify_neg(expr: Expr) -> Expr {
    match expr {
        Expr::Constant(x) => Expr::Constant(-x),
        Expr::Neg(x) => *x,
        Expr::Mul(a, b) => match *a {
            Expr::Constant(c) => term_from(&-c, *b),
            other => Expr::Neg(Expr::Mul(other.boxed(), b).boxed()),
        },
        other => Expr::Neg(other.boxed()),
    }
}

/// Exact square root of a non-negative rational, if it has one.
pub(crate) fn exact_sqrt(r: &Rational) -> Option<Rational> {
    if r.is_negative() {
        return None;
    }
    let num_root = r.numer().sqrt();
    let den_root = r.denom().sqrt();
    if &num_root * &num_root == *r.numer() && &den_root * &den_root == *r.denom() {
        Some(Rational::new(num_root, den_root))
    } else {
        None
    }
}

fn is_zero(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(r) if r.is_zero())
}

fn is_one(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(r) if r.is_one())
}

fn mk_add_list(items: Vec<Expr>) -> Expr {
    let mut iter = items.into_iter();
    let Some(first) = iter.next() else {
        return zero();
    };
    iter.fold(first, |acc, item| Expr::Add(acc.boxed(), item.boxed()))
}

fn mk_mul_list(mut items: Vec<Expr>) -> Expr {
    items.retain(|e| !is_one(e));
    items.sort();
    mul_from_sorted_factors(&items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;

    fn simp(input: &str) -> Expr {
        simplify_fully(parse_expr(input).expect("parse input"))
    }

    #[test]
    fn repeated_factors_merge_into_powers() {
        assert_eq!(simp("x*x"), simp("x^2"));
        assert_eq!(simp("x^2*x"), simp("x^3"));
        assert_eq!(simp("2x*3x"), simp("6x^2"));
    }

    #[test]
    fn like_terms_collect() {
        assert_eq!(simp("x + 2 - 5"), simp("x - 3"));
        assert_eq!(simp("2x + 3 + x"), simp("3x + 3"));
        assert_eq!(simp("x - x"), zero());
    }

    #[test]
    fn perfect_square_roots_fold() {
        assert_eq!(simp("sqrt(9/4)"), Expr::constant(3, 2));
        assert_eq!(simp("sqrt(2)*sqrt(2)"), Expr::integer(2));
    }
}
