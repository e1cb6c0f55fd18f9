use crate::expr::{Expr, Rational};
use crate::simplify::{simplify, simplify_add, simplify_sub};
use num_traits::{One, Zero};

/// Symbolic derivative of `expr` with respect to `var`.
pub fn differentiate(var: &str, expr: &Expr) -> Expr {
    Differentiator { var }.derive(expr)
}

struct Differentiator<'a> {
    var: &'a str,
}

impl Differentiator<'_> {
    fn derive(&self, expr: &Expr) -> Expr {
        if !expr.contains_var(self.var) {
            return Expr::Constant(Rational::zero());
        }
        match expr {
            Expr::Variable(_) => Expr::Constant(Rational::one()),
            Expr::Constant(_) => Expr::Constant(Rational::zero()),

            Expr::Add(a, b) => simplify_add(self.derive(a), self.derive(b)),
            Expr::Sub(a, b) => simplify_sub(self.derive(a), self.derive(b)),
            Expr::Mul(a, b) => self.product_rule(a, b),
            Expr::Div(a, b) => self.quotient_rule(a, b),
            Expr::Pow(a, b) => self.power_rule(a, b),
            Expr::Neg(a) => simplify(Expr::Neg(self.derive(a).boxed())),

            Expr::Sin(a) => self.chain_rule(a, |inner| Expr::Cos(inner.boxed())),
            Expr::Cos(a) => simplify(Expr::Neg(
                self.chain_rule(a, |inner| Expr::Sin(inner.boxed())).boxed(),
            )),
            Expr::Tan(a) => self.chain_rule(a, |inner| {
                Expr::Div(
                    Expr::Constant(Rational::one()).boxed(),
                    Expr::Pow(Expr::Cos(inner.boxed()).boxed(), Expr::integer(2).boxed()).boxed(),
                )
            }),
            Expr::Exp(a) => self.chain_rule(a, |inner| Expr::Exp(inner.boxed())),
            Expr::Log(a) => simplify(Expr::Div(self.derive(a).boxed(), a.clone())),
        }
    }

    fn product_rule(&self, a: &Expr, b: &Expr) -> Expr {
        simplify(Expr::Add(
            Expr::Mul(self.derive(a).boxed(), b.clone().boxed()).boxed(),
            Expr::Mul(a.clone().boxed(), self.derive(b).boxed()).boxed(),
        ))
    }

    fn quotient_rule(&self, a: &Expr, b: &Expr) -> Expr {
        if !b.contains_var(self.var) {
            return simplify(Expr::Div(self.derive(a).boxed(), b.clone().boxed()));
        }
        simplify(Expr::Div(
            Expr::Sub(
                Expr::Mul(self.derive(a).boxed(), b.clone().boxed()).boxed(),
                Expr::Mul(a.clone().boxed(), self.derive(b).boxed()).boxed(),
            )
            .boxed(),
            Expr::Pow(b.clone().boxed(), Expr::integer(2).boxed()).boxed(),
        ))
    }

    fn power_rule(&self, base: &Expr, exp: &Expr) -> Expr {
        if !exp.contains_var(self.var) {
            let n = exp.clone();
            let lowered = Expr::Sub(n.clone().boxed(), Expr::Constant(Rational::one()).boxed());
            return simplify(Expr::Mul(
                Expr::Mul(
                    n.boxed(),
                    Expr::Pow(base.clone().boxed(), simplify(lowered).boxed()).boxed(),
                )
                .boxed(),
                self.derive(base).boxed(),
            ));
        }

        // d(f^g) = f^g * (g' log f + g f' / f)
        let f = Expr::Pow(base.clone().boxed(), exp.clone().boxed());
        simplify(Expr::Mul(
            f.boxed(),
            Expr::Add(
                Expr::Mul(
                    self.derive(exp).boxed(),
                    Expr::Log(base.clone().boxed()).boxed(),
                )
                .boxed(),
                Expr::Div(
                    Expr::Mul(exp.clone().boxed(), self.derive(base).boxed()).boxed(),
                    base.clone().boxed(),
                )
                .boxed(),
            )
            .boxed(),
        ))
    }

    fn chain_rule<F>(&self, arg: &Expr, outer: F) -> Expr
    where
        F: Fn(Expr) -> Expr,
    {
        simplify(Expr::Mul(self.derive(arg).boxed(), outer(arg.clone()).boxed()))
    }
}
