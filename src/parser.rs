//! `nom` parser for the normalized expressions produced by [`crate::extract`].
//!
//! Besides the usual infix grammar it accepts `**` as a power operator,
//! decimal literals (kept exact), and implicit multiplication: `2x`,
//! `3(x+1)`, `(x+1)(x-1)` and `xy` all parse as products. Letter runs that do
//! not start with a known function name are read one letter at a time, so
//! every variable is a single letter.

use crate::error::{CasError, Result};
use crate::expr::{Expr, Rational};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1, multispace0, satisfy};
use nom::combinator::{all_consuming, map, map_res, not, opt, recognize};
use nom::error::{VerboseError, convert_error};
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded, terminated};
use num_bigint::{BigInt, ParseBigIntError};
use num_traits::One;

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

pub fn parse_expr(input: &str) -> Result<Expr> {
    match all_consuming(ws(parse_add_sub))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(CasError::parse(input, convert_error(input, e).trim().to_string()))
        }
        Err(nom::Err::Incomplete(_)) => Err(CasError::parse(input, "incomplete input")),
    }
}

fn parse_add_sub(input: &str) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_mul_div(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_mul_div),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::Add(acc.boxed(), rhs.boxed()),
            '-' => Expr::Sub(acc.boxed(), rhs.boxed()),
            _ => unreachable!(),
        },
    )(rest)
}

fn parse_mul_div(input: &str) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_unary(input)?;
    fold_many0(
        alt((
            pair(ws(mul_op), parse_unary),
            // Juxtaposition: `2x`, `x(x+1)`. Never starts with a sign.
            map(parse_pow, |rhs| ('*', rhs)),
        )),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::Mul(acc.boxed(), rhs.boxed()),
            '/' => Expr::Div(acc.boxed(), rhs.boxed()),
            _ => unreachable!(),
        },
    )(rest)
}

fn mul_op(input: &str) -> ParseResult<'_, char> {
    alt((terminated(char('*'), not(char('*'))), char('/')))(input)
}

fn parse_unary(input: &str) -> ParseResult<'_, Expr> {
    if let Ok((rest, expr)) = preceded(ws(char('-')), parse_unary)(input) {
        Ok((rest, Expr::Neg(expr.boxed())))
    } else if let Ok((rest, expr)) = preceded(ws(char('+')), parse_unary)(input) {
        Ok((rest, expr))
    } else {
        parse_pow(input)
    }
}

fn parse_pow(input: &str) -> ParseResult<'_, Expr> {
    let (rest, base) = parse_primary(input)?;
    if let Ok((next, exp)) = preceded(ws(alt((tag("**"), tag("^")))), parse_unary)(rest) {
        Ok((next, Expr::Pow(base.boxed(), exp.boxed())))
    } else {
        Ok((rest, base))
    }
}

fn parse_primary(input: &str) -> ParseResult<'_, Expr> {
    alt((parse_parens, parse_function, parse_number, parse_variable))(input)
}

fn parse_parens(input: &str) -> ParseResult<'_, Expr> {
    delimited(ws(char('(')), parse_add_sub, ws(char(')')))(input)
}

fn parse_function(input: &str) -> ParseResult<'_, Expr> {
    let (rest, name) = ws(alt((
        tag("sqrt"),
        tag("sin"),
        tag("cos"),
        tag("tan"),
        tag("exp"),
        tag("log"),
        tag("ln"),
    )))(input)?;
    let (rest, arg) = alt((parse_parens, parse_pow))(rest)?;

    let expr = match name {
        "sqrt" => arg.sqrt(),
        "sin" => Expr::Sin(arg.boxed()),
        "cos" => Expr::Cos(arg.boxed()),
        "tan" => Expr::Tan(arg.boxed()),
        "exp" => Expr::Exp(arg.boxed()),
        "log" | "ln" => Expr::Log(arg.boxed()),
        _ => unreachable!(),
    };

    Ok((rest, expr))
}

fn parse_number(input: &str) -> ParseResult<'_, Expr> {
    map_res(
        ws(recognize(pair(digit1, opt(pair(char('.'), digit1))))),
        |s: &str| decimal_to_rational(s).map(Expr::Constant),
    )(input)
}

fn parse_variable(input: &str) -> ParseResult<'_, Expr> {
    map(ws(satisfy(|c| c.is_ascii_alphabetic())), |c| {
        Expr::Variable(c.to_string())
    })(input)
}

/// Exact value of an unsigned decimal literal such as `12` or `2.50`.
pub fn decimal_to_rational(text: &str) -> std::result::Result<Rational, ParseBigIntError> {
    match text.split_once('.') {
        Some((whole, frac)) => {
            let numer: BigInt = format!("{whole}{frac}").parse()?;
            let denom = BigInt::from(10u32).pow(frac.len() as u32);
            Ok(Rational::new(numer, denom))
        }
        None => Ok(Rational::from_integer(text.parse()?)),
    }
}

/// Signed variant of [`decimal_to_rational`], as found after `->` in limit clauses.
pub fn signed_decimal_to_rational(text: &str) -> Option<Rational> {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-Rational::one(), rest),
        None => (Rational::one(), text.strip_prefix('+').unwrap_or(text)),
    };
    decimal_to_rational(digits).ok().map(|value| sign * value)
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}
