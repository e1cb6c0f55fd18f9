//! Determinants of integer matrices written inline as `[1, 2], [3, 4]`.

use std::sync::LazyLock;

use num_bigint::BigInt;
use regex::Regex;
use tracing::debug;

use crate::error::CasError;
use crate::expr::Expr;
use crate::matrix::Matrix;

use super::{Answer, Certificate, SolveError, SolveOutcome, SolverResult};

pub const DETERMINANT_MARKER: &str = "determinant";

/// One bracketed row of integers.
static MATRIX_ROW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([-0-9,\s]+)\]").unwrap());

/// Used when the text names no rows.
pub const DEFAULT_MATRIX: [[i64; 2]; 2] = [[1, 2], [3, 4]];

pub fn solve(text: &str) -> SolveOutcome {
    if !text.to_lowercase().contains(DETERMINANT_MARKER) {
        return Err(SolveError::unhandled());
    }

    let rows = match parse_rows(text)? {
        rows if rows.is_empty() => DEFAULT_MATRIX
            .iter()
            .map(|row| row.iter().map(|&v| BigInt::from(v)).collect())
            .collect(),
        rows => rows,
    };
    let matrix = Matrix::from_rows(rows.clone())?;
    debug!(%matrix, "parsed matrix");
    let mut steps = vec!["Parsed matrix".to_string()];

    let determinant = matrix.determinant()?;
    steps.push("Computed determinant".to_string());

    Ok(
        SolverResult::new(steps, Answer::Value(Expr::Constant(determinant)))
            .certified(Certificate::Determinant { rows }),
    )
}

/// Every bracketed row in `text`, entries parsed as integers.
pub fn parse_rows(text: &str) -> Result<Vec<Vec<BigInt>>, CasError> {
    MATRIX_ROW
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|row| {
            row.as_str()
                .split(',')
                .map(|entry| {
                    let entry = entry.trim();
                    entry
                        .parse::<BigInt>()
                        .map_err(|e| CasError::parse(entry, e.to_string()))
                })
                .collect()
        })
        .collect()
}
