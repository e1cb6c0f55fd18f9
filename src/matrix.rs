//! Dense matrices over the rationals.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::error::{CasError, Result};
use crate::expr::Rational;
use crate::format::show_rational;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Rational>,
}

impl Matrix {
    /// Build a matrix from integer rows. Every row must have the length of
    /// the first one.
    pub fn from_rows(rows: Vec<Vec<BigInt>>) -> Result<Self> {
        let cols = rows.first().map(Vec::len).ok_or(CasError::EmptyMatrix)?;
        if cols == 0 {
            return Err(CasError::EmptyMatrix);
        }
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in &rows {
            if row.len() != cols {
                return Err(CasError::RaggedMatrix {
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend(row.iter().cloned().map(Rational::from_integer));
        }
        Ok(Matrix {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> &Rational {
        &self.data[self.idx(row, col)]
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn get_mut(&mut self, row: usize, col: usize) -> &mut Rational {
        let idx = self.idx(row, col);
        &mut self.data[idx]
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let cols = self.cols;
        for offset in 0..cols {
            self.data.swap(a * cols + offset, b * cols + offset);
        }
    }

    fn ensure_square(&self) -> Result<()> {
        if self.rows == self.cols {
            Ok(())
        } else {
            Err(CasError::NonSquareMatrix {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Determinant by fraction-exact Gaussian elimination with partial
    /// pivoting. Each row swap flips the sign.
    pub fn determinant(&self) -> Result<Rational> {
        self.ensure_square()?;
        let n = self.rows;
        let mut work = self.clone();
        let mut det = Rational::one();

        for col in 0..n {
            let mut pivot_row = None;
            let mut pivot_abs = Rational::zero();
            for r in col..n {
                let value = work.get(r, col).abs();
                if !value.is_zero() && value > pivot_abs {
                    pivot_abs = value;
                    pivot_row = Some(r);
                }
            }
            let Some(pivot_idx) = pivot_row else {
                return Ok(Rational::zero());
            };

            if pivot_idx != col {
                work.swap_rows(col, pivot_idx);
                det = -det;
            }

            let pivot_value = work.get(col, col).clone();
            det *= &pivot_value;

            for r in col + 1..n {
                let factor = work.get(r, col).clone() / &pivot_value;
                if factor.is_zero() {
                    continue;
                }
                for c in col..n {
                    let delta = &factor * work.get(col, c);
                    *work.get_mut(r, c) -= delta;
                }
            }
        }

        Ok(det)
    }

    /// Determinant by Bareiss fraction-free elimination. Every division is
    /// exact, so integer input stays integral throughout.
    pub fn bareiss_determinant(&self) -> Result<Rational> {
        self.ensure_square()?;
        let n = self.rows;
        let mut work = self.clone();
        let mut negate = false;
        let mut previous = Rational::one();

        for k in 0..n.saturating_sub(1) {
            if work.get(k, k).is_zero() {
                let Some(swap) = (k + 1..n).find(|&r| !work.get(r, k).is_zero()) else {
                    return Ok(Rational::zero());
                };
                work.swap_rows(k, swap);
                negate = !negate;
            }
            let pivot = work.get(k, k).clone();
            for r in k + 1..n {
                for c in k + 1..n {
                    let value = (work.get(r, c) * &pivot - work.get(r, k) * work.get(k, c))
                        / &previous;
                    *work.get_mut(r, c) = value;
                }
            }
            previous = pivot;
        }

        let det = work.get(n - 1, n - 1).clone();
        Ok(if negate { -det } else { det })
    }

    /// Determinant by Laplace expansion along the first row. Exponential in
    /// the size, used to cross-check [`Matrix::determinant`] on small input.
    pub fn cofactor_determinant(&self) -> Result<Rational> {
        self.ensure_square()?;
        let indices: Vec<usize> = (0..self.cols).collect();
        Ok(self.expand(0, &indices))
    }

    fn expand(&self, row: usize, cols: &[usize]) -> Rational {
        if cols.len() == 1 {
            return self.get(row, cols[0]).clone();
        }
        let mut total = Rational::zero();
        for (position, &col) in cols.iter().enumerate() {
            let entry = self.get(row, col);
            if entry.is_zero() {
                continue;
            }
            let minor: Vec<usize> = cols.iter().copied().filter(|&c| c != col).collect();
            let term = entry * self.expand(row + 1, &minor);
            if position % 2 == 0 {
                total += term;
            } else {
                total -= term;
            }
        }
        total
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for row in 0..self.rows {
            if row > 0 {
                write!(f, ", ")?;
            }
            let cells: Vec<String> = (0..self.cols)
                .map(|col| show_rational(self.get(row, col)))
                .collect();
            write!(f, "[{}]", cells.join(", "))?;
        }
        write!(f, "]")
    }
}
