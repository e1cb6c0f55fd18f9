//! Calculus routines (differentiation and limits).

pub mod differentiate;
pub mod limit;

pub use differentiate::differentiate;
pub use limit::{LimitValue, limit};
