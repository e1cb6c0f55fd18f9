//! Interpret informally phrased math problems and produce verified,
//! explained symbolic solutions.
//!
//! The pipeline classifies a problem into a [`Topic`], routes it to a
//! [`Strategy`], extracts and solves the expression with a small exact
//! computer-algebra core, checks the answer with a [`Verifier`] and, when the
//! check passes, explains the solution step by step.

pub mod calculus;
pub mod classify;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod explain;
pub mod expr;
pub mod extract;
pub mod feedback;
pub mod format;
pub mod matrix;
pub mod parser;
pub mod pipeline;
pub mod polynomial;
pub mod roots;
pub mod route;
pub mod simplify;
pub mod solve;
pub mod verify;

pub use calculus::{LimitValue, differentiate, limit};
pub use classify::{ParsedProblem, Topic, classify, parse_problem};
pub use config::{Settings, SolverConfig};
pub use error::{CasError, Result};
pub use explain::{Explanation, explain};
pub use expr::{Expr, Rational, add, div, mul, neg, one, pow, rational, sub, zero};
pub use extract::extract_expression;
pub use feedback::{Feedback, FeedbackLog, FeedbackRecord};
pub use format::{pretty, pretty_list};
pub use matrix::Matrix;
pub use parser::parse_expr;
pub use pipeline::{Pipeline, Report};
pub use polynomial::{Poly, RationalFunction};
pub use roots::solve_equation;
pub use route::{RouteDecision, Strategy, route, route_problem};
pub use simplify::{simplify, simplify_fully, substitute};
pub use solve::{
    Answer, Certificate, ErrorKind, SolutionView, SolveError, SolveOutcome, SolverResult,
    solve_problem,
};
pub use verify::{ConsistencyVerifier, VerificationResult, Verifier};
