//! Domain solvers and the records they produce.

use std::fmt;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculus::LimitValue;
use crate::classify::ParsedProblem;
use crate::config::SolverConfig;
use crate::error::CasError;
use crate::expr::{Expr, Rational};
use crate::format::{pretty_list, show_rational};
use crate::route::{RouteDecision, Strategy};

pub mod algebra;
pub mod calculus;
pub mod linear_algebra;
pub mod probability;

/// Step recorded for every failed solve in the presentation form.
pub const SOLVER_ERROR_STEP: &str = "Solver error";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    /// Real roots in ascending order.
    Roots(Vec<Expr>),
    Value(Expr),
    Limit(LimitValue),
    Probability(Rational),
    NotAvailable,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Roots(roots) => f.write_str(&pretty_list(roots)),
            Answer::Value(expr) => write!(f, "{expr}"),
            Answer::Limit(value) => write!(f, "{value}"),
            Answer::Probability(p) => f.write_str(&show_rational(p)),
            Answer::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What a solver claims to have done, in a form a verifier can re-check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Certificate {
    /// The answer lists the real zeros of `equation`.
    Roots { equation: Expr, variable: String },
    /// The answer is the derivative of `function`.
    Derivative { function: Expr, variable: String },
    /// The answer is the right-hand limit of `function` at `point`.
    Limit {
        function: Expr,
        variable: String,
        point: Rational,
    },
    /// The answer is the determinant of these rows.
    Determinant { rows: Vec<Vec<BigInt>> },
    /// The answer is `favorable / total`.
    Probability { favorable: BigInt, total: BigInt },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SolverResult {
    pub steps: Vec<String>,
    pub final_answer: Answer,
    #[serde(skip)]
    pub certificate: Option<Certificate>,
}

impl SolverResult {
    pub fn new(steps: Vec<String>, final_answer: Answer) -> Self {
        SolverResult {
            steps,
            final_answer,
            certificate: None,
        }
    }

    pub fn certified(mut self, certificate: Certificate) -> Self {
        self.certificate = Some(certificate);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The extracted text is not a well-formed expression.
    Parse,
    /// The symbolic engine could not finish.
    Engine,
    /// No solving branch covers the problem.
    Unhandled,
    /// Matrix rows are missing or of different lengths.
    MatrixShape,
}

#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct SolveError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SolveError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        SolveError {
            kind,
            message: message.into(),
        }
    }

    pub fn unhandled() -> Self {
        SolveError::new(ErrorKind::Unhandled, "Could not solve automatically")
    }
}

impl From<CasError> for SolveError {
    fn from(err: CasError) -> Self {
        let kind = match err {
            CasError::Parse { .. } | CasError::EmptyProblem => ErrorKind::Parse,
            CasError::Unsupported(_) => ErrorKind::Engine,
            CasError::RaggedMatrix { .. }
            | CasError::EmptyMatrix
            | CasError::NonSquareMatrix { .. } => ErrorKind::MatrixShape,
        };
        SolveError::new(kind, err.to_string())
    }
}

pub type SolveOutcome = Result<SolverResult, SolveError>;

/// The flat `{steps, final_answer}` shape shown to users and written to the
/// feedback log. Failures become a single "Solver error" step whose answer
/// is the error message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionView {
    pub steps: Vec<String>,
    pub final_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl From<&SolveOutcome> for SolutionView {
    fn from(outcome: &SolveOutcome) -> Self {
        match outcome {
            Ok(result) => SolutionView {
                steps: result.steps.clone(),
                final_answer: result.final_answer.to_string(),
                error: None,
            },
            Err(err) => SolutionView {
                steps: vec![SOLVER_ERROR_STEP.to_string()],
                final_answer: err.message.clone(),
                error: Some(err.kind),
            },
        }
    }
}

/// Serialize an outcome through its [`SolutionView`].
pub fn serialize_outcome<S: Serializer>(
    outcome: &SolveOutcome,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    SolutionView::from(outcome).serialize(serializer)
}

/// Dispatch to the solver for the routed strategy.
pub fn solve_problem(
    parsed: &ParsedProblem,
    route: &RouteDecision,
    config: &SolverConfig,
) -> SolveOutcome {
    let text = parsed.problem_text.as_str();
    let outcome = match route.strategy {
        Strategy::SymbolicSolve => algebra::solve(text, config),
        Strategy::DifferentiateOrLimit => calculus::solve(text, config),
        Strategy::CountingProbability => probability::solve(text),
        Strategy::MatrixOperations => linear_algebra::solve(text),
        Strategy::General => Err(SolveError::unhandled()),
    };
    match &outcome {
        Ok(result) => debug!(answer = %result.final_answer, steps = result.steps.len(), "solved"),
        Err(err) => warn!(kind = ?err.kind, message = %err.message, "solve failed"),
    }
    outcome
}
