//! Topic to strategy lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{ParsedProblem, Topic};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    SymbolicSolve,
    DifferentiateOrLimit,
    CountingProbability,
    MatrixOperations,
    General,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::SymbolicSolve => "symbolic_solve",
            Strategy::DifferentiateOrLimit => "differentiate_or_limit",
            Strategy::CountingProbability => "counting_probability",
            Strategy::MatrixOperations => "matrix_operations",
            Strategy::General => "general",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const STRATEGY_TABLE: &[(Topic, Strategy)] = &[
    (Topic::Algebra, Strategy::SymbolicSolve),
    (Topic::Calculus, Strategy::DifferentiateOrLimit),
    (Topic::Probability, Strategy::CountingProbability),
    (Topic::LinearAlgebra, Strategy::MatrixOperations),
];

/// Strategy for `topic`, [`Strategy::General`] when the table has no entry.
pub fn route(topic: Topic) -> Strategy {
    STRATEGY_TABLE
        .iter()
        .find(|(t, _)| *t == topic)
        .map(|(_, strategy)| *strategy)
        .unwrap_or(Strategy::General)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub topic: Topic,
    pub strategy: Strategy,
}

pub fn route_problem(parsed: &ParsedProblem) -> RouteDecision {
    RouteDecision {
        topic: parsed.topic,
        strategy: route(parsed.topic),
    }
}
