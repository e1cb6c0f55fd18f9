//! Classify, route, solve, verify and explain one problem.

use serde::Serialize;
use tracing::{debug, info};

use crate::classify::{ParsedProblem, parse_problem};
use crate::config::Settings;
use crate::error::{CasError, Result};
use crate::explain::{Explanation, explain};
use crate::route::{RouteDecision, route_problem};
use crate::solve::{SolveOutcome, serialize_outcome, solve_problem};
use crate::verify::{ConsistencyVerifier, VerificationResult, Verifier};

/// Everything produced for one problem. `explanation` is present exactly
/// when `verification.valid` holds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub parsed: ParsedProblem,
    pub route: RouteDecision,
    #[serde(serialize_with = "serialize_outcome")]
    pub solution: SolveOutcome,
    pub verification: VerificationResult,
    pub explanation: Option<Explanation>,
}

pub struct Pipeline<V = ConsistencyVerifier> {
    settings: Settings,
    verifier: V,
}

impl Pipeline<ConsistencyVerifier> {
    pub fn new(settings: Settings) -> Self {
        Pipeline::with_verifier(settings, ConsistencyVerifier)
    }
}

impl Default for Pipeline<ConsistencyVerifier> {
    fn default() -> Self {
        Pipeline::new(Settings::default())
    }
}

impl<V: Verifier> Pipeline<V> {
    pub fn with_verifier(settings: Settings, verifier: V) -> Self {
        Pipeline { settings, verifier }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run every stage on `text`. Only blank input is an error; solver
    /// failures are carried in [`Report::solution`].
    pub fn run(&self, text: &str) -> Result<Report> {
        if text.trim().is_empty() {
            return Err(CasError::EmptyProblem);
        }

        let parsed = parse_problem(text);
        info!(topic = %parsed.topic, "classified problem");

        let route = route_problem(&parsed);
        debug!(strategy = %route.strategy, "routed problem");

        let solution = solve_problem(&parsed, &route, &self.settings.solver);

        let verification = self.verifier.verify(&solution);
        info!(valid = verification.valid, "verification finished");

        let explanation = match (&solution, verification.valid) {
            (Ok(result), true) => Some(explain(&parsed, result)),
            _ => None,
        };

        Ok(Report {
            parsed,
            route,
            solution,
            verification,
            explanation,
        })
    }
}
