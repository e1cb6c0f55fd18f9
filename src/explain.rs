//! Step-by-step explanations of verified solutions.

use crate::classify::ParsedProblem;
use crate::solve::SolverResult;

pub const PREAMBLE: &str = "We first understand what is being asked.";
pub const FINAL_ANSWER_PREFIX: &str = "Final Answer: ";

/// Ordered explanation lines.
pub type Explanation = Vec<String>;

/// The preamble, each recorded step in order, then the final answer.
///
/// Callers only explain results that passed verification.
pub fn explain(_parsed: &ParsedProblem, solution: &SolverResult) -> Explanation {
    let mut lines = Vec::with_capacity(solution.steps.len() + 2);
    lines.push(PREAMBLE.to_string());
    lines.extend(solution.steps.iter().cloned());
    lines.push(format!("{FINAL_ANSWER_PREFIX}{}", solution.final_answer));
    lines
}
