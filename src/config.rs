//! Solver and pipeline settings.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_VARIABLE: &str = "x";
pub const DEFAULT_LHOPITAL_DEPTH: usize = 4;
pub const DEFAULT_FEEDBACK_LOG: &str = "feedback_log.jsonl";

pub const VARIABLE_ENV: &str = "MATHMENTOR_VARIABLE";
pub const LHOPITAL_DEPTH_ENV: &str = "MATHMENTOR_LHOPITAL_DEPTH";
pub const FEEDBACK_LOG_ENV: &str = "MATHMENTOR_FEEDBACK_LOG";

/// Passed explicitly to every solver call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// The unknown solved for and differentiated by.
    pub variable: String,
    /// How many times L'Hôpital's rule may be applied in one limit.
    pub lhopital_depth: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            variable: DEFAULT_VARIABLE.to_string(),
            lhopital_depth: DEFAULT_LHOPITAL_DEPTH,
        }
    }
}

impl SolverConfig {
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub feedback_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            solver: SolverConfig::default(),
            feedback_path: PathBuf::from(DEFAULT_FEEDBACK_LOG),
        }
    }
}

impl Settings {
    /// Defaults overridden by `MATHMENTOR_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an arbitrary key lookup.
    /// Malformed values are reported and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Settings::default();

        if let Some(variable) = lookup(VARIABLE_ENV) {
            let variable = variable.trim();
            if is_single_letter(variable) {
                settings.solver.variable = variable.to_ascii_lowercase();
            } else {
                warn!(key = VARIABLE_ENV, value = variable, "expected a single letter, using default");
            }
        }
        if let Some(depth) = parse_var::<usize>(&lookup, LHOPITAL_DEPTH_ENV) {
            settings.solver.lhopital_depth = depth;
        }
        if let Some(path) = lookup(FEEDBACK_LOG_ENV).filter(|p| !p.trim().is_empty()) {
            settings.feedback_path = PathBuf::from(path);
        }

        settings
    }
}

pub fn is_single_letter(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "malformed setting, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(Settings::from_lookup(|_| None), Settings::default());
    }

    #[test]
    fn overrides_are_applied() {
        let settings = Settings::from_lookup(lookup_from(&[
            (VARIABLE_ENV, "T"),
            (LHOPITAL_DEPTH_ENV, " 7 "),
            (FEEDBACK_LOG_ENV, "/tmp/fb.jsonl"),
        ]));
        assert_eq!(settings.solver.variable, "t");
        assert_eq!(settings.solver.lhopital_depth, 7);
        assert_eq!(settings.feedback_path, PathBuf::from("/tmp/fb.jsonl"));
    }

    #[test]
    fn malformed_values_fall_back() {
        let settings = Settings::from_lookup(lookup_from(&[
            (VARIABLE_ENV, "xy"),
            (LHOPITAL_DEPTH_ENV, "many"),
        ]));
        assert_eq!(settings, Settings::default());
    }
}
