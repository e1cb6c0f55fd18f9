//! Keyword-driven topic classification.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Algebra,
    Calculus,
    Probability,
    LinearAlgebra,
}

impl Topic {
    pub const ALL: [Topic; 4] = [
        Topic::Algebra,
        Topic::Calculus,
        Topic::Probability,
        Topic::LinearAlgebra,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Algebra => "algebra",
            Topic::Calculus => "calculus",
            Topic::Probability => "probability",
            Topic::LinearAlgebra => "linear_algebra",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A keyword set and the topic it selects.
#[derive(Clone, Copy, Debug)]
pub struct TopicRule {
    pub keywords: &'static [&'static str],
    pub topic: Topic,
}

/// Rules in priority order; the first rule with any keyword present wins.
pub const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        keywords: &["derivative", "limit", "maximize", "minimize"],
        topic: Topic::Calculus,
    },
    TopicRule {
        keywords: &["probability", "dice", "coin"],
        topic: Topic::Probability,
    },
    TopicRule {
        keywords: &["matrix", "determinant"],
        topic: Topic::LinearAlgebra,
    },
];

pub const DEFAULT_TOPIC: Topic = Topic::Algebra;

/// Case-insensitive substring match against [`TOPIC_RULES`].
pub fn classify(text: &str) -> Topic {
    let lowered = text.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|rule| rule.topic)
        .unwrap_or(DEFAULT_TOPIC)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedProblem {
    pub problem_text: String,
    pub topic: Topic,
}

/// Trim the text (keeping its casing) and attach its topic.
pub fn parse_problem(text: &str) -> ParsedProblem {
    let problem_text = text.trim().to_string();
    let topic = classify(&problem_text);
    ParsedProblem {
        problem_text,
        topic,
    }
}
