//! Append-only JSON Lines log of user feedback on solutions.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::solve::{SolutionView, SolveOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Feedback::Correct => "correct",
            Feedback::Incorrect => "incorrect",
        })
    }
}

impl FromStr for Feedback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "correct" => Ok(Feedback::Correct),
            "incorrect" => Ok(Feedback::Incorrect),
            other => Err(format!("unknown feedback `{other}`, expected correct or incorrect")),
        }
    }
}

/// One line of the log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub timestamp: DateTime<Utc>,
    pub question: String,
    pub solution: SolutionView,
    pub feedback: Feedback,
    pub comment: Option<String>,
}

#[derive(Clone, Debug)]
pub struct FeedbackLog {
    path: PathBuf,
}

impl FeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FeedbackLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record. Failures are logged and otherwise ignored.
    pub fn record(
        &self,
        question: &str,
        outcome: &SolveOutcome,
        feedback: Feedback,
        comment: Option<&str>,
    ) {
        let record = FeedbackRecord {
            timestamp: Utc::now(),
            question: question.to_string(),
            solution: SolutionView::from(outcome),
            feedback,
            comment: comment.map(str::to_string),
        };
        match self.append(&record) {
            Ok(()) => debug!(path = ?self.path, %feedback, "feedback recorded"),
            Err(err) => warn!(path = ?self.path, error = %err, "failed to record feedback"),
        }
    }

    fn append(&self, record: &FeedbackRecord) -> io::Result<()> {
        let line = serde_json::to_string(record)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{line}")?;
        writer.flush()
    }

    /// Every well-formed record in file order. A missing file is an empty log;
    /// lines that do not parse are skipped.
    pub fn entries(&self) -> io::Result<Vec<FeedbackRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let mut entries = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(entry) => entries.push(entry),
                Err(err) => warn!(error = %err, "skipping malformed feedback line"),
            }
        }
        Ok(entries)
    }
}
