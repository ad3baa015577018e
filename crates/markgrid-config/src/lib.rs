//! Per-test layout and answer-key configuration.
//!
//! A [`TestConfig`] records everything the grading side needs about a
//! generated batch: scoring parameters, the per-student shuffle of questions
//! and answers, the real correct-answer sets, and where every checkbox was
//! printed. It is built once per batch (parsed from the line-oriented text
//! format or the structured JSON export) and read-only thereafter.

mod io;
mod model;
mod params;
mod parse;

#[cfg(test)]
pub(crate) mod tests_support;

pub use model::{Shuffle, TestConfig};
pub use params::Parameters;

use markgrid_core::{QuestionId, TestId};

/// Errors raised while loading or querying a configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Malformed line or cross-section inconsistency; carries the raw
    /// offending line for manual correction.
    #[error("line {line_no}: {reason} (in {line:?})")]
    Parse {
        line_no: usize,
        reason: String,
        line: String,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("no test with id {0}")]
    UnknownTest(TestId),
    #[error("no question {0:?} in this test")]
    UnknownQuestion(QuestionId),
    #[error("question {question:?} has no answer {answer}")]
    UnknownAnswer { question: QuestionId, answer: u32 },
    #[error("apparent index {0} out of range")]
    ApparentOutOfRange(usize),
    #[error("missing `ID-table: (x, y)` anchor line")]
    MissingIdTable,
    #[error("{0}")]
    Inconsistent(String),
}

impl ConfigError {
    pub(crate) fn parse(line_no: usize, line: &str, reason: impl Into<String>) -> Self {
        ConfigError::Parse {
            line_no,
            reason: reason.into(),
            line: line.to_string(),
        }
    }
}
