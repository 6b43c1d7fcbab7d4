//! Error types raised by the grouping pipeline.

use thiserror::Error;

/// Why a single input line could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// The line had fewer than two whitespace-separated fields.
    #[error("expected two whitespace-separated fields")]
    MissingField,
    /// A field was present but did not parse as the key variant's number type.
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
}

/// Failures surfaced by the parser, the aggregation stage and the join stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// A line that is not a `<key> <value>` record.
    #[error("{}{reason}: {content:?}", line_prefix(.line))]
    Parse {
        line: Option<usize>,
        content: String,
        reason: ParseFailure,
    },
    /// A group reached aggregation with no values.
    #[error("group for key {key} has no values")]
    EmptyGroup { key: String },
    /// A throughput key has no matching latency group.
    #[error("key {key} has a throughput entry but no latency values")]
    KeyNotFound { key: String },
}

impl AggregateError {
    /// Attaches a 1-based line number to a parse error. Other variants pass through.
    pub fn at_line(self, n: usize) -> Self {
        match self {
            AggregateError::Parse {
                content, reason, ..
            } => AggregateError::Parse {
                line: Some(n),
                content,
                reason,
            },
            other => other,
        }
    }
}

fn line_prefix(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!("line {n}: "),
        None => String::new(),
    }
}
