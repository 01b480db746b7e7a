// =============================================================================
// Error Types
// =============================================================================
//
// One error enum for the whole core library. Every public function that can
// fail returns `Result<T>` and fails fast: no partial tables, no silent
// defaults. The caller (a notebook, a report script, the Python bindings)
// decides whether to abort or substitute something.
//
// Nothing in here is ever retried. All inputs are deterministic, so running
// the same call again reproduces the same failure.
//
// =============================================================================

use thiserror::Error;

/// Errors produced by the benfordstats core library.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BenfordError {
    /// An observation that has no leading digit: zero, negative, NaN or infinite.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A computation needed at least one observation and got none.
    #[error("empty dataset: {0}")]
    EmptyDataset(String),

    /// A malformed argument: zero sample size, zero trials, a digit table
    /// that does not have exactly nine entries, an unknown column name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An expected count that is not strictly positive.
    ///
    /// The Law Model never produces one, so seeing this means the caller
    /// built the expected vector by hand.
    #[error("invalid expected value: {0}")]
    InvalidExpectedValue(String),

    /// The dataset text could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result alias used throughout the core library.
pub type Result<T> = std::result::Result<T, BenfordError>;

impl From<serde_json::Error> for BenfordError {
    fn from(err: serde_json::Error) -> Self {
        BenfordError::Parse(err.to_string())
    }
}
