//! Core domain errors.

use thiserror::Error;

/// Core domain errors for twtodo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A status string outside the vocabulary of its source.
    #[error("Unknown {source_name} status: '{value}'")]
    UnknownStatus {
        source_name: &'static str,
        value: String,
    },

    /// A timestamp that could not be parsed.
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
}
