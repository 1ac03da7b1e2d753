//! Error types for the transit environment abstraction.

use thiserror::Error;

/// Errors raised while reading records that cross the environment boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    /// A required record field is absent
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A record field is present but has the wrong shape or type
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// Search algorithm name not understood by the routing service
    #[error("Unknown search algorithm: {0}")]
    UnknownAlgorithm(String),
}

impl EnvError {
    /// Creates a missing-field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Creates an invalid-field error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
