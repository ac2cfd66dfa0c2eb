//! Error types for core record construction.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building domain records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A required builder field was not set.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// A field holds a value the record cannot represent.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: String,
        /// Description of the problem.
        reason: String,
    },
}

impl CoreError {
    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
