//! Error types for allocation operations.
//!
//! Numerical degradation (zero denominators, non-convergent IRR) is never an
//! error in this crate. Errors are reserved for arguments no computation can
//! give a meaningful answer to.

use thiserror::Error;

use capex_math::MathError;

/// Result type for allocation operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during allocation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// An argument is outside the domain of the operation.
    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        parameter: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Statistics over simulation outcomes failed.
    #[error("Statistics error: {0}")]
    Math(#[from] MathError),
}

impl PortfolioError {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

/// Rejects NaN and infinite budgets.
pub(crate) fn ensure_finite_budget(budget: f64) -> PortfolioResult<()> {
    if budget.is_finite() {
        Ok(())
    } else {
        Err(PortfolioError::invalid_argument(
            "budget",
            format!("must be finite, got {}", budget),
        ))
    }
}
