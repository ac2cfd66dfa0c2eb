//! # Capex Math
//!
//! Numerical utilities for the Capex capital allocation engine.
//!
//! This crate provides:
//!
//! - **Solvers**: Best-effort Newton-Raphson root finding that reports why it stopped
//! - **Statistics**: Nearest-rank percentiles and zero-safe aggregates
//!
//! ## Design Philosophy
//!
//! - **Graceful Degradation**: Numerical trouble yields a status, not a panic
//! - **Finite Outputs**: Helpers never return NaN for empty or zero-weight input

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{newton_raphson, SolverConfig, SolverResult, SolverStatus};
    pub use crate::statistics::{
        fraction_where, mean, percentile_nearest_rank, safe_ratio, sample_std_dev,
        weighted_average,
    };
}

pub use error::{MathError, MathResult};
