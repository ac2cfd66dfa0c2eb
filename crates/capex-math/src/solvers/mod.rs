//! Root-finding algorithms.
//!
//! Only Newton-Raphson is provided. It is tuned for discounted cash-flow
//! equations, where the caller prefers the best available estimate over an
//! error: every run yields a [`SolverResult`] whose [`SolverStatus`] says why
//! iteration stopped.
//!
//! # Example: IRR-style equation
//!
//! ```rust
//! use capex_math::solvers::{newton_raphson, SolverConfig, SolverStatus};
//!
//! // -1000 today, +1100 in a year: root at r = 10%
//! let f = |r: f64| -1000.0 + 1100.0 / (1.0 + r);
//! let df = |r: f64| -1100.0 / (1.0 + r).powi(2);
//!
//! let result = newton_raphson(f, df, 0.05, &SolverConfig::default()).unwrap();
//! assert_eq!(result.status, SolverStatus::Converged);
//! assert!((result.root - 0.10).abs() < 1e-6);
//! ```

mod newton;

pub use newton::newton_raphson;

use crate::error::{MathError, MathResult};

/// Default step tolerance for root finding.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root finding.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default derivative magnitude below which iteration stops.
pub const DEFAULT_DERIVATIVE_FLOOR: f64 = 1e-15;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Stop once successive estimates differ by less than this.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Stop once the derivative magnitude falls below this.
    pub derivative_floor: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            derivative_floor: DEFAULT_DERIVATIVE_FLOOR,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the derivative floor.
    #[must_use]
    pub fn with_derivative_floor(mut self, floor: f64) -> Self {
        self.derivative_floor = floor;
        self
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> MathResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MathError::invalid_input(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if !(self.derivative_floor.is_finite() && self.derivative_floor >= 0.0) {
            return Err(MathError::invalid_input(format!(
                "derivative floor must be non-negative and finite, got {}",
                self.derivative_floor
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_input("max_iterations must be at least 1"));
        }
        Ok(())
    }
}

/// Why a solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Successive estimates agreed within tolerance.
    Converged,
    /// The derivative became too flat to take another step.
    FlatDerivative,
    /// The next step would have left the finite range.
    NonFinite,
    /// The iteration budget ran out.
    MaxIterations,
}

impl SolverStatus {
    /// Returns true for the statuses treated as a usable root.
    #[must_use]
    pub fn is_converged(self) -> bool {
        matches!(self, SolverStatus::Converged | SolverStatus::FlatDerivative)
    }
}

/// Result of a root-finding run.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// Best estimate of the root.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Function value at `root`.
    pub residual: f64,
    /// Why iteration stopped.
    pub status: SolverStatus,
}
