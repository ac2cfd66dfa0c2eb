//! Year-indexed project cash flows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cash flow occurring in a given project year.
///
/// Year 0 is the investment date. Negative amounts are outflows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Project year, 0 for the initial investment.
    pub year: u32,
    /// Signed cash amount.
    pub amount: f64,
}

impl CashFlow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(year: u32, amount: f64) -> Self {
        Self { year, amount }
    }

    /// Builds a dense series from amounts, assigning years 0, 1, 2, ...
    ///
    /// ```rust
    /// use capex_core::types::CashFlow;
    ///
    /// let flows = CashFlow::from_amounts(&[-1000.0, 600.0, 600.0]);
    /// assert_eq!(flows[2].year, 2);
    /// ```
    #[must_use]
    pub fn from_amounts(amounts: &[f64]) -> Vec<Self> {
        amounts
            .iter()
            .zip(0u32..)
            .map(|(&amount, year)| Self::new(year, amount))
            .collect()
    }

    /// Returns true if this is an outflow.
    #[must_use]
    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns a copy with the amount multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            year: self.year,
            amount: self.amount * factor,
        }
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{}: {:.2}", self.year, self.amount)
    }
}
