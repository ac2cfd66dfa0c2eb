//! Net present value.

use super::{growth, DEFAULT_DISCOUNT_RATE};
use capex_core::types::CashFlow;

/// Net present value: `Σ amount / (1 + rate)^year`.
///
/// Defined for any series, including an empty one (0). NaN or infinite
/// inputs propagate to the result.
///
/// # Example
///
/// ```rust
/// use capex_analytics::npv;
/// use capex_core::types::CashFlow;
///
/// let flows = CashFlow::from_amounts(&[-100.0, 110.0]);
/// assert!(npv(&flows, 0.10).abs() < 1e-12);
/// ```
#[must_use]
pub fn npv(cash_flows: &[CashFlow], rate: f64) -> f64 {
    cash_flows
        .iter()
        .map(|cf| cf.amount / growth(rate, cf.year))
        .sum()
}

/// Net present value at [`DEFAULT_DISCOUNT_RATE`].
#[must_use]
pub fn npv_at_default(cash_flows: &[CashFlow]) -> f64 {
    npv(cash_flows, DEFAULT_DISCOUNT_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_series() {
        assert!(npv(&[], 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_known_value() {
        // -1000 + 600/1.1 + 600/1.21 = 41.3223...
        let flows = CashFlow::from_amounts(&[-1000.0, 600.0, 600.0]);
        assert_relative_eq!(npv_at_default(&flows), 41.322_314_049_6, epsilon = 1e-8);
    }

    #[test]
    fn test_sparse_years() {
        let flows = vec![CashFlow::new(0, -500.0), CashFlow::new(3, 1331.0)];
        assert_relative_eq!(npv(&flows, 0.10), 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_nan_propagates() {
        let flows = vec![CashFlow::new(0, f64::NAN)];
        assert!(npv(&flows, 0.1).is_nan());
    }
}
