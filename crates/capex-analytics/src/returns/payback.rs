//! Payback period.

use super::NEVER_PAYS_BACK;
use crate::cashflows::sorted_by_year;
use capex_core::types::CashFlow;

/// Years until the cumulative cash flow turns non-negative.
///
/// Walks the series in year order. In the year the cumulative sum crosses
/// zero, the result is interpolated linearly within that year:
///
/// ```text
/// payback = (year - 1) + (-cumulative_before) / amount
/// ```
///
/// A series whose cumulative sum is already non-negative at its first flow
/// pays back in that flow's year. A series that never turns non-negative
/// returns [`NEVER_PAYS_BACK`] (99) so that averages stay finite.
///
/// # Example
///
/// ```rust
/// use capex_analytics::payback_period;
/// use capex_core::types::CashFlow;
///
/// let flows = CashFlow::from_amounts(&[-1000.0, 600.0, 600.0]);
/// assert!((payback_period(&flows) - 1.6667).abs() < 1e-4);
/// ```
#[must_use]
pub fn payback_period(cash_flows: &[CashFlow]) -> f64 {
    let mut cumulative = 0.0;

    for cf in sorted_by_year(cash_flows) {
        let before = cumulative;
        cumulative += cf.amount;

        if cumulative >= 0.0 {
            if before >= 0.0 {
                return f64::from(cf.year);
            }
            return f64::from(cf.year.saturating_sub(1)) + (-before) / cf.amount;
        }
    }

    NEVER_PAYS_BACK
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interpolated_crossing() {
        let flows = CashFlow::from_amounts(&[-1000.0, 600.0, 600.0]);
        assert_relative_eq!(payback_period(&flows), 1.0 + 400.0 / 600.0, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_crossing() {
        let flows = CashFlow::from_amounts(&[-1000.0, 500.0, 500.0]);
        assert_relative_eq!(payback_period(&flows), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_never_pays_back() {
        let flows = CashFlow::from_amounts(&[-1000.0, 100.0, 100.0]);
        assert_relative_eq!(payback_period(&flows), NEVER_PAYS_BACK);
        assert_relative_eq!(payback_period(&[]), NEVER_PAYS_BACK);
    }

    #[test]
    fn test_immediate_payback() {
        let flows = CashFlow::from_amounts(&[50.0, 10.0]);
        assert!(payback_period(&flows).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unsorted_input() {
        let flows = vec![
            CashFlow::new(2, 600.0),
            CashFlow::new(0, -1000.0),
            CashFlow::new(1, 600.0),
        ];
        assert_relative_eq!(payback_period(&flows), 1.0 + 400.0 / 600.0, epsilon = 1e-12);
    }
}
