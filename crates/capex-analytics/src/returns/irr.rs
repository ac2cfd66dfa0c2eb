//! Internal rate of return.

use super::{clamp_percent, growth};
use capex_core::types::CashFlow;
use capex_math::solvers::{newton_raphson, SolverConfig, SolverResult};
use capex_math::MathResult;

/// Newton-Raphson settings for IRR: 100 iterations, stop when successive
/// rates differ by less than 1e-4 or the derivative is flatter than 1e-4.
pub const IRR_SOLVER_CONFIG: SolverConfig = SolverConfig {
    tolerance: 1e-4,
    max_iterations: 100,
    derivative_floor: 1e-4,
};

/// Initial guess for IRR (10%).
const DEFAULT_GUESS: f64 = 0.10;

/// Internal rate of return in percent, starting from a 10% guess.
///
/// See [`irr_with_guess`].
#[must_use]
pub fn irr(cash_flows: &[CashFlow]) -> f64 {
    irr_with_guess(cash_flows, DEFAULT_GUESS)
}

/// Internal rate of return in percent.
///
/// Solves `Σ amount / (1 + r)^year = 0` by Newton-Raphson from
/// `initial_guess` (decimal, e.g. 0.10). Non-convergence returns the last
/// estimate. The result is clamped to `[-99, 999]`, so series with no real
/// root (all-positive or all-negative) report a bound rather than NaN.
///
/// # Example
///
/// ```rust
/// use capex_analytics::irr;
/// use capex_core::types::CashFlow;
///
/// let flows = CashFlow::from_amounts(&[-1000.0, 1100.0]);
/// assert!((irr(&flows) - 10.0).abs() < 1e-3);
/// ```
#[must_use]
pub fn irr_with_guess(cash_flows: &[CashFlow], initial_guess: f64) -> f64 {
    match irr_with(cash_flows, initial_guess, &IRR_SOLVER_CONFIG) {
        Ok(result) => clamp_percent(result.root),
        // IRR_SOLVER_CONFIG is valid; keep the guess if that ever changes
        Err(_) => clamp_percent(initial_guess),
    }
}

/// Runs the IRR Newton iteration and returns the raw solver result.
///
/// `root` is a decimal rate, unclamped. Useful for diagnostics through
/// [`SolverResult::status`].
pub fn irr_with(
    cash_flows: &[CashFlow],
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult> {
    let f = |r: f64| -> f64 {
        cash_flows
            .iter()
            .map(|cf| cf.amount / growth(r, cf.year))
            .sum()
    };
    let df = |r: f64| -> f64 {
        cash_flows
            .iter()
            .map(|cf| -f64::from(cf.year) * cf.amount / growth(r, cf.year + 1))
            .sum()
    };

    let result = newton_raphson(f, df, initial_guess, config)?;
    if !result.status.is_converged() {
        log::debug!(
            "irr: {:?} after {} iterations, using estimate {}",
            result.status,
            result.iterations,
            result.root
        );
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::{npv, IRR_CEILING, IRR_FLOOR};
    use approx::assert_relative_eq;
    use capex_math::solvers::SolverStatus;

    #[test]
    fn test_single_period() {
        let flows = CashFlow::from_amounts(&[-1000.0, 1100.0]);
        assert_relative_eq!(irr(&flows), 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_npv_zero_at_irr() {
        let flows = CashFlow::from_amounts(&[-1000.0, 300.0, 400.0, 500.0]);
        let rate = irr(&flows);
        assert!(npv(&flows, rate / 100.0).abs() < 1e-2);
    }

    #[test]
    fn test_two_year_example() {
        // 600x + 600x^2 = 1000 with x = 1/(1+r) gives r ~ 13.066%
        let flows = CashFlow::from_amounts(&[-1000.0, 600.0, 600.0]);
        assert_relative_eq!(irr(&flows), 13.066, epsilon = 1e-2);
    }

    #[test]
    fn test_all_positive_is_clamped() {
        let flows = CashFlow::from_amounts(&[100.0, 100.0, 100.0]);
        let value = irr(&flows);
        assert!(value.is_finite());
        assert!((IRR_FLOOR..=IRR_CEILING).contains(&value));
    }

    #[test]
    fn test_all_negative_is_clamped() {
        let flows = CashFlow::from_amounts(&[-100.0, -50.0, -25.0]);
        let value = irr(&flows);
        assert!(value.is_finite());
        assert!((IRR_FLOOR..=IRR_CEILING).contains(&value));
    }

    #[test]
    fn test_empty_series_keeps_guess() {
        // Zero derivative immediately: the guess is the estimate
        assert_relative_eq!(irr(&[]), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_raw_result_exposes_status() {
        let flows = CashFlow::from_amounts(&[-1000.0, 1100.0]);
        let result = irr_with(&flows, 0.05, &IRR_SOLVER_CONFIG).unwrap();
        assert_eq!(result.status, SolverStatus::Converged);
        assert_relative_eq!(result.root, 0.10, epsilon = 1e-4);
    }
}
