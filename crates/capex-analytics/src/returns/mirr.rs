//! Modified internal rate of return.

use super::{clamp_percent, growth, DEFAULT_DISCOUNT_RATE};
use capex_core::types::CashFlow;

/// MIRR in percent with finance and reinvestment rates of 10%.
#[must_use]
pub fn mirr(cash_flows: &[CashFlow]) -> f64 {
    mirr_with_rates(cash_flows, DEFAULT_DISCOUNT_RATE, DEFAULT_DISCOUNT_RATE)
}

/// Modified internal rate of return in percent.
///
/// Outflows are discounted to year 0 at `finance_rate`; inflows are
/// compounded to the final year at `reinvest_rate`:
///
/// ```text
/// MIRR = (-FV(inflows) / PV(outflows))^(1 / final_year) - 1
/// ```
///
/// Returns 0 when there are no outflows, no inflows, the final year is 0,
/// or the buckets have the wrong sign. Otherwise the result is clamped to
/// `[-99, 999]`.
#[must_use]
pub fn mirr_with_rates(cash_flows: &[CashFlow], finance_rate: f64, reinvest_rate: f64) -> f64 {
    let Some(final_year) = cash_flows.iter().map(|cf| cf.year).max() else {
        return 0.0;
    };

    let (outflows, inflows): (Vec<&CashFlow>, Vec<&CashFlow>) =
        cash_flows.iter().partition(|cf| cf.is_outflow());
    let inflows: Vec<&CashFlow> = inflows.into_iter().filter(|cf| cf.amount > 0.0).collect();

    if outflows.is_empty() || inflows.is_empty() || final_year == 0 {
        return 0.0;
    }

    let pv_outflows: f64 = outflows
        .iter()
        .map(|cf| cf.amount / growth(finance_rate, cf.year))
        .sum();
    let fv_inflows: f64 = inflows
        .iter()
        .map(|cf| cf.amount * growth(reinvest_rate, final_year - cf.year))
        .sum();

    if pv_outflows >= 0.0 || fv_inflows <= 0.0 {
        return 0.0;
    }

    let rate = (-fv_inflows / pv_outflows).powf(1.0 / f64::from(final_year)) - 1.0;
    if rate.is_nan() {
        return 0.0;
    }
    clamp_percent(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_value() {
        // FV inflows = 600*1.1 + 600 = 1260; (1260/1000)^(1/2) - 1 = 12.2497%
        let flows = CashFlow::from_amounts(&[-1000.0, 600.0, 600.0]);
        assert_relative_eq!(mirr(&flows), 12.249_722, epsilon = 1e-5);
    }

    #[test]
    fn test_separate_rates() {
        // Outflow at year 1 financed at 5%: PV = 500/1.05 + 500
        let flows = vec![
            CashFlow::new(0, -500.0),
            CashFlow::new(1, -500.0),
            CashFlow::new(2, 1500.0),
        ];
        let pv: f64 = 500.0 + 500.0 / 1.05;
        let expected = ((1500.0 / pv).sqrt() - 1.0) * 100.0;
        assert_relative_eq!(mirr_with_rates(&flows, 0.05, 0.08), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_series() {
        assert!(mirr(&[]).abs() < f64::EPSILON);
        assert!(mirr(&CashFlow::from_amounts(&[100.0, 100.0])).abs() < f64::EPSILON);
        assert!(mirr(&CashFlow::from_amounts(&[-100.0, -100.0])).abs() < f64::EPSILON);
        // Everything in year 0: no compounding horizon
        assert!(mirr(&[CashFlow::new(0, -10.0), CashFlow::new(0, 20.0)]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamped() {
        let flows = CashFlow::from_amounts(&[-1.0, 1e9]);
        assert_relative_eq!(mirr(&flows), 999.0);
    }
}
