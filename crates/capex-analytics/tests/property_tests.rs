//! Property-based tests for cash-flow metric invariants.
//!
//! - NPV at a zero rate is the plain sum
//! - NPV at the IRR is zero for conventional series
//! - IRR stays inside the reporting band for any finite series
//! - Payback grows with the up-front investment

use capex_analytics::prelude::*;
use capex_core::types::CashFlow;
use proptest::prelude::*;

/// Amounts for a dense series starting at year 0.
fn amounts() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1e7f64..1e7, 0..25)
}

/// A conventional series: one investment followed by positive returns whose
/// total exceeds the investment, so exactly one positive root exists.
fn conventional_series() -> impl Strategy<Value = Vec<CashFlow>> {
    (100.0f64..10_000.0, prop::collection::vec(0.05f64..1.0, 1..15)).prop_map(
        |(investment, fractions)| {
            let mut amounts = vec![-investment];
            let total: f64 = fractions.iter().sum();
            let scale = 1.5 * investment / total;
            amounts.extend(fractions.iter().map(|f| f * scale));
            CashFlow::from_amounts(&amounts)
        },
    )
}

proptest! {
    #[test]
    fn npv_at_zero_rate_is_sum(values in amounts()) {
        let flows = CashFlow::from_amounts(&values);
        let sum: f64 = values.iter().sum();
        let tolerance = 1e-9 * values.iter().map(|v| v.abs()).sum::<f64>().max(1.0);
        prop_assert!((npv(&flows, 0.0) - sum).abs() <= tolerance);
    }

    #[test]
    fn npv_vanishes_at_irr(flows in conventional_series()) {
        let rate = irr(&flows);
        prop_assert!(rate > IRR_FLOOR && rate < IRR_CEILING);
        prop_assert!(npv(&flows, rate / 100.0).abs() < 1e-2);
    }

    #[test]
    fn irr_is_always_in_band(values in amounts()) {
        let value = irr(&CashFlow::from_amounts(&values));
        prop_assert!(!value.is_nan());
        prop_assert!((IRR_FLOOR..=IRR_CEILING).contains(&value));
    }

    #[test]
    fn irr_is_in_band_for_one_sided_series(
        values in prop::collection::vec(1.0f64..1e6, 1..20),
        negate in any::<bool>(),
    ) {
        let signed: Vec<f64> = values.iter().map(|v| if negate { -v } else { *v }).collect();
        let value = irr(&CashFlow::from_amounts(&signed));
        prop_assert!((IRR_FLOOR..=IRR_CEILING).contains(&value));
    }

    #[test]
    fn payback_is_monotone_in_investment(
        inflows in prop::collection::vec(0.0f64..1e5, 1..20),
        investment in 0.0f64..1e6,
        extra in 0.0f64..1e6,
    ) {
        let series = |capex: f64| {
            let mut amounts = vec![-capex];
            amounts.extend(inflows.iter().copied());
            CashFlow::from_amounts(&amounts)
        };
        let smaller = payback_period(&series(investment));
        let larger = payback_period(&series(investment + extra));
        prop_assert!(smaller <= larger + 1e-12);
    }

    #[test]
    fn mirr_is_bounded_or_zero(values in amounts()) {
        let value = mirr(&CashFlow::from_amounts(&values));
        prop_assert!(value == 0.0 || (IRR_FLOOR..=IRR_CEILING).contains(&value));
    }
}

#[test]
fn spec_payback_example() {
    let flows = CashFlow::from_amounts(&[-1000.0, 600.0, 600.0]);
    let years = payback_period(&flows);
    assert!(years > 1.0 && years < 2.0);
    assert!((years - 1.667).abs() < 1e-3);
}

#[test]
fn projected_series_round_trips_through_metrics() {
    let flows = project_cash_flows(1_000_000.0, 50_000.0, 250_000.0, 100_000.0, 10);
    let m = compute_metrics(&flows, &MetricRates::default());

    // 300k a year for 10 years against 1M up front
    assert!(m.npv > 0.0);
    assert!(m.irr > 10.0 && m.irr < 40.0);
    assert!((m.payback_period - 1_000_000.0 / 300_000.0).abs() < 1e-9);
}
