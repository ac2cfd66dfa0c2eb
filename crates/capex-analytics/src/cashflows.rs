//! Cash-flow projection from project inputs.

use capex_core::types::CashFlow;

/// Projects a dense cash-flow series from a project's financial inputs.
///
/// Year 0 carries `-initial_capex`; each of years `1..=years` carries
/// `revenue_potential + savings_potential - annual_opex`.
///
/// # Example
///
/// ```rust
/// use capex_analytics::project_cash_flows;
///
/// let flows = project_cash_flows(500.0, 50.0, 200.0, 50.0, 3);
/// assert_eq!(flows.len(), 4);
/// assert_eq!(flows[0].amount, -500.0);
/// assert_eq!(flows[3].amount, 200.0);
/// ```
#[must_use]
pub fn project_cash_flows(
    initial_capex: f64,
    annual_opex: f64,
    revenue_potential: f64,
    savings_potential: f64,
    years: u32,
) -> Vec<CashFlow> {
    let annual_net = revenue_potential + savings_potential - annual_opex;

    std::iter::once(CashFlow::new(0, -initial_capex))
        .chain((1..=years).map(|year| CashFlow::new(year, annual_net)))
        .collect()
}

/// Returns a copy of `flows` sorted ascending by year (stable).
pub(crate) fn sorted_by_year(flows: &[CashFlow]) -> Vec<CashFlow> {
    let mut sorted = flows.to_vec();
    sorted.sort_by_key(|cf| cf.year);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_projection_shape() {
        let flows = project_cash_flows(1000.0, 100.0, 400.0, 100.0, 5);
        assert_eq!(flows.len(), 6);
        assert_relative_eq!(flows[0].amount, -1000.0);
        for (expected_year, cf) in flows.iter().enumerate() {
            assert_eq!(cf.year as usize, expected_year);
        }
        assert!(flows[1..].iter().all(|cf| (cf.amount - 400.0).abs() < 1e-12));
    }

    #[test]
    fn test_zero_horizon() {
        let flows = project_cash_flows(250.0, 0.0, 0.0, 0.0, 0);
        assert_eq!(flows, vec![CashFlow::new(0, -250.0)]);
    }

    #[test]
    fn test_sorted_by_year() {
        let flows = vec![CashFlow::new(2, 5.0), CashFlow::new(0, -9.0), CashFlow::new(1, 4.0)];
        let sorted = sorted_by_year(&flows);
        let years: Vec<u32> = sorted.iter().map(|cf| cf.year).collect();
        assert_eq!(years, vec![0, 1, 2]);
    }
}
