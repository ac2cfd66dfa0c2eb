//! Stock stress scenarios for capital plans.

use capex_core::types::Scenario;

/// Standard stress scenarios.
pub mod standard {
    use super::*;

    /// Demand contraction: costs +10%, benefits -25%, rates +100bp.
    #[must_use]
    pub fn recession() -> Scenario {
        Scenario::new("recession", "Recession")
            .with_description("Demand falls: costs +10%, benefits -25%, rates +100bp")
            .with_cost_increase(10.0)
            .with_benefit_reduction(25.0)
            .with_interest_rate_change(1.0)
    }

    /// Input-cost spike: costs +20%, benefits -5%, rates +200bp.
    #[must_use]
    pub fn inflation_shock() -> Scenario {
        Scenario::new("inflation-shock", "Inflation Shock")
            .with_description("Input costs spike: costs +20%, benefits -5%, rates +200bp")
            .with_cost_increase(20.0)
            .with_benefit_reduction(5.0)
            .with_interest_rate_change(2.0)
    }

    /// Discount rate +300bp, nothing else.
    #[must_use]
    pub fn rate_hike() -> Scenario {
        Scenario::new("rate-hike", "Rate Hike")
            .with_description("Discount rate up 300 basis points")
            .with_interest_rate_change(3.0)
    }

    /// Upside case: costs -5%, benefits +10%, rates -50bp.
    #[must_use]
    pub fn optimistic() -> Scenario {
        Scenario::new("optimistic", "Optimistic")
            .with_description("Upside: costs -5%, benefits +10%, rates -50bp")
            .with_cost_increase(-5.0)
            .with_benefit_reduction(-10.0)
            .with_interest_rate_change(-0.5)
    }

    /// Returns all standard scenarios.
    #[must_use]
    pub fn all() -> Vec<Scenario> {
        vec![recession(), inflation_shock(), rate_hike(), optimistic()]
    }
}

/// Returns the standard stress set.
#[must_use]
pub fn standard_scenarios() -> Vec<Scenario> {
    standard::all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_scenarios() {
        let scenarios = standard_scenarios();
        assert_eq!(scenarios.len(), 4);
        assert!(scenarios.iter().all(|s| s.results.is_none()));
        assert!(scenarios.iter().all(|s| !s.description.is_empty()));
    }

    #[test]
    fn test_optimistic_factors() {
        let s = standard::optimistic();
        assert_relative_eq!(s.cost_factor(), 0.95, epsilon = 1e-12);
        assert_relative_eq!(s.benefit_factor(), 1.10, epsilon = 1e-12);
    }
}
