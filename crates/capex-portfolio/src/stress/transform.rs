//! The scenario transform.
//!
//! Priorities: matching adjustments shift weight and threshold (each clamped
//! to [0, 100]), then all weights are rescaled to sum to 100.
//!
//! Projects: capex and opex scale by the cost factor, revenue and savings by
//! the benefit factor. Year-0 cash flows scale by the cost factor and every
//! later year by the benefit factor. Metrics are then recomputed with the
//! discount rate shifted by the scenario's interest-rate change.
//!
//! `delay_months` is carried on the scenario but does not move cash flows.

use serde::{Deserialize, Serialize};

use capex_analytics::{refresh_project, MetricRates};
use capex_core::types::{CashFlow, Priority, Project, Scenario};

/// Projects and priorities after a scenario has been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Transformed projects with fresh metrics.
    pub projects: Vec<Project>,
    /// Transformed, renormalized priorities.
    pub priorities: Vec<Priority>,
}

/// Scales a cash-flow series: year 0 by `cost_factor`, later years by
/// `benefit_factor`.
#[must_use]
pub fn scale_cash_flows(flows: &[CashFlow], cost_factor: f64, benefit_factor: f64) -> Vec<CashFlow> {
    flows
        .iter()
        .map(|cf| {
            if cf.year == 0 {
                cf.scaled(cost_factor)
            } else {
                cf.scaled(benefit_factor)
            }
        })
        .collect()
}

/// Applies a scenario using the default metric rates.
#[must_use]
pub fn apply_scenario(
    projects: &[Project],
    priorities: &[Priority],
    scenario: &Scenario,
) -> ScenarioOutcome {
    apply_scenario_with(projects, priorities, scenario, &MetricRates::default())
}

/// Applies a scenario; `rates` are the baseline rates before the shift.
#[must_use]
pub fn apply_scenario_with(
    projects: &[Project],
    priorities: &[Priority],
    scenario: &Scenario,
    rates: &MetricRates,
) -> ScenarioOutcome {
    let shifted = rates.shifted(scenario.adjustments.market_conditions.interest_rate_change);

    ScenarioOutcome {
        projects: projects
            .iter()
            .map(|p| transform_project(p, scenario, &shifted))
            .collect(),
        priorities: transform_priorities(priorities, scenario),
    }
}

fn transform_priorities(priorities: &[Priority], scenario: &Scenario) -> Vec<Priority> {
    let mut adjusted: Vec<Priority> = priorities
        .iter()
        .map(|priority| {
            let mut priority = priority.clone();
            if let Some(change) = scenario.priority_change(&priority.id) {
                priority.weight = (priority.weight + change.weight_change).clamp(0.0, 100.0);
                priority.min_threshold =
                    (priority.min_threshold + change.threshold_change).clamp(0.0, 100.0);
            }
            priority
        })
        .collect();

    let total = Priority::total_weight(&adjusted);
    if total > 0.0 {
        let factor = 100.0 / total;
        for priority in &mut adjusted {
            priority.weight *= factor;
        }
    } else {
        tracing::warn!(scenario = %scenario.name, "priority weights sum to zero; not renormalized");
    }
    adjusted
}

fn transform_project(project: &Project, scenario: &Scenario, rates: &MetricRates) -> Project {
    let cost = scenario.cost_factor();
    let benefit = scenario.benefit_factor();

    let mut stressed = project.clone();
    stressed.initial_capex *= cost;
    stressed.annual_opex *= cost;
    stressed.revenue_potential *= benefit;
    stressed.savings_potential *= benefit;

    let flows = scale_cash_flows(&project.cash_flows, cost, benefit);
    refresh_project(&stressed.with_cash_flows(flows), rates)
}
