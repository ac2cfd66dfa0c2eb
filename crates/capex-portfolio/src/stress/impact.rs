//! Scenario evaluation against a budget.

use crate::config::EngineConfig;
use crate::error::{ensure_finite_budget, PortfolioResult};
use crate::metrics::portfolio_metrics;
use crate::optimizer::optimize_portfolio_with;
use crate::stress::transform::apply_scenario_with;
use capex_core::types::{Priority, Project, Scenario, ScenarioResults};
use capex_math::statistics::safe_ratio;

/// Evaluates a scenario with default settings.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidArgument` if `budget` is not finite.
pub fn evaluate_scenario(
    projects: &[Project],
    priorities: &[Priority],
    scenario: &Scenario,
    budget: f64,
) -> PortfolioResult<Scenario> {
    evaluate_scenario_with(projects, priorities, scenario, budget, &EngineConfig::default())
}

/// Applies a scenario, optimizes the stressed set, and returns a copy of the
/// scenario whose `results` hold the outcome.
///
/// The baseline NPV is the greedy selection's NPV on the unstressed inputs.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidArgument` if `budget` is not finite.
pub fn evaluate_scenario_with(
    projects: &[Project],
    priorities: &[Priority],
    scenario: &Scenario,
    budget: f64,
    config: &EngineConfig,
) -> PortfolioResult<Scenario> {
    let baseline_npv = baseline_npv(projects, priorities, budget, config)?;
    evaluate_against(projects, priorities, scenario, budget, baseline_npv, config)
}

/// Evaluates several scenarios against one baseline, in the order given.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidArgument` if `budget` is not finite.
pub fn compare_scenarios(
    projects: &[Project],
    priorities: &[Priority],
    scenarios: &[Scenario],
    budget: f64,
) -> PortfolioResult<Vec<Scenario>> {
    compare_scenarios_with(projects, priorities, scenarios, budget, &EngineConfig::default())
}

/// Evaluates several scenarios with explicit settings.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidArgument` if `budget` is not finite.
pub fn compare_scenarios_with(
    projects: &[Project],
    priorities: &[Priority],
    scenarios: &[Scenario],
    budget: f64,
    config: &EngineConfig,
) -> PortfolioResult<Vec<Scenario>> {
    let baseline_npv = baseline_npv(projects, priorities, budget, config)?;
    scenarios
        .iter()
        .map(|s| evaluate_against(projects, priorities, s, budget, baseline_npv, config))
        .collect()
}

fn baseline_npv(
    projects: &[Project],
    priorities: &[Priority],
    budget: f64,
    config: &EngineConfig,
) -> PortfolioResult<f64> {
    ensure_finite_budget(budget)?;
    let baseline = optimize_portfolio_with(projects, priorities, budget, &[], &[], &config.scoring)?;
    Ok(baseline.total_npv)
}

fn evaluate_against(
    projects: &[Project],
    priorities: &[Priority],
    scenario: &Scenario,
    budget: f64,
    baseline_npv: f64,
    config: &EngineConfig,
) -> PortfolioResult<Scenario> {
    let outcome = apply_scenario_with(projects, priorities, scenario, &config.rates);
    let selection = optimize_portfolio_with(
        &outcome.projects,
        &outcome.priorities,
        budget,
        &[],
        &[],
        &config.scoring,
    )?;
    let metrics = portfolio_metrics(&selection.selected_projects(&outcome.projects), budget);

    let npv_change = metrics.total_npv - baseline_npv;
    let results = ScenarioResults {
        selected_ids: selection.selected_ids,
        total_capital: metrics.total_capital,
        total_npv: metrics.total_npv,
        weighted_irr: metrics.weighted_irr,
        roi: metrics.roi,
        risk_score: metrics.risk_score,
        baseline_npv,
        npv_change,
        npv_change_pct: safe_ratio(npv_change, baseline_npv.abs()) * 100.0,
    };
    tracing::debug!(
        scenario = %scenario.name,
        total_npv = results.total_npv,
        npv_change,
        "scenario evaluated"
    );

    let mut evaluated = scenario.clone();
    evaluated.results = Some(results);
    Ok(evaluated)
}
