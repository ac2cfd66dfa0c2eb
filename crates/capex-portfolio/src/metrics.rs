//! Aggregate metrics of a selected project set.

use serde::{Deserialize, Serialize};

use capex_core::types::Project;
use capex_math::statistics::{safe_ratio, weighted_average};

/// Aggregate view of a project selection.
///
/// Capital is the budget cost of each project, so capex at or below 0 counts
/// as free, matching the optimizer. IRR, payback and risk are weighted by that
/// cost. Every ratio is 0 when its denominator is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Number of projects.
    pub project_count: usize,
    /// Sum of budget costs (`initial_capex` floored at 0).
    pub total_capital: f64,
    /// Sum of NPV.
    pub total_npv: f64,
    /// Capital-weighted IRR (percent).
    pub weighted_irr: f64,
    /// Capital-weighted payback (years).
    pub weighted_payback: f64,
    /// Capital-weighted risk on the low=1, medium=2, high=3 scale.
    pub risk_score: f64,
    /// `total_npv / total_capital × 100`.
    pub roi: f64,
    /// `total_capital / budget × 100`.
    pub budget_utilization: f64,
    /// `budget - total_capital`.
    pub remaining_budget: f64,
}

/// Computes aggregate metrics for a set of selected projects.
///
/// # Example
///
/// ```rust
/// use capex_portfolio::portfolio_metrics;
///
/// let metrics = portfolio_metrics(&[], 1_000.0);
/// assert_eq!(metrics.project_count, 0);
/// assert_eq!(metrics.roi, 0.0);
/// assert_eq!(metrics.remaining_budget, 1_000.0);
/// ```
#[must_use]
pub fn portfolio_metrics(selected: &[Project], budget: f64) -> PortfolioMetrics {
    let total_capital: f64 = selected.iter().map(Project::budget_cost).sum();
    let total_npv: f64 = selected.iter().map(|p| p.npv).sum();

    let by_capital = |value: fn(&Project) -> f64| {
        weighted_average(selected.iter().map(|p| (value(p), p.budget_cost())))
    };

    PortfolioMetrics {
        project_count: selected.len(),
        total_capital,
        total_npv,
        weighted_irr: by_capital(|p| p.irr),
        weighted_payback: by_capital(|p| p.payback_period),
        risk_score: by_capital(|p| p.risk_level.score()),
        roi: safe_ratio(total_npv, total_capital) * 100.0,
        budget_utilization: safe_ratio(total_capital, budget) * 100.0,
        remaining_budget: budget - total_capital,
    }
}
