//! Stress scenarios.
//!
//! A scenario is a named bundle of adjustments applied to a baseline set of
//! projects and priorities:
//! - Priority weight and threshold deltas
//! - Cost inflation and benefit reduction (percent)
//! - Schedule delay (months)
//! - Market conditions (discount-rate shift)
//!
//! The `results` field is a cache that scenario evaluation overwrites.

use serde::{Deserialize, Serialize};

use crate::ids::{PriorityId, ProjectId, ScenarioId};

/// Change applied to one priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityAdjustment {
    /// Target priority.
    pub priority_id: PriorityId,
    /// Added to the weight before clamping to [0, 100].
    #[serde(default)]
    pub weight_change: f64,
    /// Added to the minimum threshold before clamping to [0, 100].
    #[serde(default)]
    pub threshold_change: f64,
}

impl PriorityAdjustment {
    /// Creates a new adjustment.
    #[must_use]
    pub fn new(priority_id: impl Into<PriorityId>, weight_change: f64, threshold_change: f64) -> Self {
        Self {
            priority_id: priority_id.into(),
            weight_change,
            threshold_change,
        }
    }
}

/// Market conditions for a scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketConditions {
    /// Discount-rate shift in percentage points (e.g. 2.0 = +200bp).
    #[serde(default)]
    pub interest_rate_change: f64,
}

/// Adjustment parameters of a scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioAdjustments {
    /// Per-priority weight/threshold changes.
    pub priority_changes: Vec<PriorityAdjustment>,
    /// Cost inflation in percent.
    pub cost_increase: f64,
    /// Benefit reduction in percent.
    pub benefit_reduction: f64,
    /// Schedule delay in months.
    pub delay_months: u32,
    /// Market conditions.
    pub market_conditions: MarketConditions,
}

/// Cached outcome of evaluating a scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResults {
    /// Projects selected under the scenario.
    pub selected_ids: Vec<ProjectId>,
    /// Capital consumed by the selection.
    pub total_capital: f64,
    /// Aggregate NPV of the selection under the scenario.
    pub total_npv: f64,
    /// Capital-weighted IRR (percent).
    pub weighted_irr: f64,
    /// Portfolio ROI (percent).
    pub roi: f64,
    /// Capital-weighted risk score.
    pub risk_score: f64,
    /// Aggregate NPV of the baseline selection.
    pub baseline_npv: f64,
    /// `total_npv - baseline_npv`.
    pub npv_change: f64,
    /// NPV change relative to the baseline, percent (0 when the baseline is 0).
    pub npv_change_pct: f64,
}

/// A named stress scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario identifier.
    pub id: ScenarioId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Adjustment parameters.
    #[serde(default)]
    pub adjustments: ScenarioAdjustments,
    /// Results cache, overwritten on each evaluation.
    #[serde(default)]
    pub results: Option<ScenarioResults>,
}

impl Scenario {
    /// Creates an empty (no-op) scenario.
    #[must_use]
    pub fn new(id: impl Into<ScenarioId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            adjustments: ScenarioAdjustments::default(),
            results: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets cost inflation (percent).
    #[must_use]
    pub fn with_cost_increase(mut self, pct: f64) -> Self {
        self.adjustments.cost_increase = pct;
        self
    }

    /// Sets benefit reduction (percent).
    #[must_use]
    pub fn with_benefit_reduction(mut self, pct: f64) -> Self {
        self.adjustments.benefit_reduction = pct;
        self
    }

    /// Sets the schedule delay.
    #[must_use]
    pub fn with_delay_months(mut self, months: u32) -> Self {
        self.adjustments.delay_months = months;
        self
    }

    /// Sets the discount-rate shift (percentage points).
    #[must_use]
    pub fn with_interest_rate_change(mut self, points: f64) -> Self {
        self.adjustments.market_conditions.interest_rate_change = points;
        self
    }

    /// Adds a priority adjustment.
    #[must_use]
    pub fn with_priority_change(mut self, adjustment: PriorityAdjustment) -> Self {
        self.adjustments.priority_changes.push(adjustment);
        self
    }

    /// Looks up the adjustment for a priority.
    #[must_use]
    pub fn priority_change(&self, priority: &PriorityId) -> Option<&PriorityAdjustment> {
        self.adjustments
            .priority_changes
            .iter()
            .find(|a| &a.priority_id == priority)
    }

    /// Cost multiplier `1 + cost_increase / 100`.
    #[must_use]
    pub fn cost_factor(&self) -> f64 {
        1.0 + self.adjustments.cost_increase / 100.0
    }

    /// Benefit multiplier `1 - benefit_reduction / 100`.
    #[must_use]
    pub fn benefit_factor(&self) -> f64 {
        1.0 - self.adjustments.benefit_reduction / 100.0
    }
}
