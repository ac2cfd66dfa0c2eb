//! Candidate capital projects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::CashFlow;
use crate::error::{CoreError, CoreResult};
use crate::ids::{PriorityId, ProjectId};

/// Execution risk classification of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low execution risk.
    Low,
    /// Medium execution risk.
    #[default]
    Medium,
    /// High execution risk.
    High,
}

impl RiskLevel {
    /// Numeric risk scale used for portfolio aggregation (low=1, medium=2, high=3).
    #[must_use]
    pub fn score(self) -> f64 {
        match self {
            RiskLevel::Low => 1.0,
            RiskLevel::Medium => 2.0,
            RiskLevel::High => 3.0,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        write!(f, "{name}")
    }
}

/// A candidate capital project.
///
/// `npv`, `irr`, `mirr` and `payback_period` are cached results derived from
/// `cash_flows`. They are only meaningful while `metrics_fresh` is true;
/// [`Project::with_cash_flows`] clears the flag and the analytics crate sets it
/// again when it recomputes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Business category (e.g. "infrastructure").
    #[serde(default)]
    pub category: String,

    /// Up-front capital requirement; this is what the budget constrains.
    #[serde(default)]
    pub initial_capex: f64,
    /// Recurring operating cost per year.
    #[serde(default)]
    pub annual_opex: f64,
    /// Expected annual revenue.
    #[serde(default)]
    pub revenue_potential: f64,
    /// Expected annual savings.
    #[serde(default)]
    pub savings_potential: f64,

    /// Cash-flow series, conventionally dense from year 0.
    #[serde(default)]
    pub cash_flows: Vec<CashFlow>,

    /// Net present value (cached).
    #[serde(default)]
    pub npv: f64,
    /// Internal rate of return in percent (cached).
    #[serde(default)]
    pub irr: f64,
    /// Modified IRR in percent (cached).
    #[serde(default)]
    pub mirr: f64,
    /// Payback period in years, 99 when the project never pays back (cached).
    #[serde(default)]
    pub payback_period: f64,
    /// True when the cached metrics match `cash_flows`.
    #[serde(default)]
    pub metrics_fresh: bool,

    /// Execution risk.
    #[serde(default)]
    pub risk_level: RiskLevel,
    /// Priorities this project claims to serve.
    #[serde(default)]
    pub priority_alignment: BTreeSet<PriorityId>,
}

impl Project {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> ProjectBuilder {
        ProjectBuilder::new()
    }

    /// Returns true if the project claims alignment to `priority`.
    #[must_use]
    pub fn is_aligned_to(&self, priority: &PriorityId) -> bool {
        self.priority_alignment.contains(priority)
    }

    /// Budget consumed by the project; non-positive capex is free.
    #[must_use]
    pub fn budget_cost(&self) -> f64 {
        self.initial_capex.max(0.0)
    }

    /// Replaces the cash flows, marking cached metrics stale.
    #[must_use]
    pub fn with_cash_flows(mut self, cash_flows: Vec<CashFlow>) -> Self {
        self.cash_flows = cash_flows;
        self.metrics_fresh = false;
        self
    }

    /// Stores freshly computed metrics.
    #[must_use]
    pub fn with_metrics(mut self, npv: f64, irr: f64, mirr: f64, payback_period: f64) -> Self {
        self.npv = npv;
        self.irr = irr;
        self.mirr = mirr;
        self.payback_period = payback_period;
        self.metrics_fresh = true;
        self
    }
}

/// Builder for [`Project`].
#[derive(Debug, Clone, Default)]
pub struct ProjectBuilder {
    id: Option<ProjectId>,
    name: String,
    description: String,
    category: String,
    initial_capex: f64,
    annual_opex: f64,
    revenue_potential: f64,
    savings_potential: f64,
    cash_flows: Vec<CashFlow>,
    risk_level: RiskLevel,
    priority_alignment: BTreeSet<PriorityId>,
}

impl ProjectBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the project ID.
    #[must_use]
    pub fn id(mut self, id: impl Into<ProjectId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the initial capital requirement.
    #[must_use]
    pub fn initial_capex(mut self, amount: f64) -> Self {
        self.initial_capex = amount;
        self
    }

    /// Sets the annual operating cost.
    #[must_use]
    pub fn annual_opex(mut self, amount: f64) -> Self {
        self.annual_opex = amount;
        self
    }

    /// Sets the annual revenue potential.
    #[must_use]
    pub fn revenue_potential(mut self, amount: f64) -> Self {
        self.revenue_potential = amount;
        self
    }

    /// Sets the annual savings potential.
    #[must_use]
    pub fn savings_potential(mut self, amount: f64) -> Self {
        self.savings_potential = amount;
        self
    }

    /// Sets the cash-flow series.
    #[must_use]
    pub fn cash_flows(mut self, cash_flows: Vec<CashFlow>) -> Self {
        self.cash_flows = cash_flows;
        self
    }

    /// Sets the risk level.
    #[must_use]
    pub fn risk_level(mut self, level: RiskLevel) -> Self {
        self.risk_level = level;
        self
    }

    /// Adds a claimed priority alignment.
    #[must_use]
    pub fn align_to(mut self, priority: impl Into<PriorityId>) -> Self {
        self.priority_alignment.insert(priority.into());
        self
    }

    /// Builds the project. Derived metrics start stale.
    pub fn build(self) -> CoreResult<Project> {
        let id = self.id.ok_or_else(|| CoreError::missing_field("id"))?;

        for (field, value) in [
            ("initial_capex", self.initial_capex),
            ("annual_opex", self.annual_opex),
            ("revenue_potential", self.revenue_potential),
            ("savings_potential", self.savings_potential),
        ] {
            if !value.is_finite() {
                return Err(CoreError::invalid_value(field, "must be finite"));
            }
        }

        Ok(Project {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            initial_capex: self.initial_capex,
            annual_opex: self.annual_opex,
            revenue_potential: self.revenue_potential,
            savings_potential: self.savings_potential,
            cash_flows: self.cash_flows,
            npv: 0.0,
            irr: 0.0,
            mirr: 0.0,
            payback_period: 0.0,
            metrics_fresh: false,
            risk_level: self.risk_level,
            priority_alignment: self.priority_alignment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_id() {
        let err = Project::builder().name("No id").build().unwrap_err();
        assert_eq!(err, CoreError::missing_field("id"));
    }

    #[test]
    fn test_builder_rejects_non_finite() {
        let err = Project::builder()
            .id("P-1")
            .initial_capex(f64::NAN)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("initial_capex"));
    }

    #[test]
    fn test_alignment_and_cost() {
        let project = Project::builder()
            .id("P-1")
            .initial_capex(-50.0)
            .align_to("growth")
            .build()
            .unwrap();

        assert!(project.is_aligned_to(&PriorityId::new("growth")));
        assert!(!project.is_aligned_to(&PriorityId::new("esg")));
        assert!(project.budget_cost().abs() < f64::EPSILON);
    }

    #[test]
    fn test_freshness_flag() {
        let project = Project::builder()
            .id("P-1")
            .build()
            .unwrap()
            .with_metrics(100.0, 12.0, 10.0, 3.5);
        assert!(project.metrics_fresh);

        let edited = project.with_cash_flows(CashFlow::from_amounts(&[-10.0, 20.0]));
        assert!(!edited.metrics_fresh);
        assert_eq!(edited.cash_flows.len(), 2);
    }

    #[test]
    fn test_risk_level_scale() {
        assert!((RiskLevel::Low.score() - 1.0).abs() < f64::EPSILON);
        assert!((RiskLevel::High.score() - 3.0).abs() < f64::EPSILON);
        assert_eq!(RiskLevel::default(), RiskLevel::Medium);
        assert_eq!(RiskLevel::High.to_string(), "high");
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{"id":"P-9","name":"Plant","risk_level":"high","priority_alignment":["growth"]}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.risk_level, RiskLevel::High);
        assert!(!project.metrics_fresh);
        assert!(project.is_aligned_to(&PriorityId::new("growth")));
    }
}
