//! Domain records for capital allocation.
//!
//! - [`CashFlow`]: Year-indexed cash amount
//! - [`Project`]: Candidate investment with cached financial metrics
//! - [`Priority`]: Weighted strategic goal
//! - [`Scenario`]: Stress adjustments plus a results cache

mod cashflow;
mod priority;
mod project;
mod scenario;

pub use cashflow::CashFlow;
pub use priority::Priority;
pub use project::{Project, ProjectBuilder, RiskLevel};
pub use scenario::{
    MarketConditions, PriorityAdjustment, Scenario, ScenarioAdjustments, ScenarioResults,
};
