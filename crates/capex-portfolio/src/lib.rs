//! # Capex Portfolio
//!
//! Capital allocation over scored projects.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Every call takes its inputs explicitly and returns new records
//! - **Pre-calculated metrics**: Projects carry NPV/IRR computed by `capex-analytics`
//! - **Graceful degradation**: Empty inputs and zero denominators yield zeros, not errors
//! - **Config-driven parallelism**: Optional rayon support for Monte Carlo chunks
//!
//! ## Features
//!
//! - **Scoring**: Per-priority alignment with IRR/NPV bonuses, batch ranking
//! - **Optimizer**: Greedy single-pass selection, exact knapsack as a separate call
//! - **Metrics**: Capital-weighted IRR, payback and risk, ROI, budget utilization
//! - **Stress**: Scenario transforms, evaluation against a baseline, stock presets
//! - **Simulation**: Seeded Monte Carlo with progress, cancellation and chunked streams
//!
//! ## Quick Start
//!
//! ```rust
//! use capex_core::types::{CashFlow, Priority, Project};
//! use capex_portfolio::prelude::*;
//!
//! let project = Project::builder()
//!     .id("plant")
//!     .initial_capex(1_000.0)
//!     .cash_flows(CashFlow::from_amounts(&[-1_000.0, 600.0, 600.0]))
//!     .align_to("growth")
//!     .build()
//!     .unwrap();
//! let projects = refresh_projects(&[project], &MetricRates::default());
//! let priorities = vec![Priority::new("growth", "Growth", 100.0, 50.0)];
//!
//! let selection = optimize_portfolio(&projects, &priorities, 2_000.0, &[], &[]).unwrap();
//! assert_eq!(selection.selected_ids.len(), 1);
//! ```
//!
//! ## Module Overview
//!
//! - [`scoring`] - Project scores and ranking
//! - [`optimizer`] - Budget-constrained selection
//! - [`metrics`] - Portfolio aggregates
//! - [`stress`] - Scenario transform and evaluation
//! - [`simulation`] - Monte Carlo
//! - [`config`] - Engine settings
//!
//! ## Feature Flags
//!
//! - `parallel`: Run Monte Carlo chunks on the rayon pool
//! - `async`: `run_monte_carlo_async`, yielding to tokio between chunks

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod optimizer;
pub mod parallel;
pub mod scoring;
pub mod simulation;
pub mod stress;

pub use error::{PortfolioError, PortfolioResult};

pub use config::{EngineConfig, MonteCarloConfig, ScoringConfig};

pub use scoring::{
    rank_projects, rank_projects_with, rank_scores, score_project, score_project_with,
    PriorityScore, ProjectScore,
};

pub use optimizer::{
    optimize_portfolio, optimize_portfolio_exact, optimize_portfolio_exact_with,
    optimize_portfolio_with, PortfolioSelection, SkipReason, SkippedProject, MAX_GRID_CELLS,
};

pub use metrics::{portfolio_metrics, PortfolioMetrics};

pub use stress::{
    apply_scenario, apply_scenario_with, compare_scenarios, compare_scenarios_with,
    evaluate_scenario, evaluate_scenario_with, scale_cash_flows, standard, standard_scenarios,
    ScenarioOutcome,
};

#[cfg(feature = "async")]
pub use simulation::run_monte_carlo_async;
pub use simulation::{
    run_monte_carlo, run_monte_carlo_seeded, run_monte_carlo_with, run_monte_carlo_with_rng,
    CancellationToken, MonteCarloSummary, ProgressObserver, SimulationProgress, Unobserved,
};

pub use parallel::maybe_parallel_map;

// Analytics used alongside the engine
pub use capex_analytics::{refresh_project, refresh_projects, MetricRates};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{EngineConfig, MonteCarloConfig, ScoringConfig};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::metrics::{portfolio_metrics, PortfolioMetrics};
    pub use crate::optimizer::{
        optimize_portfolio, optimize_portfolio_exact, optimize_portfolio_with,
        PortfolioSelection, SkipReason, SkippedProject,
    };
    pub use crate::scoring::{rank_projects, score_project, PriorityScore, ProjectScore};
    #[cfg(feature = "async")]
    pub use crate::simulation::run_monte_carlo_async;
    pub use crate::simulation::{
        run_monte_carlo, run_monte_carlo_seeded, run_monte_carlo_with, run_monte_carlo_with_rng,
        CancellationToken, MonteCarloSummary, SimulationProgress,
    };
    pub use crate::stress::{
        apply_scenario, compare_scenarios, evaluate_scenario, standard_scenarios,
        ScenarioOutcome,
    };
    pub use capex_analytics::{refresh_project, refresh_projects, MetricRates};
}
