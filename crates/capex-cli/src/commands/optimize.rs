//! Optimize command implementation.
//!
//! Selects projects under a budget, greedily by default or with the exact
//! knapsack solver.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use capex_core::types::Project;
use capex_portfolio::{
    optimize_portfolio_exact_with, optimize_portfolio_with, portfolio_metrics, EngineConfig,
    PortfolioMetrics, PortfolioSelection,
};

use crate::cli::OutputFormat;
use crate::commands::parse_ids;
use crate::output::{money, print_header, print_json, print_output, score, KeyValue};
use crate::workspace::Workspace;

/// Arguments for the optimize command.
#[derive(Args, Debug)]
pub struct OptimizeArgs {
    /// Workspace file (JSON)
    pub workspace: PathBuf,

    /// Capital budget
    #[arg(short, long)]
    pub budget: f64,

    /// Projects that must be funded (repeat or comma-separate)
    #[arg(long, value_delimiter = ',')]
    pub locked: Vec<String>,

    /// Projects that must not be funded (repeat or comma-separate)
    #[arg(long, value_delimiter = ',')]
    pub excluded: Vec<String>,

    /// Use the exact knapsack solver instead of greedy selection
    #[arg(long)]
    pub exact: bool,

    /// Capital granularity for the exact solver
    #[arg(long, default_value = "10000")]
    pub resolution: f64,
}

#[derive(Debug, Serialize, Tabled)]
struct SelectionRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Project")]
    id: String,
    #[tabled(rename = "Score", display_with = "score")]
    total_score: f64,
    #[tabled(rename = "Capex", display_with = "money")]
    initial_capex: f64,
    #[tabled(rename = "NPV", display_with = "money")]
    npv: f64,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Debug, Serialize)]
struct OptimizeReport<'a> {
    strategy: &'static str,
    budget: f64,
    selection: &'a PortfolioSelection,
    metrics: PortfolioMetrics,
}

fn selection_rows(selection: &PortfolioSelection, projects: &[Project]) -> Vec<SelectionRow> {
    selection
        .ranked
        .iter()
        .map(|s| {
            let project = projects.iter().find(|p| p.id == s.project_id);
            let status = if selection.locked_ids.contains(&s.project_id) {
                "locked".to_string()
            } else if s.allocated {
                "selected".to_string()
            } else if let Some(skip) = selection.skipped.iter().find(|k| k.id == s.project_id) {
                format!("skipped: {}", skip.reason)
            } else {
                "skipped".to_string()
            };
            SelectionRow {
                rank: s.rank,
                id: s.project_id.to_string(),
                total_score: s.total_score,
                initial_capex: project.map_or(0.0, |p| p.initial_capex),
                npv: project.map_or(0.0, |p| p.npv),
                status,
            }
        })
        .collect()
}

fn metric_rows(metrics: &PortfolioMetrics) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Projects", metrics.project_count.to_string()),
        KeyValue::money("Total Capital", metrics.total_capital),
        KeyValue::money("Total NPV", metrics.total_npv),
        KeyValue::percent("Weighted IRR", metrics.weighted_irr),
        KeyValue::new("Weighted Payback", format!("{:.2} yrs", metrics.weighted_payback)),
        KeyValue::new("Risk Score", format!("{:.2}", metrics.risk_score)),
        KeyValue::percent("ROI", metrics.roi),
        KeyValue::percent("Budget Utilization", metrics.budget_utilization),
        KeyValue::money("Remaining Budget", metrics.remaining_budget),
    ]
}

/// Executes the optimize command.
pub fn execute(args: OptimizeArgs, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    let workspace = Workspace::load(&args.workspace)?;
    let projects = workspace.prepared_projects(&config.rates);
    let locked = parse_ids(&args.locked);
    let excluded = parse_ids(&args.excluded);

    let selection = if args.exact {
        optimize_portfolio_exact_with(
            &projects,
            &workspace.priorities,
            args.budget,
            &locked,
            &excluded,
            args.resolution,
            &config.scoring,
        )?
    } else {
        optimize_portfolio_with(
            &projects,
            &workspace.priorities,
            args.budget,
            &locked,
            &excluded,
            &config.scoring,
        )?
    };
    let metrics = portfolio_metrics(&selection.selected_projects(&projects), args.budget);

    match format {
        OutputFormat::Json => print_json(&OptimizeReport {
            strategy: if args.exact { "exact" } else { "greedy" },
            budget: args.budget,
            selection: &selection,
            metrics,
        }),
        OutputFormat::Csv => print_output(&selection_rows(&selection, &projects), format),
        OutputFormat::Table => {
            print_header(&format!("Portfolio Selection (budget {:.2})", args.budget));
            print_output(&selection_rows(&selection, &projects), format)?;
            print_header("Portfolio Metrics");
            print_output(&metric_rows(&metrics), format)
        }
    }
}
