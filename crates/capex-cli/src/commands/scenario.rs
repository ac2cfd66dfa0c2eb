//! Scenario command implementation.
//!
//! Evaluates stress scenarios against the baseline selection. Scenarios come
//! from the workspace; the standard presets are used when it has none.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use capex_core::types::Scenario;
use capex_portfolio::{compare_scenarios_with, standard_scenarios, EngineConfig};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{money, percent, print_header, print_json, print_output};
use crate::workspace::Workspace;

/// Arguments for the scenario command.
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// Workspace file (JSON)
    pub workspace: PathBuf,

    /// Capital budget
    #[arg(short, long)]
    pub budget: f64,

    /// Evaluate only the scenario with this id or name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Include the standard presets alongside workspace scenarios
    #[arg(long)]
    pub standard: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Selected")]
    selected: usize,
    #[tabled(rename = "Capital", display_with = "money")]
    total_capital: f64,
    #[tabled(rename = "NPV", display_with = "money")]
    total_npv: f64,
    #[tabled(rename = "NPV Change", display_with = "money")]
    npv_change: f64,
    #[tabled(rename = "Change", display_with = "percent")]
    npv_change_pct: f64,
}

impl From<&Scenario> for ScenarioRow {
    fn from(scenario: &Scenario) -> Self {
        let results = scenario.results.clone().unwrap_or_default();
        Self {
            id: scenario.id.to_string(),
            name: scenario.name.clone(),
            selected: results.selected_ids.len(),
            total_capital: results.total_capital,
            total_npv: results.total_npv,
            npv_change: results.npv_change,
            npv_change_pct: results.npv_change_pct,
        }
    }
}

fn select_scenarios(workspace: &Workspace, args: &ScenarioArgs) -> Result<Vec<Scenario>, CliError> {
    let mut scenarios = workspace.scenarios.clone();
    if args.standard || scenarios.is_empty() {
        scenarios.extend(standard_scenarios());
    }

    match &args.name {
        None => Ok(scenarios),
        Some(name) => {
            let matched: Vec<Scenario> = scenarios
                .into_iter()
                .filter(|s| s.id.as_str() == name || s.name.eq_ignore_ascii_case(name))
                .collect();
            if matched.is_empty() {
                Err(CliError::UnknownScenario(name.clone()))
            } else {
                Ok(matched)
            }
        }
    }
}

/// Executes the scenario command.
pub fn execute(args: ScenarioArgs, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    let workspace = Workspace::load(&args.workspace)?;
    let scenarios = select_scenarios(&workspace, &args)?;
    let projects = workspace.prepared_projects(&config.rates);

    let evaluated = compare_scenarios_with(
        &projects,
        &workspace.priorities,
        &scenarios,
        args.budget,
        config,
    )?;

    match format {
        OutputFormat::Json => print_json(&evaluated),
        _ => {
            let rows: Vec<ScenarioRow> = evaluated.iter().map(ScenarioRow::from).collect();
            if format == OutputFormat::Table {
                if let Some(baseline) = evaluated.first().and_then(|s| s.results.as_ref()) {
                    print_header(&format!(
                        "Scenario Analysis (baseline NPV {:.2})",
                        baseline.baseline_npv
                    ));
                }
            }
            print_output(&rows, format)
        }
    }
}
