//! Simulate command implementation.
//!
//! Runs a Monte Carlo simulation of portfolio NPV under cost and benefit
//! uncertainty.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use capex_portfolio::{run_monte_carlo_with, EngineConfig, MonteCarloSummary};

use crate::cli::OutputFormat;
use crate::commands::validate_iterations;
use crate::output::{print_header, print_json, print_output, print_warning, KeyValue};
use crate::workspace::Workspace;

/// Arguments for the simulate command.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Workspace file (JSON)
    pub workspace: PathBuf,

    /// Capital budget
    #[arg(short, long)]
    pub budget: f64,

    /// Number of iterations
    #[arg(short, long, default_value = "1000", allow_negative_numbers = true)]
    pub iterations: i64,

    /// Random seed for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize, Tabled)]
struct FrequencyRow {
    #[tabled(rename = "Project")]
    id: String,
    #[tabled(rename = "Selected In", display_with = "as_share")]
    frequency: f64,
}

fn as_share(value: &f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn summary_rows(summary: &MonteCarloSummary) -> Vec<KeyValue> {
    vec![
        KeyValue::new(
            "Iterations",
            format!("{} / {}", summary.iterations_completed, summary.iterations_requested),
        ),
        KeyValue::money("Mean NPV", summary.mean),
        KeyValue::money("Std Dev", summary.std_dev),
        KeyValue::money("Min", summary.min),
        KeyValue::money("Max", summary.max),
        KeyValue::money("P10", summary.p10),
        KeyValue::money("P50", summary.p50),
        KeyValue::money("P90", summary.p90),
        KeyValue::new("P(NPV > 0)", as_share(&summary.probability_positive)),
        KeyValue::new("P(NPV >= 80% of mean)", as_share(&summary.probability_near_mean)),
    ]
}

/// Executes the simulate command.
pub fn execute(args: SimulateArgs, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    let iterations = validate_iterations(args.iterations)?;
    let workspace = Workspace::load(&args.workspace)?;
    let projects = workspace.prepared_projects(&config.rates);

    let mut monte_carlo = config.monte_carlo.with_iterations(iterations);
    if let Some(seed) = args.seed {
        monte_carlo = monte_carlo.with_seed(seed);
    }
    let config = (*config).with_monte_carlo(monte_carlo);

    let summary = run_monte_carlo_with(&projects, &workspace.priorities, args.budget, &config)?;
    if summary.iterations_completed == 0 {
        print_warning("no iterations were run; every statistic is 0");
    }

    match format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Csv => print_output(&summary_rows(&summary), format),
        OutputFormat::Table => {
            print_header(&format!("Monte Carlo ({} iterations)", iterations));
            print_output(&summary_rows(&summary), format)?;

            let frequency: Vec<FrequencyRow> = summary
                .selection_frequency
                .iter()
                .map(|(id, frequency)| FrequencyRow {
                    id: id.to_string(),
                    frequency: *frequency,
                })
                .collect();
            print_header("Selection Frequency");
            print_output(&frequency, format)
        }
    }
}
