//! Metrics command implementation.
//!
//! Recomputes NPV, IRR, MIRR and payback for every project in a workspace.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use capex_core::types::Project;
use capex_portfolio::{EngineConfig, MetricRates};

use crate::cli::OutputFormat;
use crate::output::{money, percent, print_header, print_output, years};
use crate::workspace::Workspace;

/// Arguments for the metrics command.
#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Workspace file (JSON)
    pub workspace: PathBuf,

    /// Discount rate as a decimal (e.g. 0.08), overriding the configuration
    #[arg(short, long)]
    pub discount_rate: Option<f64>,
}

#[derive(Debug, Serialize, Tabled)]
struct MetricsRow {
    #[tabled(rename = "Project")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Capex", display_with = "money")]
    initial_capex: f64,
    #[tabled(rename = "NPV", display_with = "money")]
    npv: f64,
    #[tabled(rename = "IRR", display_with = "percent")]
    irr: f64,
    #[tabled(rename = "MIRR", display_with = "percent")]
    mirr: f64,
    #[tabled(rename = "Payback (yrs)", display_with = "years")]
    payback_period: f64,
}

impl From<&Project> for MetricsRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            name: project.name.clone(),
            initial_capex: project.initial_capex,
            npv: project.npv,
            irr: project.irr,
            mirr: project.mirr,
            payback_period: project.payback_period,
        }
    }
}

/// Executes the metrics command.
pub fn execute(args: MetricsArgs, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    let workspace = Workspace::load(&args.workspace)?;

    let rates = match args.discount_rate {
        Some(rate) => MetricRates {
            discount_rate: rate,
            ..config.rates
        },
        None => config.rates,
    };
    let projects = workspace.prepared_projects(&rates);
    let rows: Vec<MetricsRow> = projects.iter().map(MetricsRow::from).collect();

    if format == OutputFormat::Table {
        print_header(&format!(
            "Project Metrics (discount rate {:.2}%)",
            rates.discount_rate * 100.0
        ));
    }
    print_output(&rows, format)
}
