//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{MetricsArgs, OptimizeArgs, RankArgs, ScenarioArgs, SimulateArgs};

/// Capex - Capital allocation and project portfolio analytics CLI
#[derive(Parser)]
#[command(name = "capex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Engine configuration file (TOML)
    #[arg(short, long, global = true, env = "CAPEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute NPV, IRR, MIRR and payback for every project
    Metrics(MetricsArgs),

    /// Score and rank projects against the priorities
    Rank(RankArgs),

    /// Select projects under a budget
    Optimize(OptimizeArgs),

    /// Evaluate stress scenarios against a budget
    Scenario(ScenarioArgs),

    /// Run a Monte Carlo simulation of portfolio NPV
    Simulate(SimulateArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
