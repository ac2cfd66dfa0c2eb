//! Capex CLI - Command-line interface for capital allocation.
//!
//! # Usage
//!
//! ```bash
//! # Cash-flow metrics for every project in a workspace file
//! capex metrics plan.json
//!
//! # Rank projects against the workspace priorities
//! capex rank plan.json
//!
//! # Select projects under a budget, keeping one committed project
//! capex optimize plan.json --budget 12000000 --locked erp-upgrade
//!
//! # Stress the plan
//! capex scenario plan.json --budget 12000000 --standard
//!
//! # Monte Carlo distribution of portfolio NPV
//! capex simulate plan.json --budget 12000000 --iterations 5000 --seed 42
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod workspace;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = workspace::load_engine_config(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Metrics(args) => commands::metrics::execute(args, &config, format)?,
        Commands::Rank(args) => commands::rank::execute(args, &config, format)?,
        Commands::Optimize(args) => commands::optimize::execute(args, &config, format)?,
        Commands::Scenario(args) => commands::scenario::execute(args, &config, format)?,
        Commands::Simulate(args) => commands::simulate::execute(args, &config, format)?,
    }

    Ok(())
}

/// Logs go to stderr so table/JSON/CSV output on stdout stays clean.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("capex=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("capex=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
