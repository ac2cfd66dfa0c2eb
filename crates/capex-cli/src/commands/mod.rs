//! CLI command implementations.

pub mod metrics;
pub mod optimize;
pub mod rank;
pub mod scenario;
pub mod simulate;

// Re-export submodules for convenience
pub use metrics::MetricsArgs;
pub use optimize::OptimizeArgs;
pub use rank::RankArgs;
pub use scenario::ScenarioArgs;
pub use simulate::SimulateArgs;

use capex_core::ProjectId;
use capex_portfolio::PortfolioError;

use crate::error::{CliError, CliResult};

/// Converts raw identifiers from the command line.
pub fn parse_ids(raw: &[String]) -> Vec<ProjectId> {
    raw.iter().map(|id| ProjectId::new(id.trim())).collect()
}

/// Validates an iteration count.
pub fn validate_iterations(raw: i64) -> CliResult<usize> {
    usize::try_from(raw).map_err(|_| {
        CliError::from(PortfolioError::invalid_argument(
            "iterations",
            format!("must not be negative, got {}", raw),
        ))
    })
}
