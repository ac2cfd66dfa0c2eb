//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

use capex_core::CoreError;
use capex_portfolio::PortfolioError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be read.
    #[error("Cannot read {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The workspace file is not valid JSON for a workspace.
    #[error("Invalid workspace {path}: {source}")]
    Workspace {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// The engine configuration is not valid TOML for an `EngineConfig`.
    #[error("Invalid configuration {path}: {source}")]
    Config {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },

    /// A record in the workspace is malformed.
    #[error("Invalid record: {0}")]
    Record(#[from] CoreError),

    /// The engine rejected an argument.
    #[error(transparent)]
    Engine(#[from] PortfolioError),

    /// A named scenario is not in the workspace.
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
