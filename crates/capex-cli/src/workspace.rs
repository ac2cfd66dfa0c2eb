//! Workspace and configuration files.
//!
//! A workspace is a JSON document holding the planning inputs:
//!
//! ```json
//! {
//!   "projects":   [{ "id": "erp", "name": "ERP", "initial_capex": 2000000, ... }],
//!   "priorities": [{ "id": "growth", "name": "Growth", "weight": 60, "min_threshold": 40 }],
//!   "scenarios":  [{ "id": "squeeze", "name": "Squeeze", "adjustments": { "cost_increase": 15 } }]
//! }
//! ```
//!
//! Projects without cash flows get a flat projection from their financial
//! inputs. Every project's metrics are recomputed on load.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use capex_analytics::{project_cash_flows, refresh_project, MetricRates};
use capex_core::types::{Priority, Project, Scenario};
use capex_core::CoreError;
use capex_portfolio::EngineConfig;

use crate::error::{CliError, CliResult};

/// Years projected for projects that carry no cash flows.
pub const DEFAULT_HORIZON_YEARS: u32 = 10;

/// Planning inputs read from a workspace file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Workspace {
    pub projects: Vec<Project>,
    pub priorities: Vec<Priority>,
    pub scenarios: Vec<Scenario>,
}

impl Workspace {
    /// Reads and checks a workspace file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let workspace: Self = serde_json::from_str(&text).map_err(|source| CliError::Workspace {
            path: path.to_path_buf(),
            source,
        })?;
        workspace.check()?;

        tracing::debug!(
            path = %path.display(),
            projects = workspace.projects.len(),
            priorities = workspace.priorities.len(),
            scenarios = workspace.scenarios.len(),
            "workspace loaded"
        );
        Ok(workspace)
    }

    fn check(&self) -> CliResult<()> {
        let mut seen = HashSet::new();
        for project in &self.projects {
            if !seen.insert(&project.id) {
                return Err(CoreError::invalid_value(
                    "id",
                    format!("duplicate project id '{}'", project.id),
                )
                .into());
            }
            if !project.initial_capex.is_finite() {
                return Err(CoreError::invalid_value(
                    "initial_capex",
                    format!("project '{}' has a non-finite capex", project.id),
                )
                .into());
            }
        }
        Ok(())
    }

    /// Projects with cash flows filled in and metrics recomputed at `rates`.
    pub fn prepared_projects(&self, rates: &MetricRates) -> Vec<Project> {
        self.projects
            .iter()
            .map(|project| {
                if project.cash_flows.is_empty() {
                    let flows = project_cash_flows(
                        project.initial_capex,
                        project.annual_opex,
                        project.revenue_potential,
                        project.savings_potential,
                        DEFAULT_HORIZON_YEARS,
                    );
                    refresh_project(&project.clone().with_cash_flows(flows), rates)
                } else {
                    refresh_project(project, rates)
                }
            })
            .collect()
    }
}

/// Loads the engine configuration, falling back to defaults.
pub fn load_engine_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: EngineConfig = toml::from_str(&text).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    config.monte_carlo.validate()?;

    tracing::debug!(path = %path.display(), "engine configuration loaded");
    Ok(config)
}
