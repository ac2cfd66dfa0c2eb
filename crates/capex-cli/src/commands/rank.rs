//! Rank command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use capex_core::types::Project;
use capex_portfolio::{rank_projects_with, EngineConfig, ProjectScore};

use crate::cli::OutputFormat;
use crate::output::{print_header, print_json, print_output, print_warning, score, yes_no};
use crate::workspace::Workspace;

/// Arguments for the rank command.
#[derive(Args, Debug)]
pub struct RankArgs {
    /// Workspace file (JSON)
    pub workspace: PathBuf,

    /// Show only projects that meet every priority threshold
    #[arg(long)]
    pub passing: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct RankRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Project")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Score", display_with = "score")]
    total_score: f64,
    #[tabled(rename = "Passes", display_with = "yes_no")]
    passes_threshold: bool,
}

impl RankRow {
    fn new(score: &ProjectScore, projects: &[Project]) -> Self {
        let name = projects
            .iter()
            .find(|p| p.id == score.project_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        Self {
            rank: score.rank,
            id: score.project_id.to_string(),
            name,
            total_score: score.total_score,
            passes_threshold: score.passes_threshold,
        }
    }
}

/// Executes the rank command.
pub fn execute(args: RankArgs, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    let workspace = Workspace::load(&args.workspace)?;
    if workspace.priorities.is_empty() {
        print_warning("workspace has no priorities; every score is 0");
    }

    let projects = workspace.prepared_projects(&config.rates);
    let mut scores = rank_projects_with(&projects, &workspace.priorities, &config.scoring);
    if args.passing {
        scores.retain(|s| s.passes_threshold);
    }

    match format {
        // Full per-priority breakdown
        OutputFormat::Json => print_json(&scores),
        _ => {
            let rows: Vec<RankRow> = scores.iter().map(|s| RankRow::new(s, &projects)).collect();
            if format == OutputFormat::Table {
                print_header("Project Ranking");
            }
            print_output(&rows, format)
        }
    }
}
