//! Budget-constrained project selection.
//!
//! [`optimize_portfolio`] is a single-pass greedy heuristic in score order:
//!
//! 1. Drop excluded projects.
//! 2. Score and rank what remains (stable, descending).
//! 3. Reserve budget for locked projects; they are always selected.
//! 4. Walk the ranking once, taking each project that passes its thresholds
//!    and fits the remaining budget. Skipped projects are never reconsidered.
//!
//! Score order is priority order, not packing efficiency, so a cheaper project
//! further down the list does not displace an expensive one that was skipped.
//! [`optimize_portfolio_exact`] solves the 0/1 knapsack instead and is a
//! separate, more expensive operation.

mod exact;

pub use exact::{optimize_portfolio_exact, optimize_portfolio_exact_with, MAX_GRID_CELLS};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::error::{ensure_finite_budget, PortfolioResult};
use crate::scoring::{score_project_with, warn_on_suspect_inputs, ProjectScore};
use capex_core::types::{Priority, Project};
use capex_core::ProjectId;
use capex_math::statistics::weighted_average;

/// Why a candidate was left out of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Missed at least one priority's minimum threshold.
    FailsThreshold,
    /// Did not fit in the budget left when it was reached.
    OverBudget,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::FailsThreshold => write!(f, "fails threshold"),
            SkipReason::OverBudget => write!(f, "over budget"),
        }
    }
}

/// A candidate that was not selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedProject {
    /// Project identifier.
    pub id: ProjectId,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Outcome of a selection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSelection {
    /// Scores of every non-excluded project in rank order, `allocated` set
    /// on the selected ones.
    pub ranked: Vec<ProjectScore>,
    /// Selected projects: locked ones first, then the rest in rank order.
    pub selected_ids: Vec<ProjectId>,
    /// Locked projects that were present and therefore selected.
    pub locked_ids: Vec<ProjectId>,
    /// Candidates left out, in rank order.
    pub skipped: Vec<SkippedProject>,
    /// Budget consumed by the selection, locked projects included.
    pub total_capital: f64,
    /// Sum of the selected projects' NPV.
    pub total_npv: f64,
    /// Capital-weighted IRR of the selection (percent).
    pub weighted_irr: f64,
    /// `budget - total_capital`.
    pub remaining_budget: f64,
}

impl PortfolioSelection {
    /// Returns true if `id` was selected.
    #[must_use]
    pub fn is_selected(&self, id: &ProjectId) -> bool {
        self.selected_ids.contains(id)
    }

    /// Number of selected projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    /// Returns true if nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    /// Clones the selected projects out of `projects`, in selection order.
    #[must_use]
    pub fn selected_projects(&self, projects: &[Project]) -> Vec<Project> {
        self.selected_ids
            .iter()
            .filter_map(|id| projects.iter().find(|p| &p.id == id))
            .cloned()
            .collect()
    }
}

/// Greedy selection with the default scoring constants.
///
/// # Arguments
///
/// * `projects` - Candidate projects (metrics assumed fresh)
/// * `priorities` - Priorities to score against
/// * `budget` - Capital available, locked projects included
/// * `locked` - Projects that are always selected
/// * `excluded` - Projects that are never selected; wins over `locked`
///
/// # Errors
///
/// Returns `PortfolioError::InvalidArgument` if `budget` is not finite.
pub fn optimize_portfolio(
    projects: &[Project],
    priorities: &[Priority],
    budget: f64,
    locked: &[ProjectId],
    excluded: &[ProjectId],
) -> PortfolioResult<PortfolioSelection> {
    optimize_portfolio_with(
        projects,
        priorities,
        budget,
        locked,
        excluded,
        &ScoringConfig::default(),
    )
}

/// Greedy selection with explicit scoring constants.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidArgument` if `budget` is not finite.
pub fn optimize_portfolio_with(
    projects: &[Project],
    priorities: &[Priority],
    budget: f64,
    locked: &[ProjectId],
    excluded: &[ProjectId],
    scoring: &ScoringConfig,
) -> PortfolioResult<PortfolioSelection> {
    ensure_finite_budget(budget)?;
    warn_on_suspect_inputs(projects, priorities);

    let selection = greedy_select(projects, priorities, budget, locked, excluded, scoring);
    tracing::debug!(
        candidates = selection.ranked.len(),
        selected = selection.selected_ids.len(),
        total_capital = selection.total_capital,
        total_npv = selection.total_npv,
        "portfolio optimized"
    );
    Ok(selection)
}

/// The greedy walk without argument checks or input warnings.
///
/// Monte Carlo runs this once per iteration on perturbed copies.
pub(crate) fn greedy_select(
    projects: &[Project],
    priorities: &[Priority],
    budget: f64,
    locked: &[ProjectId],
    excluded: &[ProjectId],
    scoring: &ScoringConfig,
) -> PortfolioSelection {
    let candidates = Candidates::prepare(projects, priorities, budget, locked, excluded, scoring);

    let mut remaining = budget - candidates.reserved();
    let mut picked = Vec::new();
    let mut skipped = Vec::new();

    for (index, entry) in candidates.entries.iter().enumerate() {
        if entry.locked {
            continue;
        }
        if !entry.score.passes_threshold {
            skipped.push(entry.skip(SkipReason::FailsThreshold));
            continue;
        }

        let cost = entry.project.budget_cost();
        if cost <= remaining {
            remaining -= cost;
            picked.push(index);
        } else {
            skipped.push(entry.skip(SkipReason::OverBudget));
        }
    }

    candidates.finish(&picked, skipped)
}

/// A scored, non-excluded project.
struct Entry<'a> {
    score: ProjectScore,
    project: &'a Project,
    locked: bool,
}

impl Entry<'_> {
    fn skip(&self, reason: SkipReason) -> SkippedProject {
        tracing::trace!(project = %self.project.id, %reason, "project skipped");
        SkippedProject {
            id: self.project.id.clone(),
            reason,
        }
    }
}

/// Ranked candidates shared by the greedy and exact selectors.
struct Candidates<'a> {
    entries: Vec<Entry<'a>>,
    budget: f64,
}

impl<'a> Candidates<'a> {
    fn prepare(
        projects: &'a [Project],
        priorities: &[Priority],
        budget: f64,
        locked: &[ProjectId],
        excluded: &[ProjectId],
        scoring: &ScoringConfig,
    ) -> Self {
        let excluded: HashSet<&ProjectId> = excluded.iter().collect();
        let locked_set: HashSet<&ProjectId> = locked.iter().collect();

        for id in &locked_set {
            if excluded.contains(id) {
                tracing::debug!(project = %id, "project is both locked and excluded; excluding");
            } else if !projects.iter().any(|p| &p.id == *id) {
                tracing::warn!(project = %id, "locked project not found; ignoring");
            }
        }

        let mut entries: Vec<Entry<'a>> = projects
            .iter()
            .filter(|p| !excluded.contains(&p.id))
            .map(|project| Entry {
                score: score_project_with(project, priorities, scoring),
                locked: locked_set.contains(&project.id),
                project,
            })
            .collect();

        entries.sort_by(|a, b| b.score.total_score.total_cmp(&a.score.total_score));
        for (position, entry) in entries.iter_mut().enumerate() {
            entry.score.rank = position + 1;
        }

        Self { entries, budget }
    }

    /// Capital reserved up front for locked projects.
    fn reserved(&self) -> f64 {
        self.entries
            .iter()
            .filter(|e| e.locked)
            .map(|e| e.project.budget_cost())
            .sum()
    }

    /// Builds the result from the entry indices picked on top of the locked set.
    fn finish(self, picked: &[usize], skipped: Vec<SkippedProject>) -> PortfolioSelection {
        let mut selected: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.locked)
            .map(|(i, _)| i)
            .collect();
        let locked_count = selected.len();
        selected.extend_from_slice(picked);

        let chosen: Vec<&Project> = selected.iter().map(|&i| self.entries[i].project).collect();
        let total_capital: f64 = chosen.iter().map(|p| p.budget_cost()).sum();
        let total_npv: f64 = chosen.iter().map(|p| p.npv).sum();
        let weighted_irr = weighted_average(chosen.iter().map(|p| (p.irr, p.budget_cost())));

        let selected_ids: Vec<ProjectId> = chosen.iter().map(|p| p.id.clone()).collect();
        let locked_ids = selected_ids[..locked_count].to_vec();

        let selected_set: HashSet<usize> = selected.into_iter().collect();
        let ranked = self
            .entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let mut score = entry.score;
                score.allocated = selected_set.contains(&i);
                score
            })
            .collect();

        PortfolioSelection {
            ranked,
            selected_ids,
            locked_ids,
            skipped,
            total_capital,
            total_npv,
            weighted_irr,
            remaining_budget: self.budget - total_capital,
        }
    }
}
