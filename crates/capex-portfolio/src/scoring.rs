//! Project scoring against weighted priorities.
//!
//! ## Formula
//!
//! For each priority:
//! ```text
//! alignment = clamp(base + irr_bonus + npv_bonus, 0, 100)
//! base      = 75 if the project claims the priority, else 25
//! irr_bonus = min(irr / 25 × 15, 15)
//! npv_bonus = min(npv / 10,000,000 × 10, 10)
//! weighted  = alignment × weight / 100
//! ```
//!
//! By default the bonuses apply on every priority, aligned or not
//! (see [`ScoringConfig::bonus_on_unaligned`]).
//!
//! Scoring a single project leaves `rank` at 0; ranking is a batch concern
//! handled by [`rank_projects`].

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use capex_core::types::{Priority, Project};
use capex_core::{PriorityId, ProjectId};

/// Score of one project on one priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityScore {
    /// Priority scored against.
    pub priority_id: PriorityId,
    /// Alignment score, 0-100.
    pub alignment_score: f64,
    /// `alignment_score × weight / 100`.
    pub weighted_score: f64,
}

/// Score of one project across all priorities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectScore {
    /// Scored project.
    pub project_id: ProjectId,
    /// Per-priority scores, in priority order.
    pub priority_scores: Vec<PriorityScore>,
    /// Sum of weighted scores.
    pub total_score: f64,
    /// True only if every priority's minimum threshold is met.
    pub passes_threshold: bool,
    /// 1-based rank within a batch; 0 until ranked.
    pub rank: usize,
    /// Set by the optimizer for selected projects.
    pub allocated: bool,
}

/// Scores a project with the default scoring constants.
#[must_use]
pub fn score_project(project: &Project, priorities: &[Priority]) -> ProjectScore {
    score_project_with(project, priorities, &ScoringConfig::default())
}

/// Scores a project against a priority set.
#[must_use]
pub fn score_project_with(
    project: &Project,
    priorities: &[Priority],
    config: &ScoringConfig,
) -> ProjectScore {
    let irr_bonus = (project.irr / config.irr_for_max_bonus * config.irr_bonus_max)
        .min(config.irr_bonus_max);
    let npv_bonus = (project.npv / config.npv_for_max_bonus * config.npv_bonus_max)
        .min(config.npv_bonus_max);

    let priority_scores: Vec<PriorityScore> = priorities
        .iter()
        .map(|priority| {
            let aligned = project.is_aligned_to(&priority.id);
            let base = if aligned {
                config.aligned_base
            } else {
                config.unaligned_base
            };
            let bonus = if aligned || config.bonus_on_unaligned {
                irr_bonus + npv_bonus
            } else {
                0.0
            };
            let alignment_score = (base + bonus).clamp(0.0, config.max_score);

            PriorityScore {
                priority_id: priority.id.clone(),
                alignment_score,
                weighted_score: alignment_score * priority.weight / 100.0,
            }
        })
        .collect();

    let passes_threshold = priority_scores
        .iter()
        .zip(priorities)
        .all(|(score, priority)| score.alignment_score >= priority.min_threshold);

    ProjectScore {
        project_id: project.id.clone(),
        total_score: priority_scores.iter().map(|s| s.weighted_score).sum(),
        priority_scores,
        passes_threshold,
        rank: 0,
        allocated: false,
    }
}

/// Scores and ranks a batch of projects with the default constants.
///
/// See [`rank_projects_with`].
#[must_use]
pub fn rank_projects(projects: &[Project], priorities: &[Priority]) -> Vec<ProjectScore> {
    rank_projects_with(projects, priorities, &ScoringConfig::default())
}

/// Scores a batch of projects and returns them ranked.
///
/// The result is sorted by `total_score` descending; ties keep input order.
/// Ranks run 1..=n over the returned values; the inputs are not touched.
#[must_use]
pub fn rank_projects_with(
    projects: &[Project],
    priorities: &[Priority],
    config: &ScoringConfig,
) -> Vec<ProjectScore> {
    warn_on_suspect_inputs(projects, priorities);
    let scores = projects
        .iter()
        .map(|p| score_project_with(p, priorities, config))
        .collect();
    rank_scores(scores)
}

/// Sorts scores descending by total (stable) and assigns 1-based ranks.
#[must_use]
pub fn rank_scores(scores: Vec<ProjectScore>) -> Vec<ProjectScore> {
    let order = ranked_order(&scores);
    let mut slots: Vec<Option<ProjectScore>> = scores.into_iter().map(Some).collect();

    order
        .into_iter()
        .enumerate()
        .filter_map(|(position, index)| {
            slots[index].take().map(|mut score| {
                score.rank = position + 1;
                score
            })
        })
        .collect()
}

/// Indices of `scores` in rank order (descending total, stable).
pub(crate) fn ranked_order(scores: &[ProjectScore]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_score.total_cmp(&scores[a].total_score));
    order
}

/// Logs input anomalies the engine tolerates.
pub(crate) fn warn_on_suspect_inputs(projects: &[Project], priorities: &[Priority]) {
    let total_weight = Priority::total_weight(priorities);
    if !priorities.is_empty() && (total_weight - 100.0).abs() > 1e-6 {
        tracing::warn!(total_weight, "priority weights do not sum to 100");
    }

    let stale = projects.iter().filter(|p| !p.metrics_fresh).count();
    if stale > 0 {
        tracing::warn!(stale, "scoring projects whose cached metrics are stale");
    }
}
