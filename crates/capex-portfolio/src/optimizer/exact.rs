//! Exact 0/1 knapsack selection.
//!
//! Maximizes the summed `total_score` of threshold-passing candidates under
//! the budget left after locked projects. Capital is discretized to multiples
//! of `resolution`; each cost is rounded up and the capacity rounded down, so
//! the chosen set always fits the real budget.
//!
//! Rounding can only exclude combinations, never single projects: a candidate
//! whose cost fits the remaining budget is capped at the full grid. When locked
//! projects already exceed the budget, nothing else is selected, free projects
//! included.

use super::{Candidates, PortfolioSelection, SkipReason};
use crate::config::ScoringConfig;
use crate::error::{ensure_finite_budget, PortfolioError, PortfolioResult};
use crate::scoring::warn_on_suspect_inputs;
use capex_core::types::{Priority, Project};
use capex_core::ProjectId;

/// Largest DP table (items × capacity cells) the exact solver accepts.
pub const MAX_GRID_CELLS: usize = 1_000_000;

/// Exact selection with the default scoring constants.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidArgument` if `budget` is not finite,
/// `resolution` is not a positive finite number, or the grid would exceed
/// [`MAX_GRID_CELLS`].
pub fn optimize_portfolio_exact(
    projects: &[Project],
    priorities: &[Priority],
    budget: f64,
    locked: &[ProjectId],
    excluded: &[ProjectId],
    resolution: f64,
) -> PortfolioResult<PortfolioSelection> {
    optimize_portfolio_exact_with(
        projects,
        priorities,
        budget,
        locked,
        excluded,
        resolution,
        &ScoringConfig::default(),
    )
}

/// Exact selection with explicit scoring constants.
///
/// # Errors
///
/// See [`optimize_portfolio_exact`].
pub fn optimize_portfolio_exact_with(
    projects: &[Project],
    priorities: &[Priority],
    budget: f64,
    locked: &[ProjectId],
    excluded: &[ProjectId],
    resolution: f64,
    scoring: &ScoringConfig,
) -> PortfolioResult<PortfolioSelection> {
    ensure_finite_budget(budget)?;
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(PortfolioError::invalid_argument(
            "resolution",
            format!("must be positive and finite, got {}", resolution),
        ));
    }
    warn_on_suspect_inputs(projects, priorities);

    let candidates = Candidates::prepare(projects, priorities, budget, locked, excluded, scoring);
    let remaining = budget - candidates.reserved();
    let capacity_units = (remaining.max(0.0) / resolution).floor();

    // (entry index, weight in grid units, value)
    let mut items: Vec<(usize, usize, f64)> = Vec::new();
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
        if cost > remaining {
            skipped.push(entry.skip(SkipReason::OverBudget));
            continue;
        }
        // A project that fits in real money never needs more than the whole grid.
        let units = (cost / resolution).ceil().min(capacity_units);
        items.push((index, units as usize, entry.score.total_score));
    }

    let cells = (items.len() as f64 + 1.0) * (capacity_units + 1.0);
    if cells > MAX_GRID_CELLS as f64 {
        return Err(PortfolioError::invalid_argument(
            "resolution",
            format!(
                "grid of {} cells exceeds the limit of {}; use a coarser resolution",
                cells, MAX_GRID_CELLS
            ),
        ));
    }
    let capacity = capacity_units as usize;

    let chosen = solve_knapsack(&items, capacity);
    let mut picked = Vec::with_capacity(chosen.len());
    for (slot, &(index, _, _)) in items.iter().enumerate() {
        if chosen[slot] {
            picked.push(index);
        } else {
            skipped.push(candidates.entries[index].skip(SkipReason::OverBudget));
        }
    }

    let selection = candidates.finish(&picked, skipped);
    tracing::debug!(
        items = items.len(),
        capacity,
        selected = selection.selected_ids.len(),
        total_capital = selection.total_capital,
        "exact portfolio optimized"
    );
    Ok(selection)
}

/// Classic DP over capacity; returns which items are taken.
fn solve_knapsack(items: &[(usize, usize, f64)], capacity: usize) -> Vec<bool> {
    let width = capacity + 1;
    let mut best = vec![0.0_f64; width];
    let mut take = vec![false; items.len() * width];

    for (slot, &(_, weight, value)) in items.iter().enumerate() {
        if value <= 0.0 {
            continue;
        }
        for c in (weight..width).rev() {
            let candidate = best[c - weight] + value;
            if candidate > best[c] {
                best[c] = candidate;
                take[slot * width + c] = true;
            }
        }
    }

    let mut chosen = vec![false; items.len()];
    let mut c = capacity;
    for slot in (0..items.len()).rev() {
        if take[slot * width + c] {
            chosen[slot] = true;
            c -= items[slot].1;
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::optimize_portfolio;
    use approx::assert_relative_eq;

    fn priorities() -> Vec<Priority> {
        vec![Priority::new("growth", "Growth", 100.0, 0.0)]
    }

    fn project(id: &str, capex: f64, irr: f64) -> Project {
        Project::builder()
            .id(id)
            .initial_capex(capex)
            .align_to("growth")
            .build()
            .unwrap()
            .with_metrics(0.0, irr, 0.0, 2.0)
    }

    #[test]
    fn test_exact_beats_greedy_when_packing_matters() {
        // scores: big 90, a 87, b 87; budget 100
        let projects = vec![
            project("big", 60.0, 25.0),
            project("a", 50.0, 20.0),
            project("b", 50.0, 20.0),
        ];

        let greedy = optimize_portfolio(&projects, &priorities(), 100.0, &[], &[]).unwrap();
        assert_eq!(greedy.selected_ids, vec![ProjectId::new("big")]);

        let exact =
            optimize_portfolio_exact(&projects, &priorities(), 100.0, &[], &[], 1.0).unwrap();
        assert_eq!(
            exact.selected_ids,
            vec![ProjectId::new("a"), ProjectId::new("b")]
        );
        assert_relative_eq!(exact.total_capital, 100.0);
        assert!(exact.skipped.iter().any(|s| s.id.as_str() == "big"));
    }

    #[test]
    fn test_rounding_never_overspends() {
        let projects = vec![project("a", 50.5, 20.0), project("b", 50.5, 20.0)];
        let exact =
            optimize_portfolio_exact(&projects, &priorities(), 101.0, &[], &[], 10.0).unwrap();
        // each rounds up to 6 units against a capacity of 10
        assert_eq!(exact.len(), 1);
        assert!(exact.total_capital <= 101.0);
    }

    #[test]
    fn test_exact_fit_off_grid_is_selected() {
        let projects = vec![project("a", 105.0, 20.0)];
        let exact =
            optimize_portfolio_exact(&projects, &priorities(), 105.0, &[], &[], 10.0).unwrap();
        assert_eq!(exact.selected_ids, vec![ProjectId::new("a")]);
        assert_relative_eq!(exact.remaining_budget, 0.0);
    }

    #[test]
    fn test_capped_project_leaves_room_only_for_free_ones() {
        let projects = vec![
            project("a", 105.0, 25.0),
            project("b", 5.0, 20.0),
            project("free", 0.0, 10.0),
        ];
        let exact =
            optimize_portfolio_exact(&projects, &priorities(), 105.0, &[], &[], 10.0).unwrap();
        assert!(exact.total_capital <= 105.0);
        assert!(exact.is_selected(&ProjectId::new("free")));
    }

    #[test]
    fn test_zero_budget_only_locked_matches_greedy() {
        let projects = vec![
            project("locked", 40.0, 10.0),
            project("paid", 10.0, 10.0),
            project("free", 0.0, 10.0),
            project("refund", -5.0, 10.0),
        ];
        let locked = [ProjectId::new("locked")];

        let greedy = optimize_portfolio(&projects, &priorities(), 0.0, &locked, &[]).unwrap();
        let exact =
            optimize_portfolio_exact(&projects, &priorities(), 0.0, &locked, &[], 1.0).unwrap();

        // remaining is -40 after the lock, so even free projects do not fit
        assert_eq!(exact.selected_ids, vec![ProjectId::new("locked")]);
        assert_eq!(exact.selected_ids, greedy.selected_ids);
        assert_relative_eq!(exact.remaining_budget, -40.0);
        assert!(exact
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::OverBudget));

        // without the lock, a zero budget still admits free projects
        let exact =
            optimize_portfolio_exact(&projects, &priorities(), 0.0, &[], &[], 1.0).unwrap();
        let greedy = optimize_portfolio(&projects, &priorities(), 0.0, &[], &[]).unwrap();
        assert_eq!(exact.selected_ids, greedy.selected_ids);
    }

    #[test]
    fn test_locked_respected() {
        let projects = vec![project("a", 50.0, 20.0), project("locked", 70.0, 0.0)];
        let locked = [ProjectId::new("locked")];
        let exact =
            optimize_portfolio_exact(&projects, &priorities(), 100.0, &locked, &[], 1.0).unwrap();
        assert_eq!(exact.selected_ids, vec![ProjectId::new("locked")]);
        assert_eq!(exact.locked_ids, locked.to_vec());
    }

    #[test]
    fn test_grid_limit_and_resolution_checked() {
        let projects = vec![project("a", 1.0, 20.0)];
        assert!(
            optimize_portfolio_exact(&projects, &priorities(), 1e9, &[], &[], 1.0).is_err()
        );
        assert!(
            optimize_portfolio_exact(&projects, &priorities(), 100.0, &[], &[], 0.0).is_err()
        );
        assert!(
            optimize_portfolio_exact(&projects, &priorities(), 100.0, &[], &[], f64::NAN)
                .is_err()
        );
    }
}
