//! Property-based tests for allocation invariants.
//!
//! - Non-locked capital never exceeds the budget left after locked projects
//! - Excluded projects are never selected
//! - Scenario priorities always renormalize to 100
//! - Seeded Monte Carlo is reproducible
//! - Ranks are a permutation of 1..=n over descending scores

use capex_core::types::{CashFlow, Priority, PriorityAdjustment, Project, Scenario};
use capex_core::ProjectId;
use capex_portfolio::prelude::*;
use proptest::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

const PRIORITY_IDS: [&str; 3] = ["growth", "efficiency", "esg"];

prop_compose! {
    fn arb_project(index: usize)(
        capex in -1_000.0f64..5_000_000.0,
        irr in -50.0f64..60.0,
        npv in -2e6f64..2e7,
        aligned in prop::collection::vec(any::<bool>(), 3),
    ) -> Project {
        let mut builder = Project::builder().id(format!("P{index}")).initial_capex(capex);
        for (id, on) in PRIORITY_IDS.iter().zip(aligned) {
            if on {
                builder = builder.align_to(*id);
            }
        }
        builder.build().unwrap().with_metrics(npv, irr, 0.0, 3.0)
    }
}

fn arb_projects() -> impl Strategy<Value = Vec<Project>> {
    (0usize..12).prop_flat_map(|n| (0..n).map(arb_project).collect::<Vec<_>>())
}

fn arb_priorities() -> impl Strategy<Value = Vec<Priority>> {
    prop::collection::vec((0.1f64..100.0, 0.0f64..80.0), 3).prop_map(|specs| {
        specs
            .into_iter()
            .zip(PRIORITY_IDS)
            .map(|((weight, threshold), id)| Priority::new(id, id, weight, threshold))
            .collect()
    })
}

fn pick_ids(projects: &[Project], mask: &[bool]) -> Vec<ProjectId> {
    projects
        .iter()
        .zip(mask.iter().cycle())
        .filter(|(_, on)| **on)
        .map(|(p, _)| p.id.clone())
        .collect()
}

// =============================================================================
// OPTIMIZER
// =============================================================================

proptest! {
    #[test]
    fn greedy_respects_budget_after_locks(
        projects in arb_projects(),
        priorities in arb_priorities(),
        budget in 0.0f64..20_000_000.0,
        lock_mask in prop::collection::vec(prop::bool::weighted(0.2), 1..12),
    ) {
        let locked = pick_ids(&projects, &lock_mask);
        let sel = optimize_portfolio(&projects, &priorities, budget, &locked, &[]).unwrap();

        let locked_capex: f64 = projects
            .iter()
            .filter(|p| locked.contains(&p.id))
            .map(|p| p.initial_capex)
            .sum();
        let free_capex: f64 = projects
            .iter()
            .filter(|p| sel.is_selected(&p.id) && !locked.contains(&p.id))
            .map(|p| p.initial_capex)
            .sum();

        prop_assert!(free_capex <= budget - locked_capex + 1e-6);
        for id in &locked {
            prop_assert!(sel.is_selected(id));
        }
    }

    #[test]
    fn excluded_never_selected(
        projects in arb_projects(),
        priorities in arb_priorities(),
        budget in 0.0f64..20_000_000.0,
        mask in prop::collection::vec(any::<bool>(), 1..12),
        lock_everything in any::<bool>(),
    ) {
        let excluded = pick_ids(&projects, &mask);
        let locked: Vec<ProjectId> = if lock_everything {
            projects.iter().map(|p| p.id.clone()).collect()
        } else {
            Vec::new()
        };
        let sel = optimize_portfolio(&projects, &priorities, budget, &locked, &excluded).unwrap();

        for id in &excluded {
            prop_assert!(!sel.is_selected(id));
        }
    }

    #[test]
    fn exact_fits_remaining_budget(
        projects in arb_projects(),
        priorities in arb_priorities(),
        budget in 0.0f64..20_000_000.0,
    ) {
        let sel = optimize_portfolio_exact(&projects, &priorities, budget, &[], &[], 50_000.0)
            .unwrap();
        prop_assert!(sel.total_capital <= budget + 1e-6);
    }

    #[test]
    fn ranks_are_a_descending_permutation(
        projects in arb_projects(),
        priorities in arb_priorities(),
    ) {
        let ranked = rank_projects(&projects, &priorities);
        prop_assert_eq!(ranked.len(), projects.len());
        for (i, score) in ranked.iter().enumerate() {
            prop_assert_eq!(score.rank, i + 1);
        }
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].total_score >= pair[1].total_score);
        }
    }
}

// =============================================================================
// SCENARIOS
// =============================================================================

proptest! {
    #[test]
    fn scenario_weights_sum_to_100(
        priorities in arb_priorities(),
        changes in prop::collection::vec((-50.0f64..50.0, -20.0f64..20.0), 3),
        cost in -20.0f64..50.0,
        benefit in -20.0f64..50.0,
    ) {
        let mut scenario = Scenario::new("s", "Stress")
            .with_cost_increase(cost)
            .with_benefit_reduction(benefit);
        for ((weight, threshold), id) in changes.into_iter().zip(PRIORITY_IDS) {
            scenario = scenario.with_priority_change(PriorityAdjustment::new(id, weight, threshold));
        }

        let out = apply_scenario(&[], &priorities, &scenario);
        let total: f64 = out.priorities.iter().map(|p| p.weight).sum();
        if total > 0.0 {
            prop_assert!((total - 100.0).abs() < 1e-6);
        }
        for p in &out.priorities {
            prop_assert!((0.0..=100.0).contains(&p.min_threshold));
        }
    }

    #[test]
    fn unadjusted_weights_renormalize_exactly(priorities in arb_priorities()) {
        let out = apply_scenario(&[], &priorities, &Scenario::new("noop", "No-op"));
        let total: f64 = out.priorities.iter().map(|p| p.weight).sum();
        prop_assert!((total - 100.0).abs() < 1e-6);
    }
}

// =============================================================================
// MONTE CARLO
// =============================================================================

fn simulated_projects() -> Vec<Project> {
    let raw = vec![
        Project::builder()
            .id("a")
            .initial_capex(1_000.0)
            .cash_flows(CashFlow::from_amounts(&[-1_000.0, 450.0, 450.0, 450.0]))
            .align_to("growth")
            .build()
            .unwrap(),
        Project::builder()
            .id("b")
            .initial_capex(2_000.0)
            .cash_flows(CashFlow::from_amounts(&[-2_000.0, 700.0, 700.0, 700.0]))
            .align_to("efficiency")
            .build()
            .unwrap(),
    ];
    refresh_projects(&raw, &MetricRates::default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn monte_carlo_is_reproducible(
        seed in any::<u64>(),
        iterations in 0usize..120,
        budget in 0.0f64..5_000.0,
    ) {
        let projects = simulated_projects();
        let priorities = vec![
            Priority::new("growth", "Growth", 50.0, 0.0),
            Priority::new("efficiency", "Efficiency", 50.0, 0.0),
        ];
        let config = EngineConfig::default().with_monte_carlo(
            MonteCarloConfig::default()
                .with_iterations(iterations)
                .with_seed(seed),
        );

        let a = run_monte_carlo_with(&projects, &priorities, budget, &config).unwrap();
        let b = run_monte_carlo_with(&projects, &priorities, budget, &config).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.iterations_completed, iterations);
        prop_assert!(a.p10 <= a.p50 && a.p50 <= a.p90);
    }
}
