//! Monte Carlo simulation of portfolio NPV.
//!
//! Each iteration draws, per project, a cost multiplier and then a benefit
//! multiplier from uniform ranges (±20% and ±15% by default), scales the cash
//! flows with the scenario rule (year 0 by cost, later years by benefit),
//! recomputes NPV at the base discount rate, runs the greedy optimizer on the
//! perturbed set and records the selection's total NPV.
//!
//! ## Randomness
//!
//! - [`run_monte_carlo_with_rng`] draws every iteration from one caller-owned
//!   generator.
//! - [`run_monte_carlo_seeded`] splits the run into chunks of `yield_every`
//!   iterations; chunk `k` draws from `ChaCha8Rng::seed_from_u64(seed)` on
//!   stream `k`. Chunks are independent, so they may run on the rayon pool and
//!   the result is the same either way.
//!
//! Percentiles use the nearest-rank rule on the sorted outcomes.

mod control;

pub use control::{CancellationToken, ProgressObserver, SimulationProgress, Unobserved};

use std::collections::{HashMap, HashSet};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ensure_finite_budget, PortfolioResult};
use crate::optimizer::greedy_select;
use crate::parallel::maybe_parallel_map;
use crate::stress::scale_cash_flows;
use capex_analytics::npv;
use capex_core::types::{Priority, Project};
use capex_core::ProjectId;
use capex_math::statistics::{fraction_where, mean, percentile_nearest_rank, sample_std_dev};

/// Distribution of portfolio NPV across simulated iterations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    /// Iterations asked for.
    pub iterations_requested: usize,
    /// Iterations actually run.
    pub iterations_completed: usize,
    /// True if the run was stopped early.
    pub cancelled: bool,
    /// Mean portfolio NPV.
    pub mean: f64,
    /// Sample standard deviation of portfolio NPV.
    pub std_dev: f64,
    /// Smallest outcome.
    pub min: f64,
    /// Largest outcome.
    pub max: f64,
    /// 10th percentile.
    pub p10: f64,
    /// Median.
    pub p50: f64,
    /// 90th percentile.
    pub p90: f64,
    /// Fraction of iterations with positive portfolio NPV.
    pub probability_positive: f64,
    /// Fraction of iterations at or above 80% of the mean.
    pub probability_near_mean: f64,
    /// Per project, the fraction of iterations in which it was selected.
    pub selection_frequency: Vec<(ProjectId, f64)>,
}

/// Runs a simulation with default settings and `iterations` iterations.
///
/// The seed is drawn from entropy; use [`run_monte_carlo_with`] with a seeded
/// config for reproducible runs.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidArgument` if `budget` is not finite.
pub fn run_monte_carlo(
    projects: &[Project],
    priorities: &[Priority],
    budget: f64,
    iterations: usize,
) -> PortfolioResult<MonteCarloSummary> {
    let mut config = EngineConfig::default();
    config.monte_carlo = config.monte_carlo.with_iterations(iterations);
    run_monte_carlo_with(projects, priorities, budget, &config)
}

/// Runs a simulation with explicit settings.
///
/// Uses `config.monte_carlo.seed` when set and an entropy seed otherwise.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidArgument` for a non-finite budget or
/// invalid Monte Carlo settings.
pub fn run_monte_carlo_with(
    projects: &[Project],
    priorities: &[Priority],
    budget: f64,
    config: &EngineConfig,
) -> PortfolioResult<MonteCarloSummary> {
    let seed = config.monte_carlo.seed.unwrap_or_else(rand::random);
    run_monte_carlo_seeded(projects, priorities, budget, config, seed, None)
}

/// Runs a chunked simulation from `seed`.
///
/// Chunks run on the rayon pool when the `parallel` feature is enabled and
/// the config asks for it. When `cancel` fires, chunks that have not started
/// are dropped and the summary covers the completed prefix.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidArgument` for a non-finite budget or
/// invalid Monte Carlo settings.
pub fn run_monte_carlo_seeded(
    projects: &[Project],
    priorities: &[Priority],
    budget: f64,
    config: &EngineConfig,
    seed: u64,
    cancel: Option<&CancellationToken>,
) -> PortfolioResult<MonteCarloSummary> {
    let sim = Simulation::new(projects, priorities, budget, config)?;
    tracing::debug!(
        iterations = config.monte_carlo.iterations,
        seed,
        parallel = config.monte_carlo.should_parallelize(),
        "monte carlo started"
    );

    let chunk_ids: Vec<usize> = (0..sim.chunk_count()).collect();
    let chunks = maybe_parallel_map(&chunk_ids, &config.monte_carlo, |&k| {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            None
        } else {
            Some(sim.run_chunk(seed, k))
        }
    });

    let (outcomes, cancelled) = concat_prefix(chunks);
    sim.summarize(outcomes, cancelled)
}

/// Runs a simulation drawing every iteration from `rng`.
///
/// `observer` is called every `yield_every` iterations and after the last
/// one; returning `ControlFlow::Break` stops the run.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidArgument` for a non-finite budget or
/// invalid Monte Carlo settings.
pub fn run_monte_carlo_with_rng<R, O>(
    projects: &[Project],
    priorities: &[Priority],
    budget: f64,
    config: &EngineConfig,
    rng: &mut R,
    mut observer: O,
) -> PortfolioResult<MonteCarloSummary>
where
    R: Rng,
    O: ProgressObserver,
{
    let sim = Simulation::new(projects, priorities, budget, config)?;
    let total = config.monte_carlo.iterations;
    let yield_every = config.monte_carlo.yield_every;

    let mut outcomes = Vec::with_capacity(total);
    let mut cancelled = false;
    for i in 0..total {
        outcomes.push(sim.iteration(rng));

        let completed = i + 1;
        if completed % yield_every == 0 || completed == total {
            let progress = SimulationProgress { completed, total };
            if observer.on_progress(progress).is_break() {
                tracing::debug!(completed, total, "monte carlo cancelled");
                cancelled = completed < total;
                break;
            }
        }
    }

    sim.summarize(outcomes, cancelled)
}

/// Runs the chunked simulation on the current tokio task, yielding to the
/// scheduler between chunks.
///
/// Produces the same summary as [`run_monte_carlo_seeded`] for the same seed.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidArgument` for a non-finite budget or
/// invalid Monte Carlo settings.
#[cfg(feature = "async")]
pub async fn run_monte_carlo_async(
    projects: &[Project],
    priorities: &[Priority],
    budget: f64,
    config: &EngineConfig,
    cancel: Option<&CancellationToken>,
) -> PortfolioResult<MonteCarloSummary> {
    let sim = Simulation::new(projects, priorities, budget, config)?;
    let seed = config.monte_carlo.seed.unwrap_or_else(rand::random);

    let mut chunks = Vec::with_capacity(sim.chunk_count());
    for k in 0..sim.chunk_count() {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            chunks.push(None);
            break;
        }
        chunks.push(Some(sim.run_chunk(seed, k)));
        tokio::task::yield_now().await;
    }

    let (outcomes, cancelled) = concat_prefix(chunks);
    sim.summarize(outcomes, cancelled)
}

/// Result of one iteration.
struct IterationOutcome {
    total_npv: f64,
    selected: Vec<ProjectId>,
}

/// Validated inputs of one simulation run.
struct Simulation<'a> {
    projects: &'a [Project],
    priorities: &'a [Priority],
    budget: f64,
    config: &'a EngineConfig,
}

impl<'a> Simulation<'a> {
    fn new(
        projects: &'a [Project],
        priorities: &'a [Priority],
        budget: f64,
        config: &'a EngineConfig,
    ) -> PortfolioResult<Self> {
        ensure_finite_budget(budget)?;
        config.monte_carlo.validate()?;
        Ok(Self {
            projects,
            priorities,
            budget,
            config,
        })
    }

    fn chunk_count(&self) -> usize {
        self.config
            .monte_carlo
            .iterations
            .div_ceil(self.config.monte_carlo.yield_every)
    }

    fn run_chunk(&self, seed: u64, k: usize) -> Vec<IterationOutcome> {
        let size = self.config.monte_carlo.yield_every;
        let start = k * size;
        let end = (start + size).min(self.config.monte_carlo.iterations);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(k as u64);

        tracing::trace!(chunk = k, start, end, "monte carlo chunk");
        (start..end).map(|_| self.iteration(&mut rng)).collect()
    }

    fn iteration<R: Rng>(&self, rng: &mut R) -> IterationOutcome {
        let mc = &self.config.monte_carlo;
        let rate = self.config.rates.discount_rate;

        let perturbed: Vec<Project> = self
            .projects
            .iter()
            .map(|project| {
                let cost = rng.gen_range((1.0 - mc.cost_spread)..=(1.0 + mc.cost_spread));
                let benefit =
                    rng.gen_range((1.0 - mc.benefit_spread)..=(1.0 + mc.benefit_spread));

                let mut perturbed = project.clone();
                perturbed.cash_flows = scale_cash_flows(&project.cash_flows, cost, benefit);
                perturbed.npv = npv(&perturbed.cash_flows, rate);
                perturbed
            })
            .collect();

        let selection = greedy_select(
            &perturbed,
            self.priorities,
            self.budget,
            &[],
            &[],
            &self.config.scoring,
        );
        IterationOutcome {
            total_npv: selection.total_npv,
            selected: selection.selected_ids,
        }
    }

    fn summarize(
        &self,
        outcomes: Vec<IterationOutcome>,
        cancelled: bool,
    ) -> PortfolioResult<MonteCarloSummary> {
        let requested = self.config.monte_carlo.iterations;
        let completed = outcomes.len();
        if completed == 0 {
            return Ok(MonteCarloSummary {
                iterations_requested: requested,
                cancelled,
                ..MonteCarloSummary::default()
            });
        }

        let mut counts: HashMap<&ProjectId, usize> = HashMap::new();
        for outcome in &outcomes {
            for id in &outcome.selected {
                *counts.entry(id).or_default() += 1;
            }
        }
        let mut seen = HashSet::new();
        let selection_frequency = self
            .projects
            .iter()
            .filter(|p| seen.insert(&p.id))
            .map(|p| {
                let hits = counts.get(&p.id).copied().unwrap_or(0);
                (p.id.clone(), hits as f64 / completed as f64)
            })
            .collect();

        let mut values: Vec<f64> = outcomes.iter().map(|o| o.total_npv).collect();
        values.sort_by(f64::total_cmp);
        let average = mean(&values);

        let summary = MonteCarloSummary {
            iterations_requested: requested,
            iterations_completed: completed,
            cancelled,
            mean: average,
            std_dev: sample_std_dev(&values),
            min: values[0],
            max: values[completed - 1],
            p10: percentile_nearest_rank(&values, 0.10)?,
            p50: percentile_nearest_rank(&values, 0.50)?,
            p90: percentile_nearest_rank(&values, 0.90)?,
            probability_positive: fraction_where(&values, |v| v > 0.0),
            probability_near_mean: fraction_where(&values, |v| v >= 0.8 * average),
            selection_frequency,
        };
        tracing::debug!(
            completed,
            cancelled,
            mean = summary.mean,
            p10 = summary.p10,
            p90 = summary.p90,
            "monte carlo finished"
        );
        Ok(summary)
    }
}

/// Concatenates chunk results in order up to the first missing chunk.
fn concat_prefix(chunks: Vec<Option<Vec<IterationOutcome>>>) -> (Vec<IterationOutcome>, bool) {
    let mut outcomes = Vec::new();
    for chunk in chunks {
        match chunk {
            Some(part) => outcomes.extend(part),
            None => return (outcomes, true),
        }
    }
    (outcomes, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonteCarloConfig;
    use approx::assert_relative_eq;
    use capex_analytics::{refresh_projects, MetricRates};
    use capex_core::types::CashFlow;
    use std::ops::ControlFlow;

    fn inputs() -> (Vec<Project>, Vec<Priority>) {
        let projects = vec![
            Project::builder()
                .id("a")
                .initial_capex(1000.0)
                .cash_flows(CashFlow::from_amounts(&[-1000.0, 700.0, 700.0]))
                .align_to("growth")
                .build()
                .unwrap(),
            Project::builder()
                .id("b")
                .initial_capex(800.0)
                .cash_flows(CashFlow::from_amounts(&[-800.0, 500.0, 500.0]))
                .build()
                .unwrap(),
        ];
        let projects = refresh_projects(&projects, &MetricRates::default());
        (projects, vec![Priority::new("growth", "Growth", 100.0, 0.0)])
    }

    fn config(iterations: usize) -> EngineConfig {
        EngineConfig::default().with_monte_carlo(
            MonteCarloConfig::default()
                .with_iterations(iterations)
                .with_seed(42)
                .with_parallel(false),
        )
    }

    #[test]
    fn test_same_seed_same_summary() {
        let (projects, priorities) = inputs();
        let a = run_monte_carlo_with(&projects, &priorities, 5_000.0, &config(200)).unwrap();
        let b = run_monte_carlo_with(&projects, &priorities, 5_000.0, &config(200)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.iterations_completed, 200);
        assert!(!a.cancelled);
    }

    #[test]
    fn test_summary_ordering_and_probabilities() {
        let (projects, priorities) = inputs();
        let s = run_monte_carlo_with(&projects, &priorities, 5_000.0, &config(500)).unwrap();

        assert!(s.min <= s.p10 && s.p10 <= s.p50 && s.p50 <= s.p90 && s.p90 <= s.max);
        assert!((0.0..=1.0).contains(&s.probability_positive));
        assert!((0.0..=1.0).contains(&s.probability_near_mean));
        assert!(s.std_dev > 0.0);
        // both projects always fit the budget
        assert_eq!(s.selection_frequency.len(), 2);
        assert!(s.selection_frequency.iter().all(|(_, f)| (f - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_zero_spread_is_deterministic_baseline() {
        let (projects, priorities) = inputs();
        let mut cfg = config(20);
        cfg.monte_carlo = cfg.monte_carlo.with_spreads(0.0, 0.0);
        let s = run_monte_carlo_with(&projects, &priorities, 5_000.0, &cfg).unwrap();

        let baseline: f64 = projects.iter().map(|p| p.npv).sum();
        assert_relative_eq!(s.mean, baseline, epsilon = 1e-9);
        assert_relative_eq!(s.p10, baseline, epsilon = 1e-9);
        assert!(s.std_dev.abs() < 1e-9);
        assert_relative_eq!(s.probability_positive, 1.0);
    }

    #[test]
    fn test_zero_iterations() {
        let (projects, priorities) = inputs();
        let s = run_monte_carlo_with(&projects, &priorities, 5_000.0, &config(0)).unwrap();
        assert_eq!(s.iterations_completed, 0);
        assert!(s.mean.abs() < f64::EPSILON);
        assert!(s.selection_frequency.is_empty());
    }

    #[test]
    fn test_injected_rng_and_observer() {
        let (projects, priorities) = inputs();
        let mut calls = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let s = run_monte_carlo_with_rng(
            &projects,
            &priorities,
            5_000.0,
            &config(25),
            &mut rng,
            |p: SimulationProgress| {
                calls.push(p.completed);
                ControlFlow::Continue(())
            },
        )
        .unwrap();

        assert_eq!(calls, vec![10, 20, 25]);
        assert_eq!(s.iterations_completed, 25);
    }

    #[test]
    fn test_observer_cancels() {
        let (projects, priorities) = inputs();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let s = run_monte_carlo_with_rng(
            &projects,
            &priorities,
            5_000.0,
            &config(100),
            &mut rng,
            |p: SimulationProgress| {
                if p.completed >= 30 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
        )
        .unwrap();

        assert!(s.cancelled);
        assert_eq!(s.iterations_completed, 30);
        assert_eq!(s.iterations_requested, 100);
    }

    #[test]
    fn test_pre_cancelled_token() {
        let (projects, priorities) = inputs();
        let token = CancellationToken::new();
        token.cancel();
        let s = run_monte_carlo_seeded(
            &projects,
            &priorities,
            5_000.0,
            &config(100),
            1,
            Some(&token),
        )
        .unwrap();
        assert!(s.cancelled);
        assert_eq!(s.iterations_completed, 0);
    }

    #[test]
    fn test_invalid_arguments() {
        let (projects, priorities) = inputs();
        assert!(run_monte_carlo(&projects, &priorities, f64::NAN, 10).is_err());

        let mut cfg = config(10);
        cfg.monte_carlo = cfg.monte_carlo.with_spreads(-0.1, 0.1);
        assert!(run_monte_carlo_with(&projects, &priorities, 100.0, &cfg).is_err());
    }
}
