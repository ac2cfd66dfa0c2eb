//! Configuration for allocation computations.
//!
//! Every public operation has a variant using these defaults and a `_with`
//! variant taking an explicit [`EngineConfig`] (or one of its parts).

use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};
use capex_analytics::MetricRates;

/// Constants of the alignment scoring formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Base score on a priority the project claims alignment to.
    pub aligned_base: f64,
    /// Base score on a priority the project does not claim.
    pub unaligned_base: f64,
    /// Largest IRR bonus.
    pub irr_bonus_max: f64,
    /// IRR (percent) that earns the full IRR bonus.
    pub irr_for_max_bonus: f64,
    /// Largest NPV bonus.
    pub npv_bonus_max: f64,
    /// NPV that earns the full NPV bonus.
    pub npv_for_max_bonus: f64,
    /// Alignment score ceiling.
    pub max_score: f64,
    /// Apply the IRR/NPV bonuses on priorities the project is not aligned to.
    pub bonus_on_unaligned: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            aligned_base: 75.0,
            unaligned_base: 25.0,
            irr_bonus_max: 15.0,
            irr_for_max_bonus: 25.0,
            npv_bonus_max: 10.0,
            npv_for_max_bonus: 10_000_000.0,
            max_score: 100.0,
            bonus_on_unaligned: true,
        }
    }
}

impl ScoringConfig {
    /// Sets whether unaligned priorities receive bonuses.
    #[must_use]
    pub fn with_bonus_on_unaligned(mut self, enabled: bool) -> Self {
        self.bonus_on_unaligned = enabled;
        self
    }
}

/// Monte Carlo simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Number of iterations.
    pub iterations: usize,
    /// Half-width of the uniform cost multiplier (0.20 = [0.8, 1.2]).
    pub cost_spread: f64,
    /// Half-width of the uniform benefit multiplier (0.15 = [0.85, 1.15]).
    pub benefit_spread: f64,
    /// Iterations between yield points; also the size of a random-stream chunk.
    pub yield_every: usize,
    /// Seed for reproducible runs; `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Enable parallel chunk execution (requires 'parallel' feature).
    pub parallel: bool,
    /// Minimum iteration count to trigger parallel execution.
    pub parallel_threshold: usize,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            cost_spread: 0.20,
            benefit_spread: 0.15,
            yield_every: 10,
            seed: None,
            parallel: true,
            parallel_threshold: 2000,
        }
    }
}

impl MonteCarloConfig {
    /// Sets the iteration count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the multiplier spreads.
    #[must_use]
    pub fn with_spreads(mut self, cost_spread: f64, benefit_spread: f64) -> Self {
        self.cost_spread = cost_spread;
        self.benefit_spread = benefit_spread;
        self
    }

    /// Sets the yield interval.
    #[must_use]
    pub fn with_yield_every(mut self, yield_every: usize) -> Self {
        self.yield_every = yield_every;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used.
    #[must_use]
    pub fn should_parallelize(&self) -> bool {
        cfg!(feature = "parallel") && self.parallel && self.iterations >= self.parallel_threshold
    }

    /// Checks the settings.
    pub fn validate(&self) -> PortfolioResult<()> {
        for (name, spread) in [
            ("cost_spread", self.cost_spread),
            ("benefit_spread", self.benefit_spread),
        ] {
            if !(spread.is_finite() && (0.0..1.0).contains(&spread)) {
                return Err(PortfolioError::invalid_argument(
                    name,
                    format!("must be within [0, 1), got {}", spread),
                ));
            }
        }
        if self.yield_every == 0 {
            return Err(PortfolioError::invalid_argument(
                "yield_every",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rates for NPV and MIRR.
    pub rates: MetricRates,
    /// Scoring constants.
    pub scoring: ScoringConfig,
    /// Monte Carlo settings.
    pub monte_carlo: MonteCarloConfig,
}

impl EngineConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the metric rates.
    #[must_use]
    pub fn with_rates(mut self, rates: MetricRates) -> Self {
        self.rates = rates;
        self
    }

    /// Sets the scoring constants.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Sets the Monte Carlo settings.
    #[must_use]
    pub fn with_monte_carlo(mut self, monte_carlo: MonteCarloConfig) -> Self {
        self.monte_carlo = monte_carlo;
        self
    }
}
