//! Descriptive statistics with zero-safe conventions.
//!
//! Every aggregate here returns `0.0` instead of NaN or infinity when its
//! denominator is empty or zero, so downstream averaging stays finite.

use statrs::statistics::Statistics;

use crate::error::{MathError, MathResult};

/// Divides `numerator` by `denominator`, returning 0 for a zero or
/// non-finite quotient.
#[must_use]
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Arithmetic mean, 0 for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().mean()
}

/// Sample standard deviation, 0 when fewer than two values are present.
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.iter().std_dev()
}

/// Weighted average of `(value, weight)` pairs, 0 when the weights sum to 0.
#[must_use]
pub fn weighted_average<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (weighted_sum, total_weight) = pairs
        .into_iter()
        .fold((0.0, 0.0), |(sum, total), (value, weight)| {
            (sum + value * weight, total + weight)
        });
    safe_ratio(weighted_sum, total_weight)
}

/// Fraction of values satisfying `predicate`, 0 for an empty slice.
#[must_use]
pub fn fraction_where<P>(values: &[f64], predicate: P) -> f64
where
    P: Fn(f64) -> bool,
{
    let hits = values.iter().filter(|&&v| predicate(v)).count();
    safe_ratio(hits as f64, values.len() as f64)
}

/// Nearest-rank percentile of an ascending-sorted slice.
///
/// Uses index `floor(n × p)` clamped to the last element; no interpolation.
///
/// # Arguments
///
/// * `sorted` - Values sorted ascending
/// * `p` - Percentile as a fraction in `[0, 1]`
///
/// # Example
///
/// ```rust
/// use capex_math::statistics::percentile_nearest_rank;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// assert_eq!(percentile_nearest_rank(&sorted, 0.1).unwrap(), 2.0);
/// assert_eq!(percentile_nearest_rank(&sorted, 0.5).unwrap(), 6.0);
/// ```
pub fn percentile_nearest_rank(sorted: &[f64], p: f64) -> MathResult<f64> {
    if sorted.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(MathError::invalid_input(format!(
            "percentile must be within [0, 1], got {}",
            p
        )));
    }

    let index = ((sorted.len() as f64) * p).floor() as usize;
    Ok(sorted[index.min(sorted.len() - 1)])
}
