//! Conditional parallel iteration.
//!
//! Uses rayon when the `parallel` feature is enabled and the Monte Carlo
//! settings ask for it; otherwise falls back to a plain iterator. Both paths
//! return results in input order.

use crate::config::MonteCarloConfig;

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - `config.iterations` reaches `config.parallel_threshold`
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &MonteCarloConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize() {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_map() {
        let config = MonteCarloConfig::default().with_parallel(false);
        let doubled = maybe_parallel_map(&[1, 2, 3], &config, |x| x * 2);
        assert_eq!(doubled, vec![2, 4, 6]);
    }

    #[test]
    fn test_order_preserved_when_parallel_requested() {
        let config = MonteCarloConfig::default()
            .with_iterations(10_000)
            .with_threshold(1);
        let items: Vec<usize> = (0..500).collect();
        let squared = maybe_parallel_map(&items, &config, |x| x * x);
        assert!(squared.iter().enumerate().all(|(i, v)| *v == i * i));
    }
}
