//! Newton-Raphson root-finding algorithm.

use crate::error::MathResult;
use crate::solvers::{SolverConfig, SolverResult, SolverStatus};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// Iteration stops when:
/// - `|f'(x)|` drops below `config.derivative_floor` (returns the current `x`)
/// - successive estimates differ by less than `config.tolerance`
/// - the next estimate is not finite (returns the last finite `x`)
/// - `config.max_iterations` steps have been taken
///
/// None of these is an error; the outcome is reported through
/// [`SolverResult::status`]. Only an invalid configuration fails.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use capex_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    config.validate()?;

    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        let dfx = df(x);

        if dfx.abs() < config.derivative_floor || dfx.is_nan() {
            log::trace!("newton: flat derivative {:.3e} at x={} after {} steps", dfx, x, iteration);
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
                status: SolverStatus::FlatDerivative,
            });
        }

        let next = x - fx / dfx;

        if !next.is_finite() {
            log::trace!("newton: non-finite step from x={} after {} steps", x, iteration);
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
                status: SolverStatus::NonFinite,
            });
        }

        if (next - x).abs() < config.tolerance {
            return Ok(SolverResult {
                root: next,
                iterations: iteration + 1,
                residual: f(next),
                status: SolverStatus::Converged,
            });
        }

        x = next;
    }

    log::debug!(
        "newton: no convergence in {} iterations, last estimate {}",
        config.max_iterations,
        x
    );

    Ok(SolverResult {
        root: x,
        iterations: config.max_iterations,
        residual: f(x),
        status: SolverStatus::MaxIterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert_eq!(result.status, SolverStatus::Converged);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_cube_root() {
        let f = |x: f64| x * x * x - 27.0;
        let df = |x: f64| 3.0 * x * x;

        let result = newton_raphson(f, df, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_flat_derivative_returns_estimate() {
        // Zero derivative at the starting point: the guess comes back unchanged
        let f = |x: f64| x * x * x - 1.0;
        let df = |x: f64| 3.0 * x * x;

        let result = newton_raphson(f, df, 0.0, &SolverConfig::default()).unwrap();

        assert_eq!(result.status, SolverStatus::FlatDerivative);
        assert!(result.root.abs() < f64::EPSILON);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_max_iterations_returns_last_estimate() {
        // No real root: x^2 + 1 oscillates forever
        let f = |x: f64| x * x + 1.0;
        let df = |x: f64| 2.0 * x;

        let config = SolverConfig::new(1e-12, 5);
        let result = newton_raphson(f, df, 0.5, &config).unwrap();

        assert_eq!(result.status, SolverStatus::MaxIterations);
        assert_eq!(result.iterations, 5);
        assert!(result.root.is_finite());
    }

    #[test]
    fn test_invalid_config_is_error() {
        let f = |x: f64| x;
        let df = |_: f64| 1.0;
        assert!(newton_raphson(f, df, 1.0, &SolverConfig::new(-1.0, 10)).is_err());
    }
}
