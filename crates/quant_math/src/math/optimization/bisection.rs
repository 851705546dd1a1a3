//! Bisection root finder for increasing functions.

use super::{BisectionConfig, ToleranceCombination};
use crate::traits::Real;
use crate::types::MathError;

/// Bisection root finder.
///
/// The target is assumed monotonically increasing on [start, end]: the
/// solver requires f(start) < f(end) and decides which half to keep from the
/// sign of f(mid)·f(start). A general sign-change bracket is not accepted;
/// a decreasing target must be negated by the caller. On a non-monotone
/// target the returned point is not guaranteed to be a root.
///
/// Convergence is judged on the change in function value between successive
/// midpoints (see [`ToleranceCombination`]), not on the interval width.
/// Reaching `max_iterations` yields [`MathError::ConvergenceFailure`].
///
/// # Example
///
/// ```
/// use quant_math::math::optimization::{BisectionConfig, BisectionSolver};
///
/// let solver = BisectionSolver::new(BisectionConfig::default());
/// let root = solver.find_root(|x: f64| (0.5 * x).exp() - 5.0, 0.0, 5.0).unwrap();
/// assert!((root - 3.218_875_824_9).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct BisectionSolver<T> {
    config: BisectionConfig<T>,
}

impl<T: Real> BisectionSolver<T> {
    /// Creates a solver with the given configuration.
    pub fn new(config: BisectionConfig<T>) -> Self {
        Self { config }
    }

    /// Creates a solver with the default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: BisectionConfig::default(),
        }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &BisectionConfig<T> {
        &self.config
    }

    /// Finds x* in [start, end] with f(x*) ≈ 0.
    ///
    /// # Errors
    /// - [`MathError::Domain`] if `start >= end` or `f(start) >= f(end)`
    /// - [`MathError::ConvergenceFailure`] if the stopping rule is not met
    ///   within `max_iterations` halvings
    pub fn find_root<F>(&self, f: F, start: T, end: T) -> Result<T, MathError>
    where
        F: Fn(T) -> T,
    {
        if start.is_nan() || end.is_nan() || start >= end {
            return Err(MathError::domain(
                "bisection",
                format!("start must be below end, got [{}, {}]", start, end),
            ));
        }
        let mut f_start = f(start);
        let f_end = f(end);
        if !(f_start < f_end) {
            return Err(MathError::domain(
                "bisection",
                format!(
                    "target must increase across the interval, got f(start) = {} and f(end) = {}",
                    f_start, f_end
                ),
            ));
        }

        let half = T::lit(0.5);
        let mut lo = start;
        let mut hi = end;
        let mut mid = half * (lo + hi);
        let mut f_mid = f(mid);
        if f_mid == T::zero() {
            return Ok(mid);
        }
        let mut f_prev = f_end;

        for iteration in 0..self.config.max_iterations {
            if self.config.is_converged(f_mid - f_prev, f_mid) {
                tracing::debug!(iteration, root = mid.as_f64(), "bisection converged");
                return Ok(mid);
            }

            if f_mid * f_start < T::zero() {
                hi = mid;
            } else {
                lo = mid;
                f_start = f_mid;
            }

            f_prev = f_mid;
            mid = half * (lo + hi);
            f_mid = f(mid);
            if f_mid == T::zero() {
                return Ok(mid);
            }
        }

        Err(MathError::convergence_failure(
            "bisection",
            self.config.max_iterations,
            mid.as_f64(),
        ))
    }
}

/// Finds a root of an increasing `f` on [start, end] with the given
/// tolerances, stopping when either tolerance is met.
///
/// # Errors
/// See [`BisectionSolver::find_root`]. Negative or NaN tolerances are a
/// [`MathError::Domain`].
///
/// # Examples
/// ```
/// use quant_math::math::optimization::bisection;
///
/// let root = bisection(|x: f64| 2.0 * x - 5.0, 0.0, 5.0, 1e-6, 1e-6).unwrap();
/// assert_eq!(root, 2.5);
/// ```
pub fn bisection<T, F>(f: F, start: T, end: T, atol: T, rtol: T) -> Result<T, MathError>
where
    T: Real,
    F: Fn(T) -> T,
{
    let config = BisectionConfig::with_tolerances(atol, rtol)?;
    BisectionSolver::new(config).find_root(f, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::cell::Cell;

    // ========================================
    // Reference roots
    // ========================================

    #[test]
    fn test_linear_root_hit_exactly() {
        let root = bisection(|x: f64| 2.0 * x - 5.0, 0.0, 5.0, 1e-6, 1e-6).unwrap();
        assert_abs_diff_eq!(root, 2.5, epsilon = 1e-6);
    }

    #[test]
    fn test_exponential_root() {
        let root = bisection(|x: f64| (0.5 * x).exp() - 5.0, 0.0, 5.0, 1e-6, 1e-6).unwrap();
        assert_abs_diff_eq!(root, 3.218_875_824_9, epsilon = 1e-6);
    }

    #[test]
    fn test_cubic_root() {
        let solver = BisectionSolver::with_defaults();
        let f = |x: f64| x * x * x - x - 2.0;
        let root = solver.find_root(f, 1.0, 2.0).unwrap();
        assert!(f(root).abs() < 1e-5);
    }

    #[test]
    fn test_all_mode_reaches_machine_precision() {
        let config = BisectionConfig::new(1e-6_f64, 1e-6, 200, ToleranceCombination::All).unwrap();
        let root = BisectionSolver::new(config)
            .find_root(|x: f64| x * x - 2.0, 0.0, 2.0)
            .unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-14);
    }

    #[test]
    fn test_root_in_f32() {
        let root = bisection(|x: f32| x * x - 2.0, 0.0_f32, 2.0, 1e-5, 1e-5).unwrap();
        assert_abs_diff_eq!(root, std::f32::consts::SQRT_2, epsilon = 1e-4);
    }

    // ========================================
    // Error handling
    // ========================================

    #[test]
    fn test_reversed_interval_is_domain_error() {
        let err = bisection(|x: f64| x, 1.0, 0.0, 1e-6, 1e-6).unwrap_err();
        assert!(err.is_domain());
        assert!(bisection(|x: f64| x, 1.0, 1.0, 1e-6, 1e-6).is_err());
    }

    #[test]
    fn test_decreasing_target_is_domain_error() {
        let err = bisection(|x: f64| 5.0 - 2.0 * x, 0.0, 5.0, 1e-6, 1e-6).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_iteration_cap_reports_convergence_failure() {
        let config = BisectionConfig::new(0.0_f64, 0.0, 5, ToleranceCombination::All).unwrap();
        let err = BisectionSolver::new(config)
            .find_root(|x: f64| x.powi(3) - 3.0, 0.0, 4.0)
            .unwrap_err();
        match err {
            MathError::ConvergenceFailure { iterations, .. } => assert_eq!(iterations, 5),
            other => panic!("Expected ConvergenceFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_first_change_is_measured_against_end_value() {
        // f(mid) equals f(end) on a plateau, so the first stagnation test passes
        let calls = Cell::new(0);
        let f = |x: f64| {
            calls.set(calls.get() + 1);
            if x < 1.0 {
                -1.0
            } else {
                1.0
            }
        };
        let root = bisection(f, 0.0, 4.0, 1e-6, 1e-6).unwrap();
        assert_eq!(root, 2.0);
        assert_eq!(calls.get(), 3);
    }
}
