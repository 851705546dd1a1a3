//! Composite Newton–Cotes quadrature.
//!
//! Both rules evaluate `f` on n + 1 equally spaced nodes xᵢ = a + i·h,
//! h = (b − a)/n, and return h · Σ wᵢ f(xᵢ):
//!
//! | Rule | Endpoint weight | Interior weight | Error |
//! |------|-----------------|-----------------|-------|
//! | [`trapezoidal`] | 1/2 | 1 | O(h²) |
//! | [`simpson`] | 1/3 | 4/3 (odd i), 2/3 (even i) | O(h⁴) for even n |
//!
//! The interior sum is a [`partitioned_sum`](crate::parallel::partitioned_sum),
//! so results can differ from a sequential evaluation in the last bits.
//!
//! ## Examples
//!
//! ```
//! use quant_math::math::integration::{simpson, trapezoidal};
//!
//! let f = |x: f64| 3.0 * x * x + x - 3.0;
//! assert!((trapezoidal(f, 1.0, 2.0, 10_000).unwrap() - 5.5).abs() < 1e-6);
//! assert!((simpson(f, 1.0, 2.0, 10_000).unwrap() - 5.5).abs() < 1e-10);
//! ```

mod simpson;
mod trapezoidal;

pub use simpson::{simpson, simpson_with};
pub use trapezoidal::{trapezoidal, trapezoidal_with};

use crate::parallel::ParallelConfig;
use crate::traits::Real;
use crate::types::MathError;

/// Quadrature rule selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuadratureRule {
    /// Composite trapezoidal rule.
    Trapezoidal,
    /// Composite Simpson rule.
    #[default]
    Simpson,
}

impl QuadratureRule {
    /// Integrates `f` over [a, b] with `n` subdivisions using this rule.
    ///
    /// # Errors
    /// [`MathError::Domain`] if `a >= b` or `n < 1`.
    pub fn integrate<T, F>(self, f: F, a: T, b: T, n: usize) -> Result<T, MathError>
    where
        T: Real,
        F: Fn(T) -> T + Sync + Send,
    {
        self.integrate_with(f, a, b, n, &ParallelConfig::default())
    }

    /// Same as [`QuadratureRule::integrate`] with an explicit parallel configuration.
    pub fn integrate_with<T, F>(
        self,
        f: F,
        a: T,
        b: T,
        n: usize,
        config: &ParallelConfig,
    ) -> Result<T, MathError>
    where
        T: Real,
        F: Fn(T) -> T + Sync + Send,
    {
        match self {
            QuadratureRule::Trapezoidal => trapezoidal_with(f, a, b, n, config),
            QuadratureRule::Simpson => simpson_with(f, a, b, n, config),
        }
    }
}

/// Validates the integration bounds and returns the step width.
pub(crate) fn step_width<T: Real>(
    context: &'static str,
    a: T,
    b: T,
    n: usize,
) -> Result<T, MathError> {
    if a.is_nan() || b.is_nan() || a >= b {
        return Err(MathError::domain(
            context,
            format!("lower bound must be below upper bound, got [{}, {}]", a, b),
        ));
    }
    if n < 1 {
        return Err(MathError::domain(
            context,
            format!("n must be at least 1, got {}", n),
        ));
    }
    Ok((b - a) / T::from_usize(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rule_dispatch() {
        let f = |x: f64| x.exp();
        let exact = 1.0_f64.exp() - 1.0;
        let trap = QuadratureRule::Trapezoidal.integrate(f, 0.0, 1.0, 1_000).unwrap();
        let simp = QuadratureRule::Simpson.integrate(f, 0.0, 1.0, 1_000).unwrap();
        assert_abs_diff_eq!(trap, exact, epsilon = 1e-6);
        assert_abs_diff_eq!(simp, exact, epsilon = 1e-12);
    }

    #[test]
    fn test_default_rule_is_simpson() {
        assert_eq!(QuadratureRule::default(), QuadratureRule::Simpson);
    }

    #[test]
    fn test_step_width_rejects_bad_input() {
        assert!(step_width("test", 1.0_f64, 1.0, 10).is_err());
        assert!(step_width("test", 2.0_f64, 1.0, 10).is_err());
        assert!(step_width("test", 0.0_f64, 1.0, 0).is_err());
        assert!(step_width("test", f64::NAN, 1.0, 4).is_err());
        assert_eq!(step_width("test", 0.0_f64, 1.0, 4).unwrap(), 0.25);
    }
}
