//! Composite trapezoidal rule.

use super::step_width;
use crate::parallel::{partitioned_sum, ParallelConfig};
use crate::traits::Real;
use crate::types::MathError;

/// Approximates ∫ₐᵇ f(x) dx with the composite trapezoidal rule on `n`
/// subintervals, using the default [`ParallelConfig`].
///
/// # Errors
/// [`MathError::Domain`] if `a >= b` or `n < 1`.
///
/// # Examples
/// ```
/// use quant_math::math::integration::trapezoidal;
///
/// let value = trapezoidal(|x: f64| (3.0 * x).cos(), 0.0, 5.0, 10_000).unwrap();
/// assert!((value - 15.0_f64.sin() / 3.0).abs() < 1e-2);
/// ```
pub fn trapezoidal<T, F>(f: F, a: T, b: T, n: usize) -> Result<T, MathError>
where
    T: Real,
    F: Fn(T) -> T + Sync + Send,
{
    trapezoidal_with(f, a, b, n, &ParallelConfig::default())
}

/// Trapezoidal rule with an explicit parallel configuration for the
/// interior-point reduction.
pub fn trapezoidal_with<T, F>(
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
    let h = step_width("trapezoidal", a, b, n)?;
    let half = T::lit(0.5);

    let ends = half * (f(a) + f(b));
    let interior: T = partitioned_sum(1..n, config, |i| f(a + T::from_usize(i) * h));

    Ok(h * (ends + interior))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    #[test]
    fn test_polynomial_reference() {
        let f = |x: f64| 3.0 * x * x + x - 3.0;
        assert_abs_diff_eq!(trapezoidal(f, 1.0, 2.0, 10_000).unwrap(), 5.5, epsilon = 1e-2);
    }

    #[test]
    fn test_cosine_reference() {
        let f = |x: f64| (3.0 * x).cos();
        let exact = 15.0_f64.sin() / 3.0;
        assert_abs_diff_eq!(trapezoidal(f, 0.0, 5.0, 10_000).unwrap(), exact, epsilon = 1e-2);
    }

    #[test]
    fn test_single_interval() {
        // n = 1: h/2 (f(a) + f(b))
        let value = trapezoidal(|x: f64| x * x, 0.0, 2.0, 1).unwrap();
        assert_eq!(value, 4.0);
    }

    #[test]
    fn test_every_interior_point_is_used() {
        // A spike at the last interior node must contribute h · f(x_{n-1})
        let value = trapezoidal(|x: f64| if (x - 0.75).abs() < 1e-12 { 1.0 } else { 0.0 }, 0.0, 1.0, 4)
            .unwrap();
        assert_eq!(value, 0.25);
    }

    #[test]
    fn test_second_order_convergence() {
        let f = |x: f64| x.exp();
        let exact = 1.0_f64.exp() - 1.0;
        let coarse = (trapezoidal(f, 0.0, 1.0, 50).unwrap() - exact).abs();
        let fine = (trapezoidal(f, 0.0, 1.0, 100).unwrap() - exact).abs();
        // Halving h divides the error by about four
        assert_relative_eq!(coarse / fine, 4.0, max_relative = 0.01);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let f = |x: f64| x.sin() * x;
        let seq = trapezoidal_with(f, 0.0, 3.0, 20_000, &ParallelConfig::sequential()).unwrap();
        let par = trapezoidal_with(f, 0.0, 3.0, 20_000, &ParallelConfig::new(8, 1)).unwrap();
        assert_relative_eq!(seq, par, epsilon = 1e-12);
    }

    #[test]
    fn test_reversed_bounds_are_domain_error() {
        assert!(trapezoidal(|x: f64| x, 1.0, 0.0, 10).unwrap_err().is_domain());
        assert!(trapezoidal(|x: f64| x, 0.0, 1.0, 0).unwrap_err().is_domain());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_exact_for_linear(c0 in -10.0_f64..10.0, c1 in -10.0_f64..10.0, n in 1_usize..200) {
            let value = trapezoidal(|x: f64| c0 + c1 * x, 0.0, 2.0, n).unwrap();
            prop_assert!((value - (2.0 * c0 + 2.0 * c1)).abs() < 1e-9);
        }
    }
}
