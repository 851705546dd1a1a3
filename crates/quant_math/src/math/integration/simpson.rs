//! Composite Simpson rule.

use super::step_width;
use crate::parallel::{partitioned_sum, ParallelConfig};
use crate::traits::Real;
use crate::types::MathError;

/// Approximates ∫ₐᵇ f(x) dx with the composite Simpson rule on `n`
/// subintervals, using the default [`ParallelConfig`].
///
/// The weights are 1/3 at both endpoints and alternate 4/3, 2/3 over the
/// interior nodes starting with 4/3 at i = 1. Fourth-order accuracy needs an
/// even `n`; an odd `n` is accepted and evaluated with the same weights.
///
/// # Errors
/// [`MathError::Domain`] if `a >= b` or `n < 1`.
///
/// # Examples
/// ```
/// use quant_math::math::integration::simpson;
///
/// let value = simpson(|x: f64| x.powi(3), 0.0, 2.0, 2).unwrap();
/// assert!((value - 4.0).abs() < 1e-12);
/// ```
pub fn simpson<T, F>(f: F, a: T, b: T, n: usize) -> Result<T, MathError>
where
    T: Real,
    F: Fn(T) -> T + Sync + Send,
{
    simpson_with(f, a, b, n, &ParallelConfig::default())
}

/// Simpson rule with an explicit parallel configuration for the
/// interior-point reduction.
pub fn simpson_with<T, F>(
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
    let h = step_width("simpson", a, b, n)?;
    if n % 2 == 1 {
        tracing::debug!(n, "simpson rule with odd subdivision count");
    }

    let third = T::one() / T::lit(3.0);
    let odd_weight = T::lit(4.0) * third;
    let even_weight = T::lit(2.0) * third;

    let ends = third * (f(a) + f(b));
    let interior: T = partitioned_sum(1..n, config, |i| {
        let weight = if i % 2 == 1 { odd_weight } else { even_weight };
        weight * f(a + T::from_usize(i) * h)
    });

    Ok(h * (ends + interior))
}
