//! First-order difference quotients.

use crate::traits::Real;

/// Forward difference (f(x + h) − f(x)) / h. Error O(h).
#[inline]
pub fn first_forward<T, F>(f: F, x: T, h: T) -> T
where
    T: Real,
    F: Fn(T) -> T,
{
    (f(x + h) - f(x)) / h
}

/// Backward difference (f(x) − f(x − h)) / h. Error O(h).
#[inline]
pub fn first_backward<T, F>(f: F, x: T, h: T) -> T
where
    T: Real,
    F: Fn(T) -> T,
{
    (f(x) - f(x - h)) / h
}

/// Central difference (f(x + h/2) − f(x − h/2)) / h. Error O(h²).
///
/// The stencil spans a total width of `h`, not 2h.
///
/// # Examples
/// ```
/// use quant_math::math::differentiation::first_central;
///
/// let d = first_central(|x: f64| x.sin(), 0.0, 1e-4);
/// assert!((d - 1.0).abs() < 1e-8);
/// ```
#[inline]
pub fn first_central<T, F>(f: F, x: T, h: T) -> T
where
    T: Real,
    F: Fn(T) -> T,
{
    let half = T::lit(0.5) * h;
    (f(x + half) - f(x - half)) / h
}
