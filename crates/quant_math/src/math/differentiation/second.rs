//! Second-order three-point stencils.

use crate::traits::Real;

/// (f(x + 2h) − 2f(x + h) + f(x)) / h². Error O(h).
#[inline]
pub fn second_forward<T, F>(f: F, x: T, h: T) -> T
where
    T: Real,
    F: Fn(T) -> T,
{
    let two = T::lit(2.0);
    (f(x + two * h) - two * f(x + h) + f(x)) / (h * h)
}

/// (f(x) − 2f(x − h) + f(x − 2h)) / h². Error O(h).
#[inline]
pub fn second_backward<T, F>(f: F, x: T, h: T) -> T
where
    T: Real,
    F: Fn(T) -> T,
{
    let two = T::lit(2.0);
    (f(x) - two * f(x - h) + f(x - two * h)) / (h * h)
}

/// (f(x + h) − 2f(x) + f(x − h)) / h². Error O(h²).
#[inline]
pub fn second_central<T, F>(f: F, x: T, h: T) -> T
where
    T: Real,
    F: Fn(T) -> T,
{
    let two = T::lit(2.0);
    (f(x + h) - two * f(x) + f(x - h)) / (h * h)
}
