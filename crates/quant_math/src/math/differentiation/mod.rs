//! Finite-difference derivatives.
//!
//! | Order | Forward | Backward | Central |
//! |-------|---------|----------|---------|
//! | 1 | [`first_forward`] O(h) | [`first_backward`] O(h) | [`first_central`] O(h²) |
//! | 2 | [`second_forward`] O(h) | [`second_backward`] O(h) | [`second_central`] O(h²) |
//! | n | [`nth_forward`] | [`nth_backward`] | [`nth_central`] |
//!
//! All operators are pure: the same `f`, `x` and `h` always give the same
//! result. [`DEFAULT_STEP`] suits first derivatives in `f64`; second and
//! higher orders lose precision at that step and should use a larger one.
//!
//! ## Examples
//!
//! ```
//! use quant_math::math::differentiation::{first_central, DEFAULT_STEP};
//!
//! let f = |x: f64| 2.0 * x * x + 2.0;
//! assert!((first_central(f, 1.5, DEFAULT_STEP) - 6.0).abs() < 1e-3);
//! ```

mod first;
mod nth;
mod second;

pub use first::{first_backward, first_central, first_forward};
pub use nth::{nth_backward, nth_central, nth_forward};
pub use second::{second_backward, second_central, second_forward};

use crate::traits::Real;
use crate::types::MathError;

/// Default step width for difference quotients.
pub const DEFAULT_STEP: f64 = 1e-6;

/// Stencil direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FiniteDifference {
    /// Samples at x, x + h, ...
    Forward,
    /// Samples at x, x − h, ...
    Backward,
    /// Samples symmetrically around x.
    #[default]
    Central,
}

impl FiniteDifference {
    /// First derivative of `f` at `x` with step `h`.
    pub fn first<T, F>(self, f: F, x: T, h: T) -> T
    where
        T: Real,
        F: Fn(T) -> T,
    {
        match self {
            FiniteDifference::Forward => first_forward(f, x, h),
            FiniteDifference::Backward => first_backward(f, x, h),
            FiniteDifference::Central => first_central(f, x, h),
        }
    }

    /// Second derivative of `f` at `x` with step `h`.
    pub fn second<T, F>(self, f: F, x: T, h: T) -> T
    where
        T: Real,
        F: Fn(T) -> T,
    {
        match self {
            FiniteDifference::Forward => second_forward(f, x, h),
            FiniteDifference::Backward => second_backward(f, x, h),
            FiniteDifference::Central => second_central(f, x, h),
        }
    }

    /// n-th derivative of `f` at `x` with step `h`.
    ///
    /// # Errors
    /// [`MathError::Domain`] if `n == 0`.
    pub fn nth<T, F>(self, f: F, n: usize, x: T, h: T) -> Result<T, MathError>
    where
        T: Real,
        F: Fn(T) -> T,
    {
        match self {
            FiniteDifference::Forward => nth_forward(f, n, x, h),
            FiniteDifference::Backward => nth_backward(f, n, x, h),
            FiniteDifference::Central => nth_central(f, n, x, h),
        }
    }
}
