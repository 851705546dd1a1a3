//! Scalar abstraction shared by every numerical routine.
//!
//! All functions in this crate are generic over a single floating-point
//! precision `T: Real`. A formula evaluation never mixes precisions; literal
//! constants are converted once through [`Real::lit`].

use std::fmt::{Debug, Display};

use num_traits::{Float, FloatConst};

/// Floating-point scalar used throughout the crate.
///
/// Blanket-implemented for every type that satisfies the bounds, which in
/// practice means `f32` and `f64`.
///
/// # Examples
/// ```
/// use quant_math::traits::Real;
///
/// fn discount<T: Real>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let df: f64 = discount(0.05, 1.0);
/// assert!((df - 0.951229).abs() < 1e-5);
/// ```
pub trait Real: Float + FloatConst + Send + Sync + Debug + Display + 'static {
    /// Converts an `f64` literal into `Self`.
    ///
    /// Values that cannot be represented become NaN, which then propagates
    /// through the surrounding formula.
    #[inline]
    fn lit(value: f64) -> Self {
        <Self as num_traits::NumCast>::from(value).unwrap_or_else(Self::nan)
    }

    /// Converts an index or count into `Self`.
    #[inline]
    fn from_usize(value: usize) -> Self {
        <Self as num_traits::NumCast>::from(value).unwrap_or_else(Self::nan)
    }

    /// Lossy view as `f64`, used for error payloads and log fields.
    #[inline]
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl<T> Real for T where T: Float + FloatConst + Send + Sync + Debug + Display + 'static {}
