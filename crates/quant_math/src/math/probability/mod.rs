//! Continuous probability distributions.
//!
//! Each distribution is a validated parameter struct implementing
//! [`ContinuousDistribution`]. The submodules also expose free functions of
//! the form `pdf(params..., x)`, `cdf(params..., x)`, `moment(params..., p)`
//! and `sample(params..., n)` that validate their parameters on every call.
//!
//! | Type | Parameters | cdf evaluation |
//! |------|------------|----------------|
//! | [`Normal`] | mean, std > 0 | erf |
//! | [`Gamma`] | shape > 0, rate > 0 | regularized incomplete gamma (shape ≥ 1) |
//! | [`NoncentralChiSquared`] | k > 0, λ ≥ 0 | truncated Poisson mixture (k ≥ 2) |
//!
//! ## Examples
//!
//! ```
//! use quant_math::math::probability::{gamma, normal};
//!
//! let p = normal::cdf(0.0_f64, 1.0, 0.5).unwrap();
//! assert!((p - 0.691_462_461_274_013).abs() < 1e-6);
//!
//! let q = gamma::cdf(4.0_f64, 1.0, 5.0).unwrap();
//! assert!((q - 0.734_974_084_7).abs() < 1e-3);
//! ```

pub mod gamma;
pub mod noncentral_chi_squared;
pub mod normal;

pub use gamma::Gamma;
pub use noncentral_chi_squared::NoncentralChiSquared;
pub use normal::Normal;

use crate::traits::Real;
use crate::types::MathError;

/// Common interface of the univariate continuous distributions.
///
/// `pdf` is total over the real line (zero outside the support). `cdf`
/// returns a `Result` because some evaluations rely on quadrature or series
/// with their own preconditions.
pub trait ContinuousDistribution<T: Real> {
    /// Probability density at `x`.
    fn pdf(&self, x: T) -> T;

    /// Cumulative distribution function at `x`.
    ///
    /// # Errors
    /// [`MathError::Domain`] when the underlying numerical method does not
    /// support the distribution parameters.
    fn cdf(&self, x: T) -> Result<T, MathError>;

    /// Mean of the distribution.
    fn mean(&self) -> T;

    /// Variance of the distribution.
    fn variance(&self) -> T;

    /// Survival function 1 − F(x).
    ///
    /// # Errors
    /// Propagates errors from [`ContinuousDistribution::cdf`].
    fn survival(&self, x: T) -> Result<T, MathError> {
        Ok(T::one() - self.cdf(x)?)
    }
}
