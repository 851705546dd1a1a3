//! Normal distribution N(mean, std²).

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::ContinuousDistribution;
use crate::math::special::{double_factorial, erf};
use crate::traits::Real;
use crate::types::MathError;

/// Normal distribution parameterised by mean and standard deviation.
///
/// # Examples
/// ```
/// use quant_math::math::probability::{ContinuousDistribution, Normal};
///
/// let n = Normal::new(0.0_f64, 1.0).unwrap();
/// assert!((n.pdf(0.5) - 0.352_065_326_764_299_5).abs() < 1e-10);
/// assert!((n.cdf(0.5).unwrap() - 0.691_462_461_274_013).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Normal<T> {
    mean: T,
    std: T,
}

impl<T: Real> Normal<T> {
    /// Creates a normal distribution.
    ///
    /// # Errors
    /// [`MathError::Domain`] if `std` is not strictly positive or `mean` is
    /// not finite.
    pub fn new(mean: T, std: T) -> Result<Self, MathError> {
        if !mean.is_finite() {
            return Err(MathError::domain(
                "normal",
                format!("mean must be finite, got {}", mean),
            ));
        }
        if !(std > T::zero()) || !std.is_finite() {
            return Err(MathError::domain(
                "normal",
                format!("std must be strictly positive, got {}", std),
            ));
        }
        Ok(Self { mean, std })
    }

    /// Standard normal N(0, 1).
    pub fn standard() -> Self {
        Self {
            mean: T::zero(),
            std: T::one(),
        }
    }

    /// Returns the standard deviation.
    #[inline]
    pub fn std(&self) -> T {
        self.std
    }

    /// p-th central moment E[(X − mean)ᵖ].
    ///
    /// Zero for odd p and std^p · (p − 1)!! for even p; the zeroth moment is 1.
    ///
    /// # Errors
    /// [`MathError::Domain`] if `p < 0`.
    pub fn moment(&self, p: i64) -> Result<T, MathError> {
        if p < 0 {
            return Err(MathError::domain(
                "normal::moment",
                format!("order must be non-negative, got {}", p),
            ));
        }
        if p == 0 {
            return Ok(T::one());
        }
        if p % 2 == 1 {
            return Ok(T::zero());
        }
        let exponent = i32::try_from(p).map_err(|_| {
            MathError::domain("normal::moment", format!("order {} is too large", p))
        })?;
        Ok(self.std.powi(exponent) * double_factorial::<T>(p - 1)?)
    }

    /// Draws `n` independent variates from the thread-local generator.
    pub fn sample(&self, n: usize) -> Vec<T>
    where
        StandardNormal: Distribution<T>,
    {
        self.sample_with(&mut rand::thread_rng(), n)
    }

    /// Draws `n` independent variates from `rng`.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<T>
    where
        StandardNormal: Distribution<T>,
    {
        (0..n)
            .map(|_| {
                let z: T = rng.sample(StandardNormal);
                self.mean + self.std * z
            })
            .collect()
    }
}

impl<T: Real> ContinuousDistribution<T> for Normal<T> {
    fn pdf(&self, x: T) -> T {
        let z = (x - self.mean) / self.std;
        let norm = self.std * (T::lit(2.0) * T::PI()).sqrt();
        (-T::lit(0.5) * z * z).exp() / norm
    }

    fn cdf(&self, x: T) -> Result<T, MathError> {
        let z = (x - self.mean) / (self.std * T::SQRT_2());
        Ok(T::lit(0.5) * (T::one() + erf(z)))
    }

    fn mean(&self) -> T {
        self.mean
    }

    fn variance(&self) -> T {
        self.std * self.std
    }
}

/// Density of N(mean, std²) at `x`.
///
/// # Errors
/// [`MathError::Domain`] for invalid parameters.
pub fn pdf<T: Real>(mean: T, std: T, x: T) -> Result<T, MathError> {
    Ok(Normal::new(mean, std)?.pdf(x))
}

/// Distribution function ½(1 + erf((x − mean)/(std√2))).
///
/// # Errors
/// [`MathError::Domain`] for invalid parameters.
pub fn cdf<T: Real>(mean: T, std: T, x: T) -> Result<T, MathError> {
    Normal::new(mean, std)?.cdf(x)
}

/// p-th central moment, see [`Normal::moment`].
///
/// # Errors
/// [`MathError::Domain`] for invalid parameters or `p < 0`.
pub fn moment<T: Real>(mean: T, std: T, p: i64) -> Result<T, MathError> {
    Normal::new(mean, std)?.moment(p)
}

/// Draws `n` variates from N(mean, std²).
///
/// There is no seed contract; use [`Normal::sample_with`] for reproducible draws.
///
/// # Errors
/// [`MathError::Domain`] for invalid parameters.
pub fn sample<T: Real>(mean: T, std: T, n: usize) -> Result<Vec<T>, MathError>
where
    StandardNormal: Distribution<T>,
{
    Ok(Normal::new(mean, std)?.sample(n))
}
