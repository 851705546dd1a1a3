//! Bisection configuration types.

use crate::traits::Real;
use crate::types::MathError;

/// How the absolute and relative stopping tests are combined.
///
/// Both tests measure stagnation of the function value between consecutive
/// midpoints, Δ = f(midₙ) − f(midₙ₋₁):
/// - absolute: |Δ| ≤ atol
/// - relative: |Δ / f(midₙ)| ≤ rtol
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToleranceCombination {
    /// Stop as soon as either test passes.
    #[default]
    Any,
    /// Stop only once both tests pass.
    All,
}

/// Configuration for [`BisectionSolver`](super::BisectionSolver).
///
/// # Default Values
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `atol` | 1e-6 |
/// | `rtol` | 1e-6 |
/// | `max_iterations` | 200 |
/// | `combination` | [`ToleranceCombination::Any`] |
///
/// # Examples
///
/// ```
/// use quant_math::math::optimization::{BisectionConfig, ToleranceCombination};
///
/// let config: BisectionConfig<f64> = BisectionConfig::default();
/// assert_eq!(config.max_iterations, 200);
///
/// let strict = BisectionConfig::new(1e-12, 1e-12, 500, ToleranceCombination::All).unwrap();
/// assert_eq!(strict.combination, ToleranceCombination::All);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BisectionConfig<T> {
    /// Absolute tolerance on the change in function value.
    pub atol: T,
    /// Relative tolerance on the change in function value.
    pub rtol: T,
    /// Maximum number of halvings before reporting non-convergence.
    pub max_iterations: usize,
    /// Combination rule for the two stopping tests.
    pub combination: ToleranceCombination,
}

impl<T: Real> Default for BisectionConfig<T> {
    fn default() -> Self {
        Self {
            atol: T::lit(1e-6),
            rtol: T::lit(1e-6),
            max_iterations: 200,
            combination: ToleranceCombination::Any,
        }
    }
}

impl<T: Real> BisectionConfig<T> {
    /// Creates a validated configuration.
    ///
    /// # Errors
    /// [`MathError::Domain`] if a tolerance is negative or NaN, or
    /// `max_iterations == 0`.
    pub fn new(
        atol: T,
        rtol: T,
        max_iterations: usize,
        combination: ToleranceCombination,
    ) -> Result<Self, MathError> {
        let config = Self {
            atol,
            rtol,
            max_iterations,
            combination,
        };
        config.validate()?;
        Ok(config)
    }

    /// Default configuration with the given tolerances.
    ///
    /// # Errors
    /// [`MathError::Domain`] if a tolerance is negative or NaN.
    pub fn with_tolerances(atol: T, rtol: T) -> Result<Self, MathError> {
        Self::new(atol, rtol, Self::default().max_iterations, ToleranceCombination::Any)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`MathError::Domain`] on the first invalid field.
    pub fn validate(&self) -> Result<(), MathError> {
        if !(self.atol >= T::zero()) {
            return Err(MathError::domain(
                "bisection config",
                format!("atol must be non-negative, got {}", self.atol),
            ));
        }
        if !(self.rtol >= T::zero()) {
            return Err(MathError::domain(
                "bisection config",
                format!("rtol must be non-negative, got {}", self.rtol),
            ));
        }
        if self.max_iterations == 0 {
            return Err(MathError::domain(
                "bisection config",
                "max_iterations must be > 0",
            ));
        }
        Ok(())
    }

    /// Applies the stopping rule to the latest function-value change.
    #[inline]
    pub(crate) fn is_converged(&self, delta: T, f_mid: T) -> bool {
        let abs_ok = delta.abs() <= self.atol;
        let rel_ok = (delta / f_mid).abs() <= self.rtol;
        match self.combination {
            ToleranceCombination::Any => abs_ok || rel_ok,
            ToleranceCombination::All => abs_ok && rel_ok,
        }
    }
}
