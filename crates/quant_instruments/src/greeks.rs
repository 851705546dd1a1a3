//! Finite-difference Greeks.
//!
//! Provides [`GreeksConfig`] for the bump widths used by every pricer's
//! bump-and-revalue sensitivities, and [`Greeks`] for the full set of
//! first-order sensitivities plus gamma.
//!
//! Bumps are applied through the central stencils of
//! [`quant_math::math::differentiation`]: first derivatives sample at
//! x ± h/2, second derivatives at x ± h.

use std::cell::RefCell;

use quant_math::traits::Real;

use crate::error::PricingError;

/// Configuration for finite-difference Greeks.
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `spot_bump_relative` | 1e-4 | Spot bump as a fraction of spot |
/// | `vol_bump` | 1e-4 | Absolute volatility bump |
/// | `rate_bump` | 1e-4 | Absolute short-rate bump |
/// | `time_bump` | 1e-4 | Time bump in years |
///
/// # Examples
///
/// ```rust
/// use quant_instruments::greeks::GreeksConfig;
///
/// let config: GreeksConfig<f64> = GreeksConfig::builder()
///     .spot_bump_relative(1e-3)
///     .build()
///     .unwrap();
/// assert!((config.spot_bump(100.0) - 0.1).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreeksConfig<T> {
    /// Relative bump for the spot price.
    ///
    /// The actual bump is `spot_bump_relative * spot`.
    pub spot_bump_relative: T,

    /// Absolute bump for volatility.
    pub vol_bump: T,

    /// Absolute bump for the interest rate.
    pub rate_bump: T,

    /// Bump for time to maturity, in years.
    pub time_bump: T,
}

impl<T: Real> Default for GreeksConfig<T> {
    fn default() -> Self {
        Self {
            spot_bump_relative: T::lit(1e-4),
            vol_bump: T::lit(1e-4),
            rate_bump: T::lit(1e-4),
            time_bump: T::lit(1e-4),
        }
    }
}

impl<T: Real> GreeksConfig<T> {
    /// Creates a new builder for constructing a `GreeksConfig`.
    pub fn builder() -> GreeksConfigBuilder<T> {
        GreeksConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`PricingError::InvalidConfig`] if any bump is not strictly positive.
    pub fn validate(&self) -> Result<(), PricingError> {
        let bumps = [
            ("spot_bump_relative", self.spot_bump_relative),
            ("vol_bump", self.vol_bump),
            ("rate_bump", self.rate_bump),
            ("time_bump", self.time_bump),
        ];
        for (name, bump) in bumps {
            if !(bump > T::zero()) || !bump.is_finite() {
                return Err(PricingError::invalid_config(format!(
                    "{} must be positive and finite, got {}",
                    name, bump
                )));
            }
        }
        Ok(())
    }

    /// Absolute spot bump for a given spot price.
    #[inline]
    pub fn spot_bump(&self, spot: T) -> T {
        (self.spot_bump_relative * spot.abs()).max(T::lit(1e-8))
    }
}

/// Builder for [`GreeksConfig`].
#[derive(Debug)]
pub struct GreeksConfigBuilder<T> {
    config: GreeksConfig<T>,
}

impl<T: Real> Default for GreeksConfigBuilder<T> {
    fn default() -> Self {
        Self {
            config: GreeksConfig::default(),
        }
    }
}

impl<T: Real> GreeksConfigBuilder<T> {
    /// Sets the relative spot bump (default: 1e-4).
    pub fn spot_bump_relative(mut self, bump: T) -> Self {
        self.config.spot_bump_relative = bump;
        self
    }

    /// Sets the absolute volatility bump (default: 1e-4).
    pub fn vol_bump(mut self, bump: T) -> Self {
        self.config.vol_bump = bump;
        self
    }

    /// Sets the absolute rate bump (default: 1e-4).
    pub fn rate_bump(mut self, bump: T) -> Self {
        self.config.rate_bump = bump;
        self
    }

    /// Sets the time bump in years (default: 1e-4).
    pub fn time_bump(mut self, bump: T) -> Self {
        self.config.time_bump = bump;
        self
    }

    /// Builds the configuration, validating all bumps.
    ///
    /// # Errors
    /// [`PricingError::InvalidConfig`] if any bump is invalid.
    pub fn build(self) -> Result<GreeksConfig<T>, PricingError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Option price sensitivities.
///
/// Theta follows the market convention ∂V/∂t = −∂V/∂τ, so a long vanilla
/// option usually has negative theta.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T> {
    /// ∂V/∂S
    pub delta: T,
    /// ∂²V/∂S²
    pub gamma: T,
    /// ∂V/∂σ
    pub vega: T,
    /// ∂V/∂r
    pub rho: T,
    /// ∂V/∂t
    pub theta: T,
}

/// Runs a numerical routine over a fallible pricing function.
///
/// The routine (a difference stencil, a root finder) sees a plain
/// `Fn(T) -> T` that yields NaN where pricing failed; the first pricing
/// error raised at any sample point is returned instead of the routine's
/// result.
pub(crate) fn with_pricing_errors<T, R, F, S>(price: F, routine: S) -> Result<R, PricingError>
where
    T: Real,
    F: Fn(T) -> Result<T, PricingError>,
    S: FnOnce(&dyn Fn(T) -> T) -> R,
{
    let failure: RefCell<Option<PricingError>> = RefCell::new(None);
    let sampled = |x: T| match price(x) {
        Ok(value) => value,
        Err(err) => {
            let mut slot = failure.borrow_mut();
            if slot.is_none() {
                *slot = Some(err);
            }
            T::nan()
        }
    };
    let value = routine(&sampled);
    match failure.into_inner() {
        Some(err) => Err(err),
        None => Ok(value),
    }
}
