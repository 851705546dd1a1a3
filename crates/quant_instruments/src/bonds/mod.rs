//! Zero-coupon bond pricers under one-factor short-rate models.
//!
//! Both models have affine bond prices P(r, τ) = A(τ)·e^(−B(τ)·r):
//!
//! | Model | Short-rate dynamics |
//! |-------|---------------------|
//! | [`Vasicek`] | dr = a(μ − r) dt + σ dW |
//! | [`Cir`] | dr = a(μ − r) dt + σ√r dW |
//!
//! [`BondPricer`] supplies bump-and-revalue sensitivities on top of
//! `price`; [`ZeroCouponBondPricer`] is the closed sum of the two models.
//!
//! ## Examples
//!
//! ```
//! use quant_instruments::bonds::{BondPricer, Vasicek, ZeroCouponBondPricer};
//!
//! let pricer = ZeroCouponBondPricer::Vasicek(Vasicek::new(0.5_f64, 0.05, 0.02).unwrap());
//! let price = pricer.price(0.03, 5.0).unwrap();
//! assert!((price - 0.809_429).abs() < 1e-6);
//! ```

mod cir;
mod vasicek;

pub use cir::Cir;
pub use vasicek::Vasicek;

use quant_math::math::differentiation::{first_central, first_forward, second_central};
use quant_math::traits::Real;

use crate::error::PricingError;
use crate::greeks::{with_pricing_errors, GreeksConfig};

/// Capability shared by the zero-coupon bond pricers.
///
/// Sensitivities bump one input and revalue:
/// - delta, gamma: first and second central difference over the short rate
/// - vega: central difference over the model volatility
/// - theta: −∂P/∂τ, forward difference when τ is below half the time bump
pub trait BondPricer<T: Real>: Sized {
    /// Price of a unit zero-coupon bond maturing in `tau` years when the
    /// short rate is `rate`.
    ///
    /// # Errors
    /// [`PricingError::InvalidParameter`] for a non-finite rate or negative
    /// `tau`.
    fn price(&self, rate: T, tau: T) -> Result<T, PricingError>;

    /// Volatility parameter σ of the model.
    fn vol(&self) -> T;

    /// Copy of the model with a different volatility.
    ///
    /// # Errors
    /// [`PricingError::InvalidParameter`] if `vol` is not positive.
    fn with_vol(&self, vol: T) -> Result<Self, PricingError>;

    /// ∂P/∂r.
    ///
    /// # Errors
    /// Propagates pricing errors and invalid `config`.
    fn delta(&self, rate: T, tau: T, config: &GreeksConfig<T>) -> Result<T, PricingError> {
        config.validate()?;
        with_pricing_errors(
            |r| self.price(r, tau),
            |f| first_central(f, rate, config.rate_bump),
        )
    }

    /// ∂²P/∂r².
    ///
    /// # Errors
    /// As for [`delta`](BondPricer::delta).
    fn gamma(&self, rate: T, tau: T, config: &GreeksConfig<T>) -> Result<T, PricingError> {
        config.validate()?;
        with_pricing_errors(
            |r| self.price(r, tau),
            |f| second_central(f, rate, config.rate_bump),
        )
    }

    /// ∂P/∂σ.
    ///
    /// # Errors
    /// As for [`delta`](BondPricer::delta).
    fn vega(&self, rate: T, tau: T, config: &GreeksConfig<T>) -> Result<T, PricingError> {
        config.validate()?;
        with_pricing_errors(
            |vol| self.with_vol(vol)?.price(rate, tau),
            |f| first_central(f, self.vol(), config.vol_bump),
        )
    }

    /// ∂P/∂t = −∂P/∂τ.
    ///
    /// # Errors
    /// As for [`delta`](BondPricer::delta).
    fn theta(&self, rate: T, tau: T, config: &GreeksConfig<T>) -> Result<T, PricingError> {
        config.validate()?;
        let h = config.time_bump;
        let d_dtau = with_pricing_errors(
            |t| self.price(rate, t),
            |f| {
                if tau < T::lit(0.5) * h {
                    first_forward(f, tau, h)
                } else {
                    first_central(f, tau, h)
                }
            },
        )?;
        Ok(-d_dtau)
    }
}

/// Closed set of zero-coupon bond pricers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZeroCouponBondPricer<T> {
    /// Gaussian short rate.
    Vasicek(Vasicek<T>),
    /// Square-root short rate.
    Cir(Cir<T>),
}

impl<T: Real> BondPricer<T> for ZeroCouponBondPricer<T> {
    fn price(&self, rate: T, tau: T) -> Result<T, PricingError> {
        match self {
            ZeroCouponBondPricer::Vasicek(model) => model.price(rate, tau),
            ZeroCouponBondPricer::Cir(model) => model.price(rate, tau),
        }
    }

    fn vol(&self) -> T {
        match self {
            ZeroCouponBondPricer::Vasicek(model) => model.vol(),
            ZeroCouponBondPricer::Cir(model) => model.vol(),
        }
    }

    fn with_vol(&self, vol: T) -> Result<Self, PricingError> {
        Ok(match self {
            ZeroCouponBondPricer::Vasicek(model) => ZeroCouponBondPricer::Vasicek(model.with_vol(vol)?),
            ZeroCouponBondPricer::Cir(model) => ZeroCouponBondPricer::Cir(model.with_vol(vol)?),
        })
    }
}

/// Validates the three short-rate model parameters.
pub(crate) fn check_model_params<T: Real>(
    mean_reversion: T,
    long_term_mean: T,
    vol: T,
) -> Result<(), PricingError> {
    if !(mean_reversion > T::zero()) || !mean_reversion.is_finite() {
        return Err(PricingError::invalid_parameter(
            "mean_reversion",
            mean_reversion.as_f64(),
            "must be positive and finite",
        ));
    }
    if !long_term_mean.is_finite() {
        return Err(PricingError::invalid_parameter(
            "long_term_mean",
            long_term_mean.as_f64(),
            "must be finite",
        ));
    }
    if !(vol > T::zero()) || !vol.is_finite() {
        return Err(PricingError::invalid_parameter(
            "vol",
            vol.as_f64(),
            "must be positive and finite",
        ));
    }
    Ok(())
}

/// Validates the short rate and time to maturity of a bond valuation.
pub(crate) fn check_rate_and_tau<T: Real>(rate: T, tau: T) -> Result<(), PricingError> {
    if !rate.is_finite() {
        return Err(PricingError::invalid_parameter(
            "rate",
            rate.as_f64(),
            "must be finite",
        ));
    }
    if !(tau >= T::zero()) || !tau.is_finite() {
        return Err(PricingError::invalid_parameter(
            "tau",
            tau.as_f64(),
            "must be non-negative and finite",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn vasicek() -> ZeroCouponBondPricer<f64> {
        ZeroCouponBondPricer::Vasicek(Vasicek::new(0.5, 0.05, 0.02).unwrap())
    }

    fn cir() -> ZeroCouponBondPricer<f64> {
        ZeroCouponBondPricer::Cir(Cir::new(0.5, 0.05, 0.1).unwrap())
    }

    #[test]
    fn test_enum_dispatch() {
        assert_abs_diff_eq!(vasicek().price(0.03, 5.0).unwrap(), 0.809_429_080_8, epsilon = 1e-9);
        assert_abs_diff_eq!(cir().price(0.03, 5.0).unwrap(), 0.809_404_590_9, epsilon = 1e-9);
        assert_eq!(vasicek().vol(), 0.02);
        assert_eq!(cir().with_vol(0.2).unwrap().vol(), 0.2);
    }

    #[test]
    fn test_delta_is_minus_b_times_price() {
        // ∂P/∂r = −B(τ)·P for an affine model
        let config = GreeksConfig::default();
        let model = Vasicek::new(0.5, 0.05, 0.02).unwrap();
        let b = (1.0 - (-0.5_f64 * 5.0).exp()) / 0.5;
        let price = model.price(0.03, 5.0).unwrap();
        assert_abs_diff_eq!(model.delta(0.03, 5.0, &config).unwrap(), -b * price, epsilon = 1e-8);
        assert_abs_diff_eq!(model.gamma(0.03, 5.0, &config).unwrap(), b * b * price, epsilon = 1e-4);
    }

    #[test]
    fn test_sensitivity_signs() {
        let config = GreeksConfig::default();
        for pricer in [vasicek(), cir()] {
            assert!(pricer.delta(0.03, 5.0, &config).unwrap() < 0.0);
            assert!(pricer.gamma(0.03, 5.0, &config).unwrap() > 0.0);
            // Higher volatility raises the bond price through convexity
            assert!(pricer.vega(0.03, 5.0, &config).unwrap() > 0.0);
            // A bond accretes toward par as time passes
            assert!(pricer.theta(0.03, 5.0, &config).unwrap() > 0.0);
        }
    }

    #[test]
    fn test_theta_at_maturity_uses_forward_difference() {
        let config = GreeksConfig::default();
        let theta = vasicek().theta(0.03, 0.0, &config).unwrap();
        // dP/dτ at τ = 0 is −r
        assert_abs_diff_eq!(theta, 0.03, epsilon = 1e-4);
    }

    #[test]
    fn test_vega_propagates_invalid_vol() {
        let config = GreeksConfig::builder().vol_bump(1.0).build().unwrap();
        let err = vasicek().vega(0.03, 5.0, &config).unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter { name: "vol", .. }));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(vasicek().price(f64::NAN, 1.0).is_err());
        assert!(vasicek().price(0.03, -1.0).is_err());
        assert!(Vasicek::new(0.0_f64, 0.05, 0.02).is_err());
        assert!(Cir::new(0.5_f64, f64::INFINITY, 0.1).is_err());
    }
}
