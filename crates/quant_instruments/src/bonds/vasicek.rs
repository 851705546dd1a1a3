//! Vasicek (1977) zero-coupon bond price.

use quant_math::traits::Real;

use super::{check_model_params, check_rate_and_tau, BondPricer};
use crate::error::PricingError;

/// Vasicek short-rate model dr = a(μ − r) dt + σ dW.
///
/// P(r, τ) = A(τ)·e^(−B(τ)·r) with
/// - B = (1 − e^(−aτ)) / a
/// - A = exp((μ − σ²/2a²)(B − τ) − σ²B²/4a)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vasicek<T> {
    /// Speed of mean reversion (a)
    pub mean_reversion: T,
    /// Long-term mean of the short rate (μ)
    pub long_term_mean: T,
    /// Short-rate volatility (σ)
    pub vol: T,
}

impl<T: Real> Vasicek<T> {
    /// Creates validated model parameters.
    ///
    /// # Errors
    /// [`PricingError::InvalidParameter`] unless `mean_reversion` and `vol`
    /// are positive and `long_term_mean` is finite.
    pub fn new(mean_reversion: T, long_term_mean: T, vol: T) -> Result<Self, PricingError> {
        check_model_params(mean_reversion, long_term_mean, vol)?;
        Ok(Self {
            mean_reversion,
            long_term_mean,
            vol,
        })
    }

    /// B(τ) = (1 − e^(−aτ)) / a.
    pub fn b_factor(&self, tau: T) -> T {
        -(-self.mean_reversion * tau).exp_m1() / self.mean_reversion
    }

    /// A(τ), the rate-independent part of the price.
    pub fn a_factor(&self, tau: T) -> T {
        let a = self.mean_reversion;
        let sigma_sq = self.vol * self.vol;
        let b = self.b_factor(tau);
        let level = self.long_term_mean - sigma_sq / (T::lit(2.0) * a * a);
        (level * (b - tau) - sigma_sq * b * b / (T::lit(4.0) * a)).exp()
    }
}

impl<T: Real> BondPricer<T> for Vasicek<T> {
    fn price(&self, rate: T, tau: T) -> Result<T, PricingError> {
        check_model_params(self.mean_reversion, self.long_term_mean, self.vol)?;
        check_rate_and_tau(rate, tau)?;
        Ok(self.a_factor(tau) * (-self.b_factor(tau) * rate).exp())
    }

    fn vol(&self) -> T {
        self.vol
    }

    fn with_vol(&self, vol: T) -> Result<Self, PricingError> {
        Self::new(self.mean_reversion, self.long_term_mean, vol)
    }
}
