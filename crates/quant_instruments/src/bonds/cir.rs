//! Cox–Ingersoll–Ross (1985) zero-coupon bond price.

use quant_math::traits::Real;

use super::{check_model_params, check_rate_and_tau, BondPricer};
use crate::error::PricingError;

/// CIR short-rate model dr = a(μ − r) dt + σ√r dW.
///
/// With h = √(a² + 2σ²) and D = 2h + (a + h)(e^(hτ) − 1):
/// - A = [2h·e^((a+h)τ/2) / D]^(2aμ/σ²)
/// - B = 2(e^(hτ) − 1) / D
///
/// # Examples
/// ```
/// use quant_instruments::bonds::{BondPricer, Cir};
///
/// let model = Cir::new(0.5_f64, 0.05, 0.1).unwrap();
/// assert!((model.price(0.03, 5.0).unwrap() - 0.809_404_6).abs() < 1e-7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cir<T> {
    /// Speed of mean reversion (a)
    pub mean_reversion: T,
    /// Long-term mean of the short rate (μ)
    pub long_term_mean: T,
    /// Short-rate volatility (σ)
    pub vol: T,
}

impl<T: Real> Cir<T> {
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

    /// h = √(a² + 2σ²).
    #[inline]
    pub fn h(&self) -> T {
        (self.mean_reversion * self.mean_reversion + T::lit(2.0) * self.vol * self.vol).sqrt()
    }

    fn denominator(&self, tau: T) -> T {
        let h = self.h();
        T::lit(2.0) * h + (self.mean_reversion + h) * (h * tau).exp_m1()
    }

    /// B(τ) = 2(e^(hτ) − 1) / D.
    pub fn b_factor(&self, tau: T) -> T {
        T::lit(2.0) * (self.h() * tau).exp_m1() / self.denominator(tau)
    }

    /// A(τ) = [2h·e^((a+h)τ/2) / D]^(2aμ/σ²).
    pub fn a_factor(&self, tau: T) -> T {
        let h = self.h();
        let a = self.mean_reversion;
        let base = T::lit(2.0) * h * ((a + h) * tau * T::lit(0.5)).exp() / self.denominator(tau);
        let exponent = T::lit(2.0) * a * self.long_term_mean / (self.vol * self.vol);
        base.powf(exponent)
    }

    /// Degrees of freedom 4aμ/σ² of the noncentral chi-squared law of r.
    pub fn dof(&self) -> T {
        T::lit(4.0) * self.mean_reversion * self.long_term_mean / (self.vol * self.vol)
    }

    /// Whether 2aμ ≥ σ², so that the short rate stays strictly positive.
    pub fn satisfies_feller(&self) -> bool {
        T::lit(2.0) * self.mean_reversion * self.long_term_mean >= self.vol * self.vol
    }
}

impl<T: Real> BondPricer<T> for Cir<T> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonds::Vasicek;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_prices() {
        let model = Cir::new(0.5_f64, 0.05, 0.1).unwrap();
        assert_abs_diff_eq!(model.price(0.03, 5.0).unwrap(), 0.809_404_590_9, epsilon = 1e-9);
        let model = Cir::new(0.3_f64, 0.04, 0.05).unwrap();
        assert_abs_diff_eq!(model.price(0.05, 10.0).unwrap(), 0.651_528_099_3, epsilon = 1e-9);
    }

    #[test]
    fn test_factors_at_zero_maturity() {
        let model = Cir::new(0.5_f64, 0.05, 0.1).unwrap();
        assert_eq!(model.b_factor(0.0), 0.0);
        assert_abs_diff_eq!(model.a_factor(0.0), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(model.price(0.03, 0.0).unwrap(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_small_vol_matches_vasicek_deterministic_limit() {
        let cir = Cir::new(0.5_f64, 0.05, 1e-4).unwrap();
        let vasicek = Vasicek::new(0.5_f64, 0.05, 1e-4).unwrap();
        assert_abs_diff_eq!(
            cir.price(0.03, 5.0).unwrap(),
            vasicek.price(0.03, 5.0).unwrap(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_feller_condition() {
        assert!(Cir::new(0.5_f64, 0.05, 0.1).unwrap().satisfies_feller());
        assert!(!Cir::new(0.1_f64, 0.01, 0.2).unwrap().satisfies_feller());
        assert_abs_diff_eq!(Cir::new(0.5_f64, 0.05, 0.1).unwrap().dof(), 10.0, epsilon = 1e-12);
    }
}
