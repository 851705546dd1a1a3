//! Black–Scholes pricer for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) − K·e^(−rτ)·N(d₂)
//! **Put Price**: P = K·e^(−rτ)·N(−d₂) − S·N(−d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)τ) / (σ√τ)
//! - d₂ = d₁ − σ√τ

use quant_math::math::probability::{ContinuousDistribution, Normal};
use quant_math::traits::Real;

use super::state::{OptionKind, OptionState};
use super::{check_strike, EuropeanOptionPricer};
use crate::error::PricingError;
use crate::greeks::Greeks;

/// Maturities at or below this are priced at intrinsic value.
const EXPIRY_EPSILON: f64 = 1e-10;

/// Black–Scholes model for a single European contract.
///
/// # Examples
/// ```
/// use quant_instruments::european::{BlackScholes, EuropeanOptionPricer, OptionKind, OptionState};
///
/// let call = BlackScholes::new(100.0_f64, OptionKind::Call).unwrap();
/// let put = BlackScholes::new(100.0_f64, OptionKind::Put).unwrap();
/// let state = OptionState::new(100.0, 1.0, 0.05, 0.2).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call.price(&state).unwrap() - put.price(&state).unwrap()
///     - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlackScholes<T> {
    strike: T,
    kind: OptionKind,
}

impl<T: Real> BlackScholes<T> {
    /// Creates a new Black–Scholes pricer.
    ///
    /// # Errors
    /// [`PricingError::InvalidParameter`] if the strike is not positive.
    pub fn new(strike: T, kind: OptionKind) -> Result<Self, PricingError> {
        check_strike(strike)?;
        Ok(Self { strike, kind })
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns call or put.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Computes the d1 term.
    ///
    /// Returns ±100 (or zero at the money) once τ has collapsed, so that
    /// N(d₁) degenerates to the exercise indicator.
    pub fn d1(&self, state: &OptionState<T>) -> T {
        if state.tau <= T::lit(EXPIRY_EPSILON) {
            let large = T::lit(100.0);
            return if state.spot > self.strike {
                large
            } else if state.spot < self.strike {
                -large
            } else {
                T::zero()
            };
        }

        let vol_sqrt_t = state.vol * state.tau.sqrt();
        let log_moneyness = (state.spot / self.strike).ln();
        let drift = (state.rate + T::lit(0.5) * state.vol * state.vol) * state.tau;
        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term, d₁ − σ√τ.
    pub fn d2(&self, state: &OptionState<T>) -> T {
        if state.tau <= T::lit(EXPIRY_EPSILON) {
            return self.d1(state);
        }
        self.d1(state) - state.vol * state.tau.sqrt()
    }

    /// Closed-form Greeks.
    ///
    /// Theta is ∂V/∂t, the negative of the sensitivity to τ. All Greeks
    /// except delta vanish at expiry.
    ///
    /// # Errors
    /// [`PricingError::InvalidParameter`] for an invalid state.
    pub fn analytic_greeks(&self, state: &OptionState<T>) -> Result<Greeks<T>, PricingError>
    where
        T: Default,
    {
        state.validate()?;
        let n = Normal::standard();
        let is_call = self.kind.is_call();

        if state.tau <= T::lit(EXPIRY_EPSILON) {
            let delta = match self.kind {
                OptionKind::Call if state.spot > self.strike => T::one(),
                OptionKind::Put if state.spot < self.strike => -T::one(),
                _ => T::zero(),
            };
            return Ok(Greeks {
                delta,
                ..Greeks::default()
            });
        }

        let d1 = self.d1(state);
        let d2 = self.d2(state);
        let sqrt_t = state.tau.sqrt();
        let pdf_d1 = n.pdf(d1);
        let discounted_strike = self.strike * state.discount_factor();

        let n_d1 = n.cdf(d1)?;
        let n_d2 = n.cdf(d2)?;
        let n_minus_d2 = n.cdf(-d2)?;

        let delta = if is_call { n_d1 } else { n_d1 - T::one() };
        let gamma = pdf_d1 / (state.spot * state.vol * sqrt_t);
        let vega = state.spot * sqrt_t * pdf_d1;

        let decay = -(state.spot * state.vol * pdf_d1) / (T::lit(2.0) * sqrt_t);
        let (theta, rho) = if is_call {
            (
                decay - state.rate * discounted_strike * n_d2,
                state.tau * discounted_strike * n_d2,
            )
        } else {
            (
                decay + state.rate * discounted_strike * n_minus_d2,
                -state.tau * discounted_strike * n_minus_d2,
            )
        };

        Ok(Greeks {
            delta,
            gamma,
            vega,
            rho,
            theta,
        })
    }
}

impl<T: Real> EuropeanOptionPricer<T> for BlackScholes<T> {
    fn price(&self, state: &OptionState<T>) -> Result<T, PricingError> {
        state.validate()?;

        if state.tau <= T::lit(EXPIRY_EPSILON) {
            return Ok(self.kind.payoff(state.spot, self.strike));
        }

        let n = Normal::standard();
        let d1 = self.d1(state);
        let d2 = self.d2(state);
        let discounted_strike = self.strike * state.discount_factor();

        let value = match self.kind {
            OptionKind::Call => state.spot * n.cdf(d1)? - discounted_strike * n.cdf(d2)?,
            OptionKind::Put => discounted_strike * n.cdf(-d2)? - state.spot * n.cdf(-d1)?,
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greeks::GreeksConfig;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    fn reference_call() -> (BlackScholes<f64>, OptionState<f64>) {
        (
            BlackScholes::new(120.0, OptionKind::Call).unwrap(),
            OptionState::new(105.0, 1.5, 0.04, 0.2).unwrap(),
        )
    }

    fn reference_put() -> (BlackScholes<f64>, OptionState<f64>) {
        (
            BlackScholes::new(115.0, OptionKind::Put).unwrap(),
            OptionState::new(120.0, 1.5, 0.05, 0.15).unwrap(),
        )
    }

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_new_rejects_invalid_strike() {
        assert!(BlackScholes::new(0.0_f64, OptionKind::Call).is_err());
        assert!(BlackScholes::new(f64::INFINITY, OptionKind::Put).is_err());
        let bs = BlackScholes::new(100.0_f64, OptionKind::Put).unwrap();
        assert_eq!(bs.strike(), 100.0);
        assert_eq!(bs.kind(), OptionKind::Put);
    }

    // ========================================
    // Pricing Tests
    // ========================================

    #[test]
    fn test_call_reference_price() {
        let (bs, state) = reference_call();
        assert_abs_diff_eq!(bs.price(&state).unwrap(), 7.092_223_005, epsilon = 1e-5);
    }

    #[test]
    fn test_put_reference_price() {
        let (bs, state) = reference_put();
        assert_abs_diff_eq!(bs.price(&state).unwrap(), 3.276_518_67, epsilon = 1e-5);
    }

    #[test]
    fn test_intrinsic_at_expiry() {
        let call = BlackScholes::new(100.0_f64, OptionKind::Call).unwrap();
        let put = BlackScholes::new(100.0_f64, OptionKind::Put).unwrap();
        let state = OptionState::new(110.0, 0.0, 0.05, 0.2).unwrap();
        assert_eq!(call.price(&state).unwrap(), 10.0);
        assert_eq!(put.price(&state).unwrap(), 0.0);
    }

    #[test]
    fn test_deep_itm_call_approaches_forward_intrinsic() {
        let bs = BlackScholes::new(50.0_f64, OptionKind::Call).unwrap();
        let state = OptionState::new(150.0, 1.0, 0.05, 0.2).unwrap();
        let expected = 150.0 - 50.0 * (-0.05_f64).exp();
        assert_relative_eq!(bs.price(&state).unwrap(), expected, max_relative = 1e-6);
    }

    #[test]
    fn test_d1_limits_at_expiry() {
        let bs = BlackScholes::new(100.0_f64, OptionKind::Call).unwrap();
        let state = OptionState::new(100.0, 0.0, 0.05, 0.2).unwrap();
        assert_eq!(bs.d1(&state), 0.0);
        assert_eq!(bs.d1(&state.with_spot(101.0)), 100.0);
        assert_eq!(bs.d2(&state.with_spot(99.0)), -100.0);
    }

    #[test]
    fn test_price_rejects_invalid_state() {
        let (bs, state) = reference_call();
        let bad = OptionState { vol: -0.2, ..state };
        match bs.price(&bad).unwrap_err() {
            PricingError::InvalidParameter { name, .. } => assert_eq!(name, "vol"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_f32_pricing() {
        let bs = BlackScholes::new(120.0_f32, OptionKind::Call).unwrap();
        let state = OptionState::new(105.0_f32, 1.5, 0.04, 0.2).unwrap();
        assert!((bs.price(&state).unwrap() - 7.092_223).abs() < 1e-3);
    }

    // ========================================
    // Greeks Tests
    // ========================================

    #[test]
    fn test_call_reference_greeks() {
        let (bs, state) = reference_call();
        let g = bs.analytic_greeks(&state).unwrap();
        assert_abs_diff_eq!(g.delta, 0.429_472_94, epsilon = 1e-6);
        assert_abs_diff_eq!(g.gamma, 0.015_268_17, epsilon = 1e-7);
        assert_abs_diff_eq!(g.vega, 50.499_470_6, epsilon = 1e-5);
        assert_abs_diff_eq!(g.rho, 57.003_654_2, epsilon = 1e-4);
        assert_abs_diff_eq!(g.theta, -4.886_728_82, epsilon = 1e-5);
    }

    #[test]
    fn test_put_reference_greeks() {
        let (bs, state) = reference_put();
        let g = bs.analytic_greeks(&state).unwrap();
        assert_abs_diff_eq!(g.delta, -0.232_154_68, epsilon = 1e-6);
        assert_abs_diff_eq!(g.gamma, 0.013_845_62, epsilon = 1e-7);
        assert_abs_diff_eq!(g.vega, 44.859_822_4, epsilon = 1e-5);
        assert_abs_diff_eq!(g.rho, -46.702_620_2, epsilon = 1e-4);
        assert_abs_diff_eq!(g.theta, -0.686_237_11, epsilon = 1e-5);
    }

    #[test]
    fn test_fd_put_greeks_match_reference() {
        let (bs, state) = reference_put();
        let g = bs.greeks(&state, &GreeksConfig::default()).unwrap();
        assert_abs_diff_eq!(g.delta, -0.232_154_68, epsilon = 1e-5);
        assert_abs_diff_eq!(g.gamma, 0.013_845_62, epsilon = 1e-5);
        assert_abs_diff_eq!(g.vega, 44.859_822_4, epsilon = 1e-3);
        assert_abs_diff_eq!(g.rho, -46.702_620_2, epsilon = 1e-3);
        assert_abs_diff_eq!(g.theta, -0.686_237_11, epsilon = 1e-3);
    }

    #[test]
    fn test_greeks_at_expiry() {
        let call = BlackScholes::new(100.0_f64, OptionKind::Call).unwrap();
        let put = BlackScholes::new(100.0_f64, OptionKind::Put).unwrap();
        let state = OptionState::new(90.0, 0.0, 0.05, 0.2).unwrap();
        assert_eq!(call.analytic_greeks(&state).unwrap().delta, 0.0);
        assert_eq!(put.analytic_greeks(&state).unwrap().delta, -1.0);
        assert_eq!(put.analytic_greeks(&state).unwrap().gamma, 0.0);
    }

    // ========================================
    // Property-based Tests
    // ========================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_put_call_parity(
            spot in 50.0_f64..150.0,
            strike in 50.0_f64..150.0,
            tau in 0.05_f64..3.0,
            rate in -0.02_f64..0.1,
            vol in 0.05_f64..0.6,
        ) {
            let state = OptionState::new(spot, tau, rate, vol).unwrap();
            let call = BlackScholes::new(strike, OptionKind::Call).unwrap().price(&state).unwrap();
            let put = BlackScholes::new(strike, OptionKind::Put).unwrap().price(&state).unwrap();
            let parity = call - put - (spot - strike * (-rate * tau).exp());
            prop_assert!(parity.abs() < 1e-4);
        }

        #[test]
        fn prop_call_bounds(
            spot in 50.0_f64..150.0,
            strike in 50.0_f64..150.0,
            tau in 0.05_f64..3.0,
            vol in 0.05_f64..0.6,
        ) {
            let state = OptionState::new(spot, tau, 0.03, vol).unwrap();
            let call = BlackScholes::new(strike, OptionKind::Call).unwrap().price(&state).unwrap();
            let lower = (spot - strike * (-0.03 * tau).exp()).max(0.0);
            prop_assert!(call >= lower - 1e-4);
            prop_assert!(call <= spot + 1e-4);
        }
    }
}
