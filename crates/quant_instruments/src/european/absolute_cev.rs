//! Absolute diffusion (CEV with α = 0) pricer.
//!
//! Under dS = rS dt + σ dW the terminal spot is normal, so the call has the
//! closed form of Cox and Ross (1976):
//!
//! C = (S − Ke^(−rτ))·N(y₁) + (S + Ke^(−rτ))·N(y₂) + v·(n(y₁) − n(y₂))
//!
//! with v = σ√((1 − e^(−2rτ)) / 2r), y₁ = (S − Ke^(−rτ))/v and
//! y₂ = (−S − Ke^(−rτ))/v. The `vol` field of the state is the absolute
//! volatility σ, in price units.

use quant_math::math::probability::{ContinuousDistribution, Normal};
use quant_math::traits::Real;

use super::state::{OptionKind, OptionState};
use super::{check_strike, EuropeanOptionPricer};
use crate::error::PricingError;

const EXPIRY_EPSILON: f64 = 1e-10;

/// Absolute diffusion pricer; puts come from put–call parity.
///
/// # Examples
/// ```
/// use quant_instruments::european::{AbsoluteCev, EuropeanOptionPricer, OptionKind, OptionState};
///
/// let pricer = AbsoluteCev::new(20.0_f64, OptionKind::Call).unwrap();
/// // 20% relative volatility on a spot of 20
/// let state = OptionState::new(20.0, 4.0 / 12.0, 0.05, 0.2 * 20.0).unwrap();
/// assert!((pricer.price(&state).unwrap() - 1.088_479_5).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbsoluteCev<T> {
    strike: T,
    kind: OptionKind,
}

impl<T: Real> AbsoluteCev<T> {
    /// Creates a new absolute diffusion pricer.
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

    /// Standard deviation v of the discounted terminal spot.
    fn terminal_std(state: &OptionState<T>) -> T {
        let variance_time = if state.rate == T::zero() {
            state.tau
        } else {
            let two_r = T::lit(2.0) * state.rate;
            -(-two_r * state.tau).exp_m1() / two_r
        };
        state.vol * variance_time.sqrt()
    }
}

impl<T: Real> EuropeanOptionPricer<T> for AbsoluteCev<T> {
    fn price(&self, state: &OptionState<T>) -> Result<T, PricingError> {
        state.validate()?;
        if state.tau <= T::lit(EXPIRY_EPSILON) {
            return Ok(self.kind.payoff(state.spot, self.strike));
        }

        let n = Normal::standard();
        let discounted_strike = self.strike * state.discount_factor();
        let v = Self::terminal_std(state);
        let forward_gap = state.spot - discounted_strike;
        let y1 = forward_gap / v;
        let y2 = (-state.spot - discounted_strike) / v;

        let call = forward_gap * n.cdf(y1)?
            + (state.spot + discounted_strike) * n.cdf(y2)?
            + v * (n.pdf(y1) - n.pdf(y2));
        Ok(self.kind.from_call(call, state.spot, discounted_strike))
    }
}
