//! Constant elasticity of variance pricer for 0 < α < 2.
//!
//! Under dS = rS dt + σ S^(α/2) dW, Schroder (1989) writes the call as two
//! series of gamma densities and survival functions. With b = 2 − α:
//!
//! - k = 2r / (σ² b (e^(rbτ) − 1))
//! - x = k S^b e^(rbτ), y = k K^b
//! - C = S Σᵢ g(i+1, x) Ḡ(i+1+1/b, y) − K e^(−rτ) Σᵢ g(i+1+1/b, x) Ḡ(i+1, y)
//!
//! where g and Ḡ are the unit-rate gamma density and survival function.
//! The series is truncated after `terms` terms without error; terms whose
//! densities have underflowed are skipped.

use quant_math::math::probability::{ContinuousDistribution, Gamma};
use quant_math::parallel::{partitioned_sum, ParallelConfig};
use quant_math::traits::Real;
use quant_math::types::MathError;

use super::state::{OptionKind, OptionState};
use super::{check_strike, EuropeanOptionPricer};
use crate::error::PricingError;

/// Default truncation of the gamma series.
pub const DEFAULT_CEV_TERMS: usize = 10_000;

const EXPIRY_EPSILON: f64 = 1e-10;

/// General CEV pricer; puts come from put–call parity.
///
/// The `vol` field of the state is σ in the local volatility σ S^(α/2 − 1),
/// so α = 2 would recover Black–Scholes.
///
/// # Examples
/// ```
/// use quant_instruments::european::{EuropeanOptionPricer, GeneralCev, OptionKind, OptionState};
///
/// let pricer = GeneralCev::new(100.0_f64, OptionKind::Call, 1.0).unwrap();
/// let state = OptionState::new(100.0, 1.0, 0.05, 2.0).unwrap();
/// assert!((pricer.price(&state).unwrap() - 10.453_885).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneralCev<T> {
    strike: T,
    kind: OptionKind,
    alpha: T,
    terms: usize,
    parallel: ParallelConfig,
}

impl<T: Real> GeneralCev<T> {
    /// Creates a pricer with [`DEFAULT_CEV_TERMS`] series terms.
    ///
    /// # Errors
    /// [`PricingError::InvalidParameter`] if the strike is not positive or
    /// α is outside (0, 2).
    pub fn new(strike: T, kind: OptionKind, alpha: T) -> Result<Self, PricingError> {
        Self::with_terms(strike, kind, alpha, DEFAULT_CEV_TERMS)
    }

    /// Creates a pricer with an explicit series truncation.
    ///
    /// # Errors
    /// As for [`GeneralCev::new`], plus [`PricingError::InvalidConfig`] if
    /// `terms` is zero.
    pub fn with_terms(
        strike: T,
        kind: OptionKind,
        alpha: T,
        terms: usize,
    ) -> Result<Self, PricingError> {
        check_strike(strike)?;
        if !(alpha > T::zero() && alpha < T::lit(2.0)) {
            return Err(PricingError::invalid_parameter(
                "alpha",
                alpha.as_f64(),
                "must lie strictly between 0 and 2",
            ));
        }
        if terms == 0 {
            return Err(PricingError::invalid_config("CEV series needs at least one term"));
        }
        Ok(Self {
            strike,
            kind,
            alpha,
            terms,
            parallel: ParallelConfig::default(),
        })
    }

    /// Replaces the parallel reduction settings.
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
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

    /// Returns the elasticity α.
    #[inline]
    pub fn alpha(&self) -> T {
        self.alpha
    }

    /// Returns the series truncation.
    #[inline]
    pub fn terms(&self) -> usize {
        self.terms
    }

    fn call_price(&self, state: &OptionState<T>) -> Result<T, PricingError> {
        let b = T::lit(2.0) - self.alpha;
        let growth = state.rate * b * state.tau;
        let sigma_sq = state.vol * state.vol;
        let k = if state.rate == T::zero() {
            T::lit(2.0) / (sigma_sq * b * b * state.tau)
        } else {
            T::lit(2.0) * state.rate / (sigma_sq * b * growth.exp_m1())
        };
        let x = k * state.spot.powf(b) * growth.exp();
        let y = k * self.strike.powf(b);
        let shift = b.recip();
        tracing::trace!(k = k.as_f64(), x = x.as_f64(), y = y.as_f64(), "CEV series arguments");

        let term = |i: usize| -> T {
            let shape = T::from_usize(i + 1);
            let shifted = shape + shift;
            let (asset_weight, strike_weight) =
                match (Gamma::new(shape, T::one()), Gamma::new(shifted, T::one())) {
                    (Ok(plain), Ok(lifted)) => (plain, lifted),
                    _ => return T::nan(),
                };
            let g_plain = asset_weight.pdf(x);
            let g_lifted = strike_weight.pdf(x);
            let mut value = T::zero();
            if g_plain > T::zero() {
                value = value + state.spot * g_plain * survival_or_nan(&strike_weight, y);
            }
            if g_lifted > T::zero() {
                value = value
                    - self.strike * state.discount_factor() * g_lifted * survival_or_nan(&asset_weight, y);
            }
            value
        };

        let call = partitioned_sum(0..self.terms, &self.parallel, term);
        if !call.is_finite() {
            return Err(MathError::domain(
                "general CEV series",
                format!("series did not produce a finite price (x = {}, y = {})", x, y),
            )
            .into());
        }
        Ok(call)
    }
}

fn survival_or_nan<T: Real>(dist: &Gamma<T>, at: T) -> T {
    dist.survival(at).unwrap_or_else(|_| T::nan())
}

impl<T: Real> EuropeanOptionPricer<T> for GeneralCev<T> {
    fn price(&self, state: &OptionState<T>) -> Result<T, PricingError> {
        state.validate()?;
        if state.tau <= T::lit(EXPIRY_EPSILON) {
            return Ok(self.kind.payoff(state.spot, self.strike));
        }
        let call = self.call_price(state)?;
        let discounted_strike = self.strike * state.discount_factor();
        Ok(self.kind.from_call(call, state.spot, discounted_strike))
    }
}
