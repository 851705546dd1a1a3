//! Option payoff type and market state.

use quant_math::traits::Real;

use crate::error::PricingError;

/// Call or put.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionKind {
    /// Right to buy at the strike.
    #[default]
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionKind {
    /// Returns `true` for [`OptionKind::Call`].
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, OptionKind::Call)
    }

    /// Payoff max(S − K, 0) or max(K − S, 0) at expiry.
    ///
    /// # Examples
    /// ```
    /// use quant_instruments::european::OptionKind;
    ///
    /// assert_eq!(OptionKind::Call.payoff(110.0_f64, 100.0), 10.0);
    /// assert_eq!(OptionKind::Put.payoff(110.0_f64, 100.0), 0.0);
    /// ```
    #[inline]
    pub fn payoff<T: Real>(self, spot: T, strike: T) -> T {
        let intrinsic = match self {
            OptionKind::Call => spot - strike,
            OptionKind::Put => strike - spot,
        };
        intrinsic.max(T::zero())
    }

    /// Converts a call price into the price of this kind by put–call parity.
    ///
    /// P = C − S + K·e^(−rτ); a call is returned unchanged.
    #[inline]
    pub(crate) fn from_call<T: Real>(self, call: T, spot: T, discounted_strike: T) -> T {
        match self {
            OptionKind::Call => call,
            OptionKind::Put => call - spot + discounted_strike,
        }
    }
}

/// Market state at which a European option is priced.
///
/// Fields are public so that Greeks can bump one input at a time; pricers
/// call [`OptionState::validate`] on entry.
///
/// # Examples
/// ```
/// use quant_instruments::european::OptionState;
///
/// let state = OptionState::new(105.0_f64, 1.5, 0.04, 0.2).unwrap();
/// assert_eq!(state.with_spot(110.0).spot, 110.0);
/// assert!(OptionState::new(105.0_f64, -1.0, 0.04, 0.2).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionState<T> {
    /// Price of the underlying (S)
    pub spot: T,
    /// Time to maturity in years (τ)
    pub tau: T,
    /// Continuously compounded risk-free rate (r)
    pub rate: T,
    /// Volatility parameter of the pricing model (σ)
    pub vol: T,
}

impl<T: Real> OptionState<T> {
    /// Creates a validated state.
    ///
    /// # Errors
    /// See [`OptionState::validate`].
    pub fn new(spot: T, tau: T, rate: T, vol: T) -> Result<Self, PricingError> {
        let state = Self {
            spot,
            tau,
            rate,
            vol,
        };
        state.validate()?;
        Ok(state)
    }

    /// Checks that spot and volatility are positive, τ is non-negative and
    /// the rate is finite.
    ///
    /// # Errors
    /// [`PricingError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.spot > T::zero()) || !self.spot.is_finite() {
            return Err(PricingError::invalid_parameter(
                "spot",
                self.spot.as_f64(),
                "must be positive and finite",
            ));
        }
        if !(self.tau >= T::zero()) || !self.tau.is_finite() {
            return Err(PricingError::invalid_parameter(
                "tau",
                self.tau.as_f64(),
                "must be non-negative and finite",
            ));
        }
        if !self.rate.is_finite() {
            return Err(PricingError::invalid_parameter(
                "rate",
                self.rate.as_f64(),
                "must be finite",
            ));
        }
        if !(self.vol > T::zero()) || !self.vol.is_finite() {
            return Err(PricingError::invalid_parameter(
                "vol",
                self.vol.as_f64(),
                "must be positive and finite",
            ));
        }
        Ok(())
    }

    /// Copy with a different spot.
    #[inline]
    pub fn with_spot(&self, spot: T) -> Self {
        Self { spot, ..*self }
    }

    /// Copy with a different time to maturity.
    #[inline]
    pub fn with_tau(&self, tau: T) -> Self {
        Self { tau, ..*self }
    }

    /// Copy with a different rate.
    #[inline]
    pub fn with_rate(&self, rate: T) -> Self {
        Self { rate, ..*self }
    }

    /// Copy with a different volatility.
    #[inline]
    pub fn with_vol(&self, vol: T) -> Self {
        Self { vol, ..*self }
    }

    /// Discount factor e^(−rτ).
    #[inline]
    pub fn discount_factor(&self) -> T {
        (-self.rate * self.tau).exp()
    }
}
