//! European option pricers.
//!
//! ## Models
//!
//! | Pricer | Dynamics | Method |
//! |--------|----------|--------|
//! | [`BlackScholes`] | dS = rS dt + σS dW | closed form |
//! | [`AbsoluteCev`] | dS = rS dt + σ dW | closed form (Cox–Ross) |
//! | [`GeneralCev`] | dS = rS dt + σS^(α/2) dW | gamma-series (Schroder) |
//! | [`MonteCarloPricer`] | geometric Brownian motion | path simulation |
//!
//! Every pricer implements [`EuropeanOptionPricer`]. Its provided methods
//! compute Greeks by bump-and-revalue with central differences and invert
//! a market price to an implied volatility by bisection, so a new model
//! only has to supply `price`.
//!
//! [`EuropeanPricer`] is the closed sum of the models above for call sites
//! that select a model at run time.
//!
//! ## Examples
//!
//! ```
//! use quant_instruments::european::{
//!     BlackScholes, EuropeanOptionPricer, EuropeanPricer, OptionKind, OptionState,
//! };
//! use quant_instruments::greeks::GreeksConfig;
//!
//! let pricer = EuropeanPricer::BlackScholes(BlackScholes::new(120.0_f64, OptionKind::Call).unwrap());
//! let state = OptionState::new(105.0, 1.5, 0.04, 0.2).unwrap();
//!
//! let price = pricer.price(&state).unwrap();
//! assert!((price - 7.092_223).abs() < 1e-5);
//!
//! let delta = pricer.delta(&state, &GreeksConfig::default()).unwrap();
//! assert!((delta - 0.429_473).abs() < 1e-5);
//!
//! let vol = pricer.implied_vol(price, &state).unwrap();
//! assert!((vol - 0.2).abs() < 1e-5);
//! ```

mod absolute_cev;
mod black_scholes;
mod general_cev;
mod monte_carlo;
mod state;

pub use absolute_cev::AbsoluteCev;
pub use black_scholes::BlackScholes;
pub use general_cev::{GeneralCev, DEFAULT_CEV_TERMS};
pub use monte_carlo::{MonteCarloConfig, MonteCarloConfigBuilder, MonteCarloPricer};
pub use state::{OptionKind, OptionState};

use quant_math::math::differentiation::{first_central, first_forward, second_central};
use quant_math::math::optimization::BisectionSolver;
use quant_math::traits::Real;
use quant_math::types::MathError;

use crate::error::PricingError;
use crate::greeks::{with_pricing_errors, Greeks, GreeksConfig};

/// Default search interval for implied volatility.
pub const DEFAULT_IMPLIED_VOL_BOUNDS: (f64, f64) = (1e-6, 10.0);

/// Capability shared by all European option pricers.
///
/// Only [`price`](EuropeanOptionPricer::price) is required. The provided
/// Greeks bump a single field of the [`OptionState`] and revalue:
///
/// - delta, vega, rho: central first difference over spot, vol, rate
/// - gamma: central second difference over spot
/// - theta: −∂V/∂τ by central difference, or forward difference when τ is
///   smaller than half the time bump
pub trait EuropeanOptionPricer<T: Real> {
    /// Prices the option at `state`.
    ///
    /// # Errors
    /// [`PricingError`] if the state or the model inputs are invalid.
    fn price(&self, state: &OptionState<T>) -> Result<T, PricingError>;

    /// ∂V/∂S by bump-and-revalue.
    ///
    /// # Errors
    /// Propagates the first error from [`price`](EuropeanOptionPricer::price)
    /// or from an invalid `config`.
    fn delta(&self, state: &OptionState<T>, config: &GreeksConfig<T>) -> Result<T, PricingError> {
        config.validate()?;
        let h = config.spot_bump(state.spot);
        with_pricing_errors(
            |spot| self.price(&state.with_spot(spot)),
            |f| first_central(f, state.spot, h),
        )
    }

    /// ∂²V/∂S² by bump-and-revalue.
    ///
    /// # Errors
    /// As for [`delta`](EuropeanOptionPricer::delta).
    fn gamma(&self, state: &OptionState<T>, config: &GreeksConfig<T>) -> Result<T, PricingError> {
        config.validate()?;
        let h = config.spot_bump(state.spot);
        with_pricing_errors(
            |spot| self.price(&state.with_spot(spot)),
            |f| second_central(f, state.spot, h),
        )
    }

    /// ∂V/∂σ by bump-and-revalue.
    ///
    /// # Errors
    /// As for [`delta`](EuropeanOptionPricer::delta).
    fn vega(&self, state: &OptionState<T>, config: &GreeksConfig<T>) -> Result<T, PricingError> {
        config.validate()?;
        with_pricing_errors(
            |vol| self.price(&state.with_vol(vol)),
            |f| first_central(f, state.vol, config.vol_bump),
        )
    }

    /// ∂V/∂r by bump-and-revalue.
    ///
    /// # Errors
    /// As for [`delta`](EuropeanOptionPricer::delta).
    fn rho(&self, state: &OptionState<T>, config: &GreeksConfig<T>) -> Result<T, PricingError> {
        config.validate()?;
        with_pricing_errors(
            |rate| self.price(&state.with_rate(rate)),
            |f| first_central(f, state.rate, config.rate_bump),
        )
    }

    /// ∂V/∂t = −∂V/∂τ by bump-and-revalue.
    ///
    /// # Errors
    /// As for [`delta`](EuropeanOptionPricer::delta).
    fn theta(&self, state: &OptionState<T>, config: &GreeksConfig<T>) -> Result<T, PricingError> {
        config.validate()?;
        let h = config.time_bump;
        let d_dtau = with_pricing_errors(
            |tau| self.price(&state.with_tau(tau)),
            |f| {
                if state.tau < T::lit(0.5) * h {
                    first_forward(f, state.tau, h)
                } else {
                    first_central(f, state.tau, h)
                }
            },
        )?;
        Ok(-d_dtau)
    }

    /// All five sensitivities at once.
    ///
    /// # Errors
    /// As for [`delta`](EuropeanOptionPricer::delta).
    fn greeks(
        &self,
        state: &OptionState<T>,
        config: &GreeksConfig<T>,
    ) -> Result<Greeks<T>, PricingError> {
        Ok(Greeks {
            delta: self.delta(state, config)?,
            gamma: self.gamma(state, config)?,
            vega: self.vega(state, config)?,
            rho: self.rho(state, config)?,
            theta: self.theta(state, config)?,
        })
    }

    /// Volatility at which the model reproduces `market_price`, searched in
    /// [`DEFAULT_IMPLIED_VOL_BOUNDS`].
    ///
    /// # Errors
    /// See [`implied_vol_within`](EuropeanOptionPricer::implied_vol_within).
    fn implied_vol(&self, market_price: T, state: &OptionState<T>) -> Result<T, PricingError> {
        let (lower, upper) = DEFAULT_IMPLIED_VOL_BOUNDS;
        self.implied_vol_within(market_price, state, T::lit(lower), T::lit(upper))
    }

    /// Volatility in [lower, upper] at which the model reproduces
    /// `market_price`.
    ///
    /// The target price(σ) − market price is increasing in σ for every
    /// model here, which is what the bisection solver requires. The `vol`
    /// field of `state` is ignored.
    ///
    /// # Errors
    /// - [`PricingError::InvalidParameter`] if `market_price` is not positive
    /// - [`PricingError::Math`] if the bracket does not straddle the market
    ///   price or the solver does not converge
    fn implied_vol_within(
        &self,
        market_price: T,
        state: &OptionState<T>,
        lower: T,
        upper: T,
    ) -> Result<T, PricingError> {
        if !(market_price > T::zero()) || !market_price.is_finite() {
            return Err(PricingError::invalid_parameter(
                "market_price",
                market_price.as_f64(),
                "must be positive and finite",
            ));
        }
        let price_lo = self.price(&state.with_vol(lower))?;
        let price_hi = self.price(&state.with_vol(upper))?;
        if !(price_lo <= market_price && market_price <= price_hi) {
            return Err(MathError::domain(
                "implied volatility",
                format!(
                    "market price {} outside the model range [{}, {}] for vol in [{}, {}]",
                    market_price, price_lo, price_hi, lower, upper
                ),
            )
            .into());
        }

        let solver = BisectionSolver::with_defaults();
        let vol = with_pricing_errors(
            |vol| Ok(self.price(&state.with_vol(vol))? - market_price),
            |target| solver.find_root(target, lower, upper),
        )??;
        tracing::debug!(vol = vol.as_f64(), "implied volatility found");
        Ok(vol)
    }
}

/// Closed set of European option pricers.
///
/// Dispatches [`EuropeanOptionPricer::price`] to the wrapped model; the
/// Greeks and implied volatility come from the trait's provided methods.
#[derive(Debug, Clone)]
pub enum EuropeanPricer<T: Real> {
    /// Lognormal closed form.
    BlackScholes(BlackScholes<T>),
    /// Absolute diffusion closed form.
    AbsoluteCev(AbsoluteCev<T>),
    /// Constant elasticity of variance series.
    GeneralCev(GeneralCev<T>),
    /// Geometric Brownian motion simulation.
    MonteCarlo(MonteCarloPricer<T>),
}

impl<T: Real> EuropeanPricer<T> {
    /// Strike of the wrapped pricer.
    pub fn strike(&self) -> T {
        match self {
            EuropeanPricer::BlackScholes(p) => p.strike(),
            EuropeanPricer::AbsoluteCev(p) => p.strike(),
            EuropeanPricer::GeneralCev(p) => p.strike(),
            EuropeanPricer::MonteCarlo(p) => p.strike(),
        }
    }

    /// Call or put.
    pub fn kind(&self) -> OptionKind {
        match self {
            EuropeanPricer::BlackScholes(p) => p.kind(),
            EuropeanPricer::AbsoluteCev(p) => p.kind(),
            EuropeanPricer::GeneralCev(p) => p.kind(),
            EuropeanPricer::MonteCarlo(p) => p.kind(),
        }
    }
}

impl<T> EuropeanOptionPricer<T> for EuropeanPricer<T>
where
    T: Real,
    rand_distr::StandardNormal: rand_distr::Distribution<T>,
{
    fn price(&self, state: &OptionState<T>) -> Result<T, PricingError> {
        match self {
            EuropeanPricer::BlackScholes(p) => p.price(state),
            EuropeanPricer::AbsoluteCev(p) => p.price(state),
            EuropeanPricer::GeneralCev(p) => p.price(state),
            EuropeanPricer::MonteCarlo(p) => p.price(state),
        }
    }
}

/// Validates a strike at construction.
pub(crate) fn check_strike<T: Real>(strike: T) -> Result<(), PricingError> {
    if !(strike > T::zero()) || !strike.is_finite() {
        return Err(PricingError::invalid_parameter(
            "strike",
            strike.as_f64(),
            "must be positive and finite",
        ));
    }
    Ok(())
}
