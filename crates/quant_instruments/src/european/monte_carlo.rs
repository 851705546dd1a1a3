//! Monte Carlo pricer under geometric Brownian motion.
//!
//! Trials are split into fixed-size chunks. Each chunk owns its generator
//! (seeded from the configured seed and the chunk index) and returns its
//! payoff sum by value; the sums are folded in chunk order once every
//! worker has finished. A seeded price is therefore reproducible for any
//! size of the rayon pool.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use rayon::prelude::*;

use quant_math::traits::Real;

use super::state::{OptionKind, OptionState};
use super::{check_strike, EuropeanOptionPricer};
use crate::error::PricingError;
use crate::process::GeometricBrownianMotion;

/// Maximum number of simulated trials.
pub const MAX_TRIALS: usize = 10_000_000;

/// Maximum number of time steps per trial.
pub const MAX_STEPS: usize = 10_000;

/// Trials simulated by one worker task.
const CHUNK_TRIALS: usize = 4_096;

/// Monte Carlo simulation configuration.
///
/// # Examples
/// ```rust
/// use quant_instruments::european::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_trials(10_000)
///     .n_steps(12)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.n_trials(), 10_000);
/// assert_eq!(config.n_steps(), 12);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    n_trials: usize,
    n_steps: usize,
    seed: Option<u64>,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulated trials.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Returns the number of time steps per trial.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the optional seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`PricingError::InvalidConfig`] if:
    /// - `n_trials` is 0 or greater than 10,000,000
    /// - `n_steps` is 0 or greater than 10,000
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.n_trials == 0 || self.n_trials > MAX_TRIALS {
            return Err(PricingError::invalid_config(format!(
                "n_trials must be in [1, {}], got {}",
                MAX_TRIALS, self.n_trials
            )));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(PricingError::invalid_config(format!(
                "n_steps must be in [1, {}], got {}",
                MAX_STEPS, self.n_steps
            )));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// `n_trials` is required; `n_steps` defaults to 1 since a European payoff
/// only needs the terminal value.
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_trials: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulated trials.
    #[inline]
    pub fn n_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = Some(n_trials);
        self
    }

    /// Sets the number of time steps per trial.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    /// [`PricingError::InvalidConfig`] if `n_trials` is not set or either
    /// count is out of range.
    pub fn build(self) -> Result<MonteCarloConfig, PricingError> {
        let n_trials = self
            .n_trials
            .ok_or_else(|| PricingError::invalid_config("n_trials must be specified"))?;
        let config = MonteCarloConfig {
            n_trials,
            n_steps: self.n_steps.unwrap_or(1),
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Monte Carlo pricer for a European option.
///
/// [`EuropeanOptionPricer::price`] simulates a flat geometric Brownian
/// motion built from the state's rate and volatility and the pricer's
/// dividend yield. [`MonteCarloPricer::price_with_process`] accepts any
/// process with term-structure coefficients.
///
/// # Examples
/// ```
/// use quant_instruments::european::{
///     EuropeanOptionPricer, MonteCarloConfig, MonteCarloPricer, OptionKind, OptionState,
/// };
///
/// let config = MonteCarloConfig::builder().n_trials(20_000).seed(1).build().unwrap();
/// let pricer = MonteCarloPricer::new(100.0_f64, OptionKind::Call, config).unwrap();
/// let state = OptionState::new(100.0, 1.0, 0.05, 0.2).unwrap();
/// let price = pricer.price(&state).unwrap();
/// assert!((price - 10.45).abs() < 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MonteCarloPricer<T> {
    strike: T,
    kind: OptionKind,
    dividend: T,
    config: MonteCarloConfig,
}

impl<T: Real> MonteCarloPricer<T> {
    /// Creates a pricer with zero dividend yield.
    ///
    /// # Errors
    /// [`PricingError`] if the strike is not positive or the configuration
    /// is invalid.
    pub fn new(strike: T, kind: OptionKind, config: MonteCarloConfig) -> Result<Self, PricingError> {
        check_strike(strike)?;
        config.validate()?;
        Ok(Self {
            strike,
            kind,
            dividend: T::zero(),
            config,
        })
    }

    /// Sets a continuous dividend yield.
    pub fn with_dividend(mut self, dividend: T) -> Self {
        self.dividend = dividend;
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

    /// Returns the simulation configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Discounted mean payoff over simulated paths of `process`.
    ///
    /// Discounting uses exp(−∫₀^τ r(u) du) over the process rate curve.
    ///
    /// # Errors
    /// [`PricingError`] for a non-positive spot or negative `tau`.
    pub fn price_with_process(
        &self,
        process: &GeometricBrownianMotion<T>,
        spot: T,
        tau: T,
    ) -> Result<T, PricingError>
    where
        StandardNormal: Distribution<T>,
    {
        let n_trials = self.config.n_trials;
        let n_steps = self.config.n_steps;
        let n_chunks = n_trials.div_ceil(CHUNK_TRIALS);

        let partials: Vec<T> = (0..n_chunks)
            .into_par_iter()
            .map(|chunk| {
                let mut rng = match self.config.seed {
                    Some(seed) => StdRng::seed_from_u64(chunk_seed(seed, chunk)),
                    None => StdRng::from_entropy(),
                };
                let start = chunk * CHUNK_TRIALS;
                let trials = CHUNK_TRIALS.min(n_trials - start);
                let mut sum = T::zero();
                for _ in 0..trials {
                    let terminal = process.terminal_with(&mut rng, spot, tau, n_steps)?;
                    sum = sum + self.kind.payoff(terminal, self.strike);
                }
                Ok::<T, PricingError>(sum)
            })
            .collect::<Result<Vec<T>, PricingError>>()?;

        let total = partials.into_iter().fold(T::zero(), |acc, p| acc + p);
        let mean = total / T::from_usize(n_trials);
        tracing::debug!(
            n_trials,
            n_steps,
            n_chunks,
            mean_payoff = mean.as_f64(),
            "Monte Carlo simulation finished"
        );
        Ok(mean * (-process.integrated_rate(tau)?).exp())
    }
}

/// Distinct stream per chunk; neighbouring base seeds do not share chunks.
#[inline]
fn chunk_seed(seed: u64, chunk: usize) -> u64 {
    seed ^ (chunk as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

impl<T> EuropeanOptionPricer<T> for MonteCarloPricer<T>
where
    T: Real,
    StandardNormal: Distribution<T>,
{
    fn price(&self, state: &OptionState<T>) -> Result<T, PricingError> {
        state.validate()?;
        let process = GeometricBrownianMotion::flat(state.rate, self.dividend, state.vol);
        self.price_with_process(&process, state.spot, state.tau)
    }
}
