//! Geometric Brownian motion with time-dependent coefficients.
//!
//! ```text
//! dS = (r(τ) − q(τ)) S dt + σ(τ) S dW
//! ```
//!
//! Paths are generated with the exact log-space step
//!
//! ```text
//! S(t+dt) = S(t) · exp((r − q − σ²/2)·dt + σ·√dt·Z)
//! ```
//!
//! where the coefficients are read at the remaining time to maturity
//! τᵢ = τ − i·dt after step i.

use std::fmt;
use std::sync::Arc;

use quant_math::math::integration::simpson;
use quant_math::traits::Real;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::PricingError;

/// Simpson subintervals used to integrate a rate curve.
const RATE_QUADRATURE_POINTS: usize = 256;

/// Coefficient as a function of time to maturity.
#[derive(Clone)]
pub enum TermStructure<T> {
    /// Same value at every maturity.
    Flat(T),
    /// Arbitrary curve τ ↦ value.
    Curve(Arc<dyn Fn(T) -> T + Send + Sync>),
}

impl<T: Real> TermStructure<T> {
    /// Constant term structure.
    pub fn flat(value: T) -> Self {
        TermStructure::Flat(value)
    }

    /// Term structure backed by a closure.
    pub fn curve<F>(f: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        TermStructure::Curve(Arc::new(f))
    }

    /// Value at time to maturity `tau`.
    #[inline]
    pub fn value_at(&self, tau: T) -> T {
        match self {
            TermStructure::Flat(value) => *value,
            TermStructure::Curve(f) => f(tau),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TermStructure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermStructure::Flat(value) => f.debug_tuple("Flat").field(value).finish(),
            TermStructure::Curve(_) => f.write_str("Curve(<fn>)"),
        }
    }
}

/// Geometric Brownian motion driven by rate, dividend yield and volatility
/// term structures.
///
/// # Examples
/// ```
/// use quant_instruments::process::GeometricBrownianMotion;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let gbm = GeometricBrownianMotion::flat(0.05_f64, 0.0, 0.2);
/// let mut rng = StdRng::seed_from_u64(42);
/// let path = gbm.sample_with(&mut rng, 100.0, 1.0, 12).unwrap();
/// assert_eq!(path.len(), 13);
/// assert_eq!(path[0], 100.0);
/// ```
#[derive(Clone, Debug)]
pub struct GeometricBrownianMotion<T> {
    rate: TermStructure<T>,
    dividend: TermStructure<T>,
    vol: TermStructure<T>,
}

impl<T: Real> GeometricBrownianMotion<T> {
    /// Creates a process from three term structures.
    pub fn new(rate: TermStructure<T>, dividend: TermStructure<T>, vol: TermStructure<T>) -> Self {
        Self {
            rate,
            dividend,
            vol,
        }
    }

    /// Creates a process with constant coefficients.
    pub fn flat(rate: T, dividend: T, vol: T) -> Self {
        Self::new(
            TermStructure::flat(rate),
            TermStructure::flat(dividend),
            TermStructure::flat(vol),
        )
    }

    /// Risk-free rate at `tau`.
    #[inline]
    pub fn rate_at(&self, tau: T) -> T {
        self.rate.value_at(tau)
    }

    /// ∫₀^τ r(u) du, the exponent of the discount factor to maturity.
    ///
    /// Exact for a flat rate; a curve is integrated with the Simpson rule.
    ///
    /// # Errors
    /// [`PricingError::InvalidParameter`] for a negative or non-finite `tau`.
    pub fn integrated_rate(&self, tau: T) -> Result<T, PricingError> {
        if !(tau >= T::zero()) || !tau.is_finite() {
            return Err(PricingError::invalid_parameter(
                "tau",
                tau.as_f64(),
                "must be non-negative and finite",
            ));
        }
        match &self.rate {
            TermStructure::Flat(rate) => Ok(*rate * tau),
            TermStructure::Curve(_) if tau == T::zero() => Ok(T::zero()),
            TermStructure::Curve(curve) => {
                Ok(simpson(|u| curve(u), T::zero(), tau, RATE_QUADRATURE_POINTS)?)
            }
        }
    }

    /// Dividend yield at `tau`.
    #[inline]
    pub fn dividend_at(&self, tau: T) -> T {
        self.dividend.value_at(tau)
    }

    /// Volatility at `tau`.
    #[inline]
    pub fn vol_at(&self, tau: T) -> T {
        self.vol.value_at(tau)
    }

    fn check(s0: T, tau: T, n_steps: usize) -> Result<(), PricingError> {
        if n_steps == 0 {
            return Err(PricingError::invalid_config("n_steps must be positive"));
        }
        if !(s0 > T::zero()) || !s0.is_finite() {
            return Err(PricingError::invalid_parameter(
                "spot",
                s0.as_f64(),
                "must be positive and finite",
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

    #[inline]
    fn step<R: Rng + ?Sized>(&self, rng: &mut R, s: T, tau_i: T, dt: T, sqrt_dt: T) -> T
    where
        StandardNormal: Distribution<T>,
    {
        let z: T = StandardNormal.sample(rng);
        let vol = self.vol_at(tau_i);
        let drift = self.rate_at(tau_i) - self.dividend_at(tau_i) - T::lit(0.5) * vol * vol;
        s * (drift * dt + vol * sqrt_dt * z).exp()
    }

    /// Samples a path of `n_steps + 1` points from `s0` over `tau` years.
    ///
    /// # Errors
    /// [`PricingError`] if `n_steps` is zero, `s0` is not positive or `tau`
    /// is negative.
    pub fn sample_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        s0: T,
        tau: T,
        n_steps: usize,
    ) -> Result<Vec<T>, PricingError>
    where
        StandardNormal: Distribution<T>,
    {
        Self::check(s0, tau, n_steps)?;
        let dt = tau / T::from_usize(n_steps);
        let sqrt_dt = dt.sqrt();

        let mut path = Vec::with_capacity(n_steps + 1);
        path.push(s0);
        let mut s = s0;
        for i in 1..=n_steps {
            let tau_i = tau - T::from_usize(i) * dt;
            s = self.step(rng, s, tau_i, dt, sqrt_dt);
            path.push(s);
        }
        Ok(path)
    }

    /// Samples a path using the thread-local generator.
    ///
    /// # Errors
    /// As for [`GeometricBrownianMotion::sample_with`].
    pub fn sample(&self, s0: T, tau: T, n_steps: usize) -> Result<Vec<T>, PricingError>
    where
        StandardNormal: Distribution<T>,
    {
        self.sample_with(&mut rand::thread_rng(), s0, tau, n_steps)
    }

    /// Last point of a sampled path, without storing the path.
    ///
    /// Consumes the generator exactly as [`sample_with`](Self::sample_with)
    /// does, so the same seed gives the same terminal value.
    ///
    /// # Errors
    /// As for [`GeometricBrownianMotion::sample_with`].
    pub fn terminal_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        s0: T,
        tau: T,
        n_steps: usize,
    ) -> Result<T, PricingError>
    where
        StandardNormal: Distribution<T>,
    {
        Self::check(s0, tau, n_steps)?;
        let dt = tau / T::from_usize(n_steps);
        let sqrt_dt = dt.sqrt();
        let mut s = s0;
        for i in 1..=n_steps {
            s = self.step(rng, s, tau - T::from_usize(i) * dt, dt, sqrt_dt);
        }
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_term_structure_values() {
        let flat = TermStructure::flat(0.03_f64);
        let curve = TermStructure::curve(|tau: f64| 0.01 + 0.01 * tau);
        assert_eq!(flat.value_at(5.0), 0.03);
        assert_relative_eq!(curve.value_at(2.0), 0.03);
        assert_eq!(format!("{:?}", flat), "Flat(0.03)");
        assert_eq!(format!("{:?}", curve), "Curve(<fn>)");
    }

    #[test]
    fn test_path_shape_and_positivity() {
        let gbm = GeometricBrownianMotion::flat(0.05_f64, 0.01, 0.3);
        let mut rng = StdRng::seed_from_u64(7);
        let path = gbm.sample_with(&mut rng, 50.0, 2.0, 24).unwrap();
        assert_eq!(path.len(), 25);
        assert_eq!(path[0], 50.0);
        assert!(path.iter().all(|s| *s > 0.0 && s.is_finite()));
    }

    #[test]
    fn test_zero_vol_path_is_deterministic_forward() {
        let gbm = GeometricBrownianMotion::flat(0.05_f64, 0.02, 0.0);
        let path = gbm.sample(100.0, 1.0, 4).unwrap();
        assert_relative_eq!(path[4], 100.0 * (0.03_f64).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_curve_read_at_remaining_maturity() {
        // Rate is 0.1 for the first half of the life and zero afterwards
        let gbm = GeometricBrownianMotion::new(
            TermStructure::curve(|tau: f64| if tau >= 0.5 { 0.1 } else { 0.0 }),
            TermStructure::flat(0.0),
            TermStructure::flat(0.0),
        );
        let path = gbm.sample(1.0, 1.0, 2).unwrap();
        assert_relative_eq!(path[1], (0.05_f64).exp(), max_relative = 1e-12);
        assert_relative_eq!(path[2], (0.05_f64).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_integrated_rate() {
        let flat = GeometricBrownianMotion::flat(0.05_f64, 0.0, 0.2);
        assert_eq!(flat.integrated_rate(2.0).unwrap(), 0.1);

        let curve = GeometricBrownianMotion::new(
            TermStructure::curve(|tau: f64| 0.02 + 0.01 * tau),
            TermStructure::flat(0.0),
            TermStructure::flat(0.2),
        );
        assert_eq!(curve.integrated_rate(0.0).unwrap(), 0.0);
        for tau in [0.5, 1.0, 3.0] {
            let exact = 0.02 * tau + 0.005 * tau * tau;
            assert_relative_eq!(curve.integrated_rate(tau).unwrap(), exact, max_relative = 1e-12);
        }
        assert!(curve.integrated_rate(-1.0).is_err());
        assert!(flat.integrated_rate(f64::NAN).is_err());
    }

    #[test]
    fn test_terminal_matches_path_end_for_same_seed() {
        let gbm = GeometricBrownianMotion::flat(0.05_f64, 0.0, 0.2);
        let path = gbm
            .sample_with(&mut StdRng::seed_from_u64(11), 100.0, 1.0, 10)
            .unwrap();
        let terminal = gbm
            .terminal_with(&mut StdRng::seed_from_u64(11), 100.0, 1.0, 10)
            .unwrap();
        assert_eq!(path[10], terminal);
    }

    #[test]
    fn test_invalid_inputs() {
        let gbm = GeometricBrownianMotion::flat(0.05_f64, 0.0, 0.2);
        assert!(matches!(
            gbm.sample(100.0, 1.0, 0),
            Err(PricingError::InvalidConfig(_))
        ));
        assert!(matches!(
            gbm.sample(-1.0, 1.0, 1),
            Err(PricingError::InvalidParameter { name: "spot", .. })
        ));
    }

    #[test]
    fn test_lognormal_terminal_mean() {
        let gbm = GeometricBrownianMotion::flat(0.05_f64, 0.0, 0.2);
        let mut rng = StdRng::seed_from_u64(2024);
        let n = 20_000;
        let mean = (0..n)
            .map(|_| gbm.terminal_with(&mut rng, 100.0, 1.0, 1).unwrap())
            .sum::<f64>()
            / n as f64;
        // Standard error is about 0.15
        assert!((mean - 100.0 * (0.05_f64).exp()).abs() < 1.0);
    }
}
