//! Noncentral chi-squared distribution χ'²(k, λ).
//!
//! The density uses the closed ₀F₁ representation
//!
//! f(x) = e^(−(x+λ)/2) x^(k/2−1) / (2^(k/2) Γ(k/2)) · ₀F₁(; k/2; λx/4)
//!
//! evaluated entirely in log space, so large λx does not overflow the
//! series before the exponential factor brings it back into range,
//!
//! and the distribution function the Poisson mixture
//!
//! F(x) = Σⱼ e^(−λ/2) (λ/2)ʲ / j! · P(k/2 + j, x/2),
//!
//! truncated after a caller-chosen number of terms. Every retained term is
//! non-negative, so raising the term count can only move the partial sum
//! closer to the limit.

use rand::Rng;
use rand_distr::{ChiSquared, Distribution, Exp1, Open01, Poisson, Standard, StandardNormal};

use super::ContinuousDistribution;
use crate::math::special::{
    binomial, ln_gamma, ln_hyp0f1, regularized_lower_incomplete_gamma,
    DEFAULT_QUADRATURE_POINTS, DEFAULT_SERIES_TERMS,
};
use crate::traits::Real;
use crate::types::MathError;

/// Upper bound on the ₀F₁ terms summed by the density. The log-space sum
/// stops well before this once the terms are negligible; the peak term sits
/// near √(λx)/2.
const PDF_SERIES_LIMIT: usize = 1_000_000;

/// Highest raw moment order. Past it the cumulant scale 2ⁿ⁻¹(n−1)! no
/// longer fits in an `f64`.
pub const MAX_MOMENT_ORDER: i64 = 128;

/// Noncentral chi-squared distribution with `k` degrees of freedom and
/// noncentrality `lambda`.
///
/// # Examples
/// ```
/// use quant_math::math::probability::{ContinuousDistribution, NoncentralChiSquared};
///
/// let d = NoncentralChiSquared::new(4.0_f64, 2.0).unwrap();
/// assert_eq!(d.mean(), 6.0);
/// let p = d.cdf(6.0).unwrap();
/// assert!(p > 0.5 && p < 0.7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoncentralChiSquared<T> {
    dof: T,
    lambda: T,
}

impl<T: Real> NoncentralChiSquared<T> {
    /// Creates the distribution.
    ///
    /// # Errors
    /// [`MathError::Domain`] unless `k > 0` and `λ ≥ 0`, both finite.
    pub fn new(dof: T, lambda: T) -> Result<Self, MathError> {
        if !(dof > T::zero()) || !dof.is_finite() {
            return Err(MathError::domain(
                "noncentral_chi_squared",
                format!("degrees of freedom must be strictly positive, got {}", dof),
            ));
        }
        if !(lambda >= T::zero()) || !lambda.is_finite() {
            return Err(MathError::domain(
                "noncentral_chi_squared",
                format!("noncentrality must be non-negative, got {}", lambda),
            ));
        }
        Ok(Self { dof, lambda })
    }

    /// Returns the degrees of freedom k.
    #[inline]
    pub fn dof(&self) -> T {
        self.dof
    }

    /// Returns the noncentrality λ.
    #[inline]
    pub fn lambda(&self) -> T {
        self.lambda
    }

    /// Distribution function truncated after `max_terms` Poisson terms
    /// (terms j = 0..=max_terms are summed).
    ///
    /// Each term evaluates a regularized incomplete gamma with shape
    /// k/2 + j, so k ≥ 2 is required.
    ///
    /// # Errors
    /// [`MathError::Domain`] if `k < 2`.
    pub fn cdf_with_terms(&self, x: T, max_terms: usize) -> Result<T, MathError> {
        if x <= T::zero() {
            return Ok(T::zero());
        }
        let half = T::lit(0.5);
        let half_lambda = half * self.lambda;
        let half_dof = half * self.dof;
        let half_x = half * x;

        let mut weight = (-half_lambda).exp();
        let mut sum = T::zero();
        for j in 0..=max_terms {
            let jf = T::from_usize(j);
            let p = regularized_lower_incomplete_gamma(
                half_dof + jf,
                half_x,
                DEFAULT_QUADRATURE_POINTS,
            )?;
            sum = sum + weight * p;
            weight = weight * half_lambda / (jf + T::one());
        }

        tracing::trace!(
            max_terms,
            next_weight = weight.as_f64(),
            "noncentral chi-squared cdf truncated"
        );
        Ok(sum.min(T::one()))
    }

    /// Moment generating function E[e^(tX)] = e^(λt/(1−2t)) / (1−2t)^(k/2).
    ///
    /// # Errors
    /// [`MathError::Domain`] if `t ≥ 1/2`, where the expectation diverges.
    pub fn mgf(&self, t: T) -> Result<T, MathError> {
        let one_minus = T::one() - T::lit(2.0) * t;
        if !(one_minus > T::zero()) {
            return Err(MathError::domain(
                "noncentral_chi_squared::mgf",
                format!("t must be below 1/2, got {}", t),
            ));
        }
        Ok((self.lambda * t / one_minus).exp() / one_minus.powf(T::lit(0.5) * self.dof))
    }

    /// p-th raw moment E[Xᵖ].
    ///
    /// Derived from the cumulants κₙ = 2ⁿ⁻¹ (n−1)! (k + nλ) through
    /// μ'ₙ = Σⱼ C(n−1, j) κⱼ₊₁ μ'ₙ₋₁₋ⱼ.
    ///
    /// # Errors
    /// [`MathError::Domain`] if `p < 0` or `p > MAX_MOMENT_ORDER`.
    pub fn moment(&self, p: i64) -> Result<T, MathError> {
        if p < 0 {
            return Err(MathError::domain(
                "noncentral_chi_squared::moment",
                format!("order must be non-negative, got {}", p),
            ));
        }
        if p > MAX_MOMENT_ORDER {
            return Err(MathError::domain(
                "noncentral_chi_squared::moment",
                format!("order must not exceed {}, got {}", MAX_MOMENT_ORDER, p),
            ));
        }
        let order = usize::try_from(p).map_err(|_| {
            MathError::domain(
                "noncentral_chi_squared::moment",
                format!("order {} is too large", p),
            )
        })?;
        let mut cumulants = Vec::with_capacity(order);
        let mut scale = T::one();
        for n in 1..=order {
            if n > 1 {
                // 2ⁿ⁻¹(n−1)! from 2ⁿ⁻²(n−2)!
                scale = scale * T::lit(2.0) * T::from_usize(n - 1);
            }
            cumulants.push(scale * (self.dof + T::from_usize(n) * self.lambda));
        }

        let mut raw = Vec::with_capacity(order + 1);
        raw.push(T::one());
        for n in 1..=order {
            let mut acc = T::zero();
            for j in 0..n {
                let c = binomial(T::from_usize(n - 1), T::from_usize(j));
                acc = acc + c * cumulants[j] * raw[n - 1 - j];
            }
            raw.push(acc);
        }
        Ok(raw[order])
    }

    /// Draws `n` variates from the thread-local generator.
    pub fn sample(&self, n: usize) -> Result<Vec<T>, MathError>
    where
        Standard: Distribution<T>,
        StandardNormal: Distribution<T>,
        Exp1: Distribution<T>,
        Open01: Distribution<T>,
    {
        self.sample_with(&mut rand::thread_rng(), n)
    }

    /// Draws `n` variates from `rng` as a Poisson mixture: J ~ Poisson(λ/2),
    /// then X ~ χ²(k + 2J).
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Result<Vec<T>, MathError>
    where
        Standard: Distribution<T>,
        StandardNormal: Distribution<T>,
        Exp1: Distribution<T>,
        Open01: Distribution<T>,
    {
        let mixing = if self.lambda > T::zero() {
            Some(
                Poisson::new(T::lit(0.5) * self.lambda)
                    .map_err(|e| MathError::domain("noncentral_chi_squared::sample", e.to_string()))?,
            )
        } else {
            None
        };

        let mut draws = Vec::with_capacity(n);
        for _ in 0..n {
            let j = match &mixing {
                Some(poisson) => poisson.sample(rng),
                None => T::zero(),
            };
            let central = ChiSquared::new(self.dof + T::lit(2.0) * j)
                .map_err(|e| MathError::domain("noncentral_chi_squared::sample", e.to_string()))?;
            draws.push(central.sample(rng));
        }
        Ok(draws)
    }
}

impl<T: Real> ContinuousDistribution<T> for NoncentralChiSquared<T> {
    fn pdf(&self, x: T) -> T {
        let half = T::lit(0.5);
        let half_dof = half * self.dof;
        if x < T::zero() {
            return T::zero();
        }
        if x == T::zero() {
            let two = T::lit(2.0);
            return if self.dof < two {
                T::infinity()
            } else if self.dof == two {
                half * (-half * self.lambda).exp()
            } else {
                T::zero()
            };
        }

        let log_prefactor = -half * (x + self.lambda) + (half_dof - T::one()) * x.ln()
            - half_dof * T::LN_2()
            - ln_gamma(half_dof);
        // k/2 > 0 and λx/4 ≥ 0, inside the log-series domain
        let ln_series = ln_hyp0f1(T::lit(0.25) * self.lambda * x, half_dof, PDF_SERIES_LIMIT)
            .unwrap_or_else(|_| T::nan());
        (log_prefactor + ln_series).exp()
    }

    fn cdf(&self, x: T) -> Result<T, MathError> {
        self.cdf_with_terms(x, DEFAULT_SERIES_TERMS)
    }

    fn mean(&self) -> T {
        self.dof + self.lambda
    }

    fn variance(&self) -> T {
        T::lit(2.0) * (self.dof + T::lit(2.0) * self.lambda)
    }
}

/// Density of χ'²(k, λ) at `x`.
///
/// # Errors
/// [`MathError::Domain`] for invalid parameters.
pub fn pdf<T: Real>(dof: T, lambda: T, x: T) -> Result<T, MathError> {
    Ok(NoncentralChiSquared::new(dof, lambda)?.pdf(x))
}

/// Distribution function of χ'²(k, λ) at `x`, truncated after `max_terms`.
///
/// # Errors
/// [`MathError::Domain`] for invalid parameters or `k < 2`.
pub fn cdf<T: Real>(dof: T, lambda: T, x: T, max_terms: usize) -> Result<T, MathError> {
    NoncentralChiSquared::new(dof, lambda)?.cdf_with_terms(x, max_terms)
}

/// p-th raw moment, see [`NoncentralChiSquared::moment`].
///
/// # Errors
/// [`MathError::Domain`] for invalid parameters or `p < 0`.
pub fn moment<T: Real>(dof: T, lambda: T, p: i64) -> Result<T, MathError> {
    NoncentralChiSquared::new(dof, lambda)?.moment(p)
}

/// Draws `n` variates from χ'²(k, λ).
///
/// # Errors
/// [`MathError::Domain`] for invalid parameters.
pub fn sample<T: Real>(dof: T, lambda: T, n: usize) -> Result<Vec<T>, MathError>
where
    Standard: Distribution<T>,
    StandardNormal: Distribution<T>,
    Exp1: Distribution<T>,
    Open01: Distribution<T>,
{
    NoncentralChiSquared::new(dof, lambda)?.sample(n)
}
