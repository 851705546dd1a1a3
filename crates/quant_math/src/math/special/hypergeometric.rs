//! Confluent hypergeometric limit function ₀F₁.

use crate::traits::Real;
use crate::types::MathError;

/// Default truncation point for [`hyp0f1`].
pub const DEFAULT_SERIES_TERMS: usize = 100;

/// Confluent hypergeometric limit function
/// ₀F₁(; b; z) = Σₖ zᵏ / ((b)ₖ · k!), truncated after `max_terms`.
///
/// Terms are generated by the ratio
/// tₖ₊₁ = tₖ · z / ((b + k)(k + 1)), so no factorial or Pochhammer value is
/// ever formed explicitly. No convergence test is made: the sum over
/// k = 0..=max_terms is returned as is and the magnitude of the last term is
/// reported through `tracing` at trace level. Callers that need a tighter
/// approximation raise `max_terms`.
///
/// # Errors
/// [`MathError::Domain`] if `b` is zero or a negative integer.
///
/// # Examples
/// ```
/// use quant_math::math::special::{hyp0f1, DEFAULT_SERIES_TERMS};
///
/// // ₀F₁(; 1/2; z²/4) = cosh(z)
/// let z = 1.3_f64;
/// let value = hyp0f1(z * z / 4.0, 0.5, DEFAULT_SERIES_TERMS).unwrap();
/// assert!((value - z.cosh()).abs() < 1e-12);
/// ```
pub fn hyp0f1<T: Real>(z: T, b: T, max_terms: usize) -> Result<T, MathError> {
    if b <= T::zero() && b == b.floor() {
        return Err(MathError::domain(
            "hyp0f1",
            format!("b must not be zero or a negative integer, got {}", b),
        ));
    }

    let mut term = T::one();
    let mut sum = T::one();
    for k in 0..max_terms {
        let kf = T::from_usize(k);
        term = term * z / ((b + kf) * (kf + T::one()));
        sum = sum + term;
    }

    tracing::trace!(
        max_terms,
        last_term = term.as_f64(),
        "hyp0f1 series truncated"
    );
    Ok(sum)
}

/// Terms this far below the running maximum (in log space) end the
/// summation in [`ln_hyp0f1`] once the series is past its peak.
const LN_NEGLIGIBLE_TERM: f64 = -45.0;

/// Natural logarithm of ₀F₁(; b; z) for z ≥ 0 and b > 0.
///
/// Every term is positive in this range, so the sum is accumulated as a
/// running log-sum-exp and never overflows even when the terms themselves
/// exceed the range of `T`. Summation stops after `max_terms` terms, or
/// earlier once the terms are decreasing and negligible next to the
/// largest one.
///
/// # Errors
/// [`MathError::Domain`] if `z < 0` or `b ≤ 0`.
///
/// # Examples
/// ```
/// use quant_math::math::special::{hyp0f1, ln_hyp0f1};
///
/// let direct = hyp0f1(2.0_f64, 1.5, 100).unwrap();
/// assert!((ln_hyp0f1(2.0_f64, 1.5, 100).unwrap() - direct.ln()).abs() < 1e-12);
/// // Far beyond the range of the direct series
/// assert!(ln_hyp0f1(1e8_f64, 2.0, 1_000_000).unwrap().is_finite());
/// ```
pub fn ln_hyp0f1<T: Real>(z: T, b: T, max_terms: usize) -> Result<T, MathError> {
    if !(b > T::zero()) {
        return Err(MathError::domain(
            "ln_hyp0f1",
            format!("b must be strictly positive, got {}", b),
        ));
    }
    if !(z >= T::zero()) {
        return Err(MathError::domain(
            "ln_hyp0f1",
            format!("z must be non-negative, got {}", z),
        ));
    }
    if z == T::zero() {
        return Ok(T::zero());
    }

    let ln_z = z.ln();
    let cutoff = T::lit(LN_NEGLIGIBLE_TERM);
    let mut ln_term = T::zero();
    let mut ln_max = T::zero();
    // Σ exp(ln tₖ − ln_max)
    let mut scaled = T::one();
    let mut used = 0;
    for k in 0..max_terms {
        let kf = T::from_usize(k);
        let previous = ln_term;
        ln_term = ln_term + ln_z - (b + kf).ln() - (kf + T::one()).ln();
        if ln_term > ln_max {
            scaled = scaled * (ln_max - ln_term).exp() + T::one();
            ln_max = ln_term;
        } else {
            scaled = scaled + (ln_term - ln_max).exp();
        }
        used = k + 1;
        if ln_term < previous && ln_term - ln_max < cutoff {
            break;
        }
    }

    tracing::trace!(
        terms = used,
        last_ln_term = ln_term.as_f64(),
        "ln_hyp0f1 series summed"
    );
    Ok(ln_max + scaled.ln())
}
