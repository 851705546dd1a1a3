//! Factorials, binomial coefficients and rising factorials.

use num_traits::Num;

use super::gamma::{gamma, is_gamma_pole, ln_gamma};
use crate::traits::Real;
use crate::types::MathError;

/// Largest integer argument for which the rising factorial is evaluated as
/// an explicit product instead of a gamma-function ratio.
const POCHHAMMER_PRODUCT_LIMIT: f64 = 64.0;

/// n! for integer n ≥ 0, by a downward multiplicative loop.
///
/// `factorial(0)` is 1. The result overflows to +∞ once n! exceeds the range
/// of `T` (n > 170 for `f64`); the loop stops as soon as it does.
///
/// # Errors
/// [`MathError::Domain`] if `n < 0`.
///
/// # Examples
/// ```
/// use quant_math::math::special::factorial;
///
/// assert_eq!(factorial::<f64>(5).unwrap(), 120.0);
/// assert_eq!(factorial::<f64>(0).unwrap(), 1.0);
/// assert!(factorial::<f64>(-1).is_err());
/// ```
pub fn factorial<T: Real>(n: i64) -> Result<T, MathError> {
    if n < 0 {
        return Err(MathError::domain(
            "factorial",
            format!("n must be non-negative, got {}", n),
        ));
    }
    let mut result = T::one();
    let mut k = n;
    while k > 1 {
        result = result * T::lit(k as f64);
        if result.is_infinite() {
            break;
        }
        k -= 1;
    }
    Ok(result)
}

/// n!! for integer n ≥ 0: the product of the integers in 1..=n sharing the
/// parity of n. `double_factorial(0)` and `double_factorial(1)` are 1.
///
/// # Errors
/// [`MathError::Domain`] if `n < 0`.
///
/// # Examples
/// ```
/// use quant_math::math::special::double_factorial;
///
/// assert_eq!(double_factorial::<f64>(5).unwrap(), 15.0);
/// assert_eq!(double_factorial::<f64>(6).unwrap(), 48.0);
/// ```
pub fn double_factorial<T: Real>(n: i64) -> Result<T, MathError> {
    if n < 0 {
        return Err(MathError::domain(
            "double_factorial",
            format!("n must be non-negative, got {}", n),
        ));
    }
    let mut result = T::one();
    let mut k = n;
    while k > 1 {
        result = result * T::lit(k as f64);
        if result.is_infinite() {
            break;
        }
        k -= 2;
    }
    Ok(result)
}

/// Binomial coefficient C(n, k).
///
/// Uses the multiplicative formula over m = min(k, n − k) factors,
/// `c ← c · (n − m + i) / i` for i = 1..=m. Every intermediate value is
/// itself a binomial coefficient, so the result is exact for integer types
/// as long as `C(n, k) · n` fits. For floating-point `n` the same loop gives
/// real-valued weights.
///
/// Returns zero when `k < 0` or `k > n`.
///
/// # Examples
/// ```
/// use quant_math::math::special::binomial;
///
/// assert_eq!(binomial(10_u64, 3), 120);
/// assert_eq!(binomial(6.0_f64, 2.0), 15.0);
/// assert_eq!(binomial(4_i32, 7), 0);
/// ```
pub fn binomial<N>(n: N, k: N) -> N
where
    N: Num + Copy + PartialOrd,
{
    let zero = N::zero();
    if k < zero || k > n {
        return zero;
    }
    let m = if n - k < k { n - k } else { k };

    let one = N::one();
    let mut result = one;
    let mut i = one;
    while i <= m {
        result = result * (n - m + i) / i;
        i = i + one;
    }
    result
}

/// Pochhammer symbol (rising factorial) (z)ₐ = Γ(z + a) / Γ(z).
///
/// Returns exactly 1 when `a == 0`. Small non-negative integer `a` is
/// evaluated as the product z(z+1)…(z+a−1), which is also valid when z is a
/// non-positive integer. Other arguments use a gamma-function ratio, taken
/// in log space when both arguments are positive.
///
/// # Errors
/// [`MathError::Domain`] if the ratio form is needed and `z` or `z + a` is a
/// pole of Γ.
///
/// # Examples
/// ```
/// use quant_math::math::special::pochhammer;
///
/// assert_eq!(pochhammer(3.0_f64, 0.0).unwrap(), 1.0);
/// assert_eq!(pochhammer(3.0_f64, 4.0).unwrap(), 360.0);
/// assert!((pochhammer(0.5_f64, 0.5).unwrap() - 0.564_189_583_547_756_3).abs() < 1e-12);
/// ```
pub fn pochhammer<T: Real>(z: T, a: T) -> Result<T, MathError> {
    if a == T::zero() {
        return Ok(T::one());
    }

    if a > T::zero() && a == a.floor() && a <= T::lit(POCHHAMMER_PRODUCT_LIMIT) {
        let mut result = T::one();
        let mut offset = T::zero();
        while offset < a {
            result = result * (z + offset);
            offset = offset + T::one();
        }
        return Ok(result);
    }

    let upper = z + a;
    if is_gamma_pole(z) || is_gamma_pole(upper) {
        return Err(MathError::domain(
            "pochhammer",
            format!("z = {} and z + a = {} must avoid the poles of gamma", z, upper),
        ));
    }

    if z > T::zero() && upper > T::zero() {
        Ok((ln_gamma(upper) - ln_gamma(z)).exp())
    } else {
        Ok(gamma(upper) / gamma(z))
    }
}
