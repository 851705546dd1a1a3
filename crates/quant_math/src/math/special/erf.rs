//! Error function and its complement.
//!
//! Chebyshev-fitted exponential form with fractional error below 1.2e-7
//! everywhere, which is enough for the normal cdf to agree with reference
//! tables to better than 1e-7 absolute.

use crate::traits::Real;

const ERFC_COEFFS: [f64; 10] = [
    -1.265_512_23,
    1.000_023_68,
    0.374_091_96,
    0.096_784_18,
    -0.186_288_06,
    0.278_868_07,
    -1.135_203_98,
    1.488_515_87,
    -0.822_152_23,
    0.170_872_77,
];

/// Complementary error function erfc(x) = 1 − erf(x).
///
/// # Examples
/// ```
/// use quant_math::math::special::erfc;
///
/// assert!((erfc(0.0_f64) - 1.0).abs() < 1e-7);
/// assert!((erfc(1.0_f64) - 0.157_299_207_050_285_1).abs() < 1e-7);
/// ```
pub fn erfc<T: Real>(x: T) -> T {
    let z = x.abs();
    let t = T::one() / (T::one() + T::lit(0.5) * z);

    // Horner evaluation of the exponent polynomial in t
    let mut poly = T::lit(ERFC_COEFFS[ERFC_COEFFS.len() - 1]);
    for coeff in ERFC_COEFFS.iter().rev().skip(1) {
        poly = T::lit(*coeff) + t * poly;
    }
    let ans = t * (-z * z + poly).exp();

    if x >= T::zero() {
        ans
    } else {
        T::lit(2.0) - ans
    }
}

/// Error function erf(x) = (2/√π) ∫₀ˣ e^(−t²) dt.
///
/// # Examples
/// ```
/// use quant_math::math::special::erf;
///
/// assert!((erf(0.5_f64) - 0.520_499_877_813_046_5).abs() < 1e-7);
/// assert!((erf(-0.5_f64) + erf(0.5_f64)).abs() < 1e-15);
/// ```
#[inline]
pub fn erf<T: Real>(x: T) -> T {
    T::one() - erfc(x)
}
