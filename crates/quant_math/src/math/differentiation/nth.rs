//! Arbitrary-order binomial stencils.
//!
//! For order n the n + 1 sample points are weighted by ±C(n, i) and the sum
//! is divided by hⁿ. Round-off grows like ε / hⁿ, so higher orders need a
//! correspondingly larger step.

use crate::math::special::binomial;
use crate::traits::Real;
use crate::types::MathError;

fn check_order(context: &'static str, n: usize) -> Result<i32, MathError> {
    if n < 1 {
        return Err(MathError::domain(
            context,
            "derivative order must be at least 1, got 0",
        ));
    }
    i32::try_from(n).map_err(|_| {
        MathError::domain(context, format!("derivative order {} is too large", n))
    })
}

/// Sums (−1)^i C(n, i) f(offset(i)) for i = 0..=n and divides by hⁿ.
fn stencil<T, F, O>(f: F, n: usize, exponent: i32, h: T, offset: O) -> T
where
    T: Real,
    F: Fn(T) -> T,
    O: Fn(T) -> T,
{
    let order = T::from_usize(n);
    let mut sum = T::zero();
    for i in 0..=n {
        let fi = T::from_usize(i);
        let weight = binomial(order, fi);
        let term = weight * f(offset(fi));
        sum = if i % 2 == 0 { sum + term } else { sum - term };
    }
    sum / h.powi(exponent)
}

/// n-th order forward difference Σᵢ (−1)^(n−i) C(n, i) f(x + ih) / hⁿ.
///
/// # Errors
/// [`MathError::Domain`] if `n == 0` or `n > i32::MAX`.
pub fn nth_forward<T, F>(f: F, n: usize, x: T, h: T) -> Result<T, MathError>
where
    T: Real,
    F: Fn(T) -> T,
{
    let exponent = check_order("nth_forward", n)?;
    // (−1)^(n−i) = (−1)^n · (−1)^i
    let value = stencil(f, n, exponent, h, |i| x + i * h);
    Ok(if n % 2 == 0 { value } else { -value })
}

/// n-th order backward difference Σᵢ (−1)^i C(n, i) f(x − ih) / hⁿ.
///
/// # Errors
/// [`MathError::Domain`] if `n == 0` or `n > i32::MAX`.
pub fn nth_backward<T, F>(f: F, n: usize, x: T, h: T) -> Result<T, MathError>
where
    T: Real,
    F: Fn(T) -> T,
{
    let exponent = check_order("nth_backward", n)?;
    Ok(stencil(f, n, exponent, h, |i| x - i * h))
}

/// n-th order central difference Σᵢ (−1)^i C(n, i) f(x + (n/2 − i)h) / hⁿ.
///
/// Odd orders sample at half-integer offsets, so n = 1 reproduces
/// [`first_central`](super::first_central).
///
/// # Errors
/// [`MathError::Domain`] if `n == 0` or `n > i32::MAX`.
///
/// # Examples
/// ```
/// use quant_math::math::differentiation::nth_central;
///
/// let d3 = nth_central(|x: f64| x.powi(3), 3, 0.7, 1e-2).unwrap();
/// assert!((d3 - 6.0).abs() < 1e-6);
/// ```
pub fn nth_central<T, F>(f: F, n: usize, x: T, h: T) -> Result<T, MathError>
where
    T: Real,
    F: Fn(T) -> T,
{
    let exponent = check_order("nth_central", n)?;
    let half_n = T::lit(0.5) * T::from_usize(n);
    Ok(stencil(f, n, exponent, h, |i| x + (half_n - i) * h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::differentiation::{
        first_backward, first_central, first_forward, second_backward, second_central,
        second_forward,
    };
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_order_zero_is_domain_error() {
        let f = |x: f64| x;
        assert!(nth_forward(f, 0, 1.0, 1e-3).unwrap_err().is_domain());
        assert!(nth_backward(f, 0, 1.0, 1e-3).unwrap_err().is_domain());
        assert!(nth_central(f, 0, 1.0, 1e-3).unwrap_err().is_domain());
    }

    #[test]
    fn test_order_beyond_exponent_range_is_domain_error() {
        let n = i32::MAX as usize + 1;
        let f = |_: f64| -> f64 { panic!("stencil must not be evaluated") };
        assert!(nth_forward(f, n, 1.0, 1e-3).unwrap_err().is_domain());
        assert!(nth_backward(f, n, 1.0, 1e-3).unwrap_err().is_domain());
        assert!(nth_central(f, n, 1.0, 1e-3).unwrap_err().is_domain());
    }

    #[test]
    fn test_order_one_matches_first_order() {
        let f = |x: f64| x.sin() + x * x;
        let (x, h) = (0.8, 1e-3);
        assert_abs_diff_eq!(nth_forward(f, 1, x, h).unwrap(), first_forward(f, x, h), epsilon = 1e-9);
        assert_abs_diff_eq!(nth_backward(f, 1, x, h).unwrap(), first_backward(f, x, h), epsilon = 1e-9);
        assert_abs_diff_eq!(nth_central(f, 1, x, h).unwrap(), first_central(f, x, h), epsilon = 1e-9);
    }

    #[test]
    fn test_order_two_matches_second_order() {
        let f = |x: f64| x.cos();
        let (x, h) = (0.3, 1e-2);
        assert_abs_diff_eq!(nth_forward(f, 2, x, h).unwrap(), second_forward(f, x, h), epsilon = 1e-8);
        assert_abs_diff_eq!(nth_backward(f, 2, x, h).unwrap(), second_backward(f, x, h), epsilon = 1e-8);
        assert_abs_diff_eq!(nth_central(f, 2, x, h).unwrap(), second_central(f, x, h), epsilon = 1e-8);
    }

    #[test]
    fn test_fourth_derivative_of_exponential() {
        let f = |x: f64| x.exp();
        let d4 = nth_central(f, 4, 0.0, 1e-2).unwrap();
        assert_abs_diff_eq!(d4, 1.0, epsilon = 1e-3);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn prop_nth_derivative_of_monomial(n in 1usize..5, x in -2.0f64..2.0) {
            // dⁿ/dxⁿ xⁿ = n!
            let f = |t: f64| t.powi(n as i32);
            let exact: f64 = (1..=n).map(|k| k as f64).product();
            let h = 0.1;
            prop_assert!((nth_forward(f, n, x, h).unwrap() - exact).abs() < 1e-6 * exact.max(1.0) * 10.0);
            prop_assert!((nth_backward(f, n, x, h).unwrap() - exact).abs() < 1e-6 * exact.max(1.0) * 10.0);
            prop_assert!((nth_central(f, n, x, h).unwrap() - exact).abs() < 1e-6 * exact.max(1.0) * 10.0);
        }
    }
}
