//! Published reference values for the numerical core.
//!
//! Each test checks a closed-form or tabulated value through the public
//! API, with the tolerance the underlying method can guarantee.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use quant_math::math::differentiation::{first_backward, first_central, first_forward};
use quant_math::math::integration::{simpson, trapezoidal};
use quant_math::math::optimization::bisection;
use quant_math::math::probability::{gamma, noncentral_chi_squared, normal};
use quant_math::math::special::{
    gamma as gamma_fn, lower_incomplete_gamma, upper_incomplete_gamma,
};

/// Routes `tracing` events to the test harness; `RUST_LOG=debug` shows
/// the solver and quadrature diagnostics.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ========================================
// Quadrature
// ========================================

#[test]
fn test_polynomial_integral() {
    init_tracing();
    let f = |x: f64| 3.0 * x * x + x - 3.0;
    assert_abs_diff_eq!(trapezoidal(f, 1.0, 2.0, 10_000).unwrap(), 5.5, epsilon = 1e-2);
    assert_abs_diff_eq!(simpson(f, 1.0, 2.0, 10_000).unwrap(), 5.5, epsilon = 1e-2);
}

#[test]
fn test_trigonometric_integral() {
    let f = |x: f64| (3.0 * x).cos();
    let exact = 15.0_f64.sin() / 3.0;
    assert_abs_diff_eq!(trapezoidal(f, 0.0, 5.0, 10_000).unwrap(), exact, epsilon = 1e-2);
    assert_abs_diff_eq!(simpson(f, 0.0, 5.0, 10_000).unwrap(), exact, epsilon = 1e-2);
}

// ========================================
// Distributions
// ========================================

#[test]
fn test_normal_reference_values() {
    assert_abs_diff_eq!(normal::pdf(0.0_f64, 1.0, 0.5).unwrap(), 0.352_065_326_7, epsilon = 1e-6);
    assert_abs_diff_eq!(
        normal::cdf(0.0_f64, 1.0, 0.5).unwrap(),
        0.691_462_461_274_013,
        epsilon = 1e-6
    );
    assert_eq!(normal::moment(0.0_f64, 1.0, 6).unwrap(), 15.0);
}

#[test]
fn test_gamma_reference_values() {
    assert_abs_diff_eq!(gamma::pdf(4.0_f64, 1.0, 5.0).unwrap(), 0.140_373_895_8, epsilon = 1e-3);
    assert_abs_diff_eq!(gamma::cdf(4.0_f64, 1.0, 5.0).unwrap(), 0.734_974_084_7, epsilon = 1e-3);
}

#[test]
fn test_gamma_cdf_matches_incomplete_gamma() {
    for &(shape, rate, x) in &[(2.0_f64, 0.5, 3.0), (4.0, 1.0, 5.0), (3.5, 2.0, 1.2)] {
        let direct = gamma::cdf(shape, rate, x).unwrap();
        let via_integral = lower_incomplete_gamma(shape, rate * x, 1000).unwrap() / gamma_fn(shape);
        assert_abs_diff_eq!(direct, via_integral, epsilon = 1e-6);
    }
}

#[test]
fn test_noncentral_chi_squared_truncation_never_loses_accuracy() {
    let (k, lambda, x) = (4.0_f64, 3.0, 5.0);
    let reference = noncentral_chi_squared::cdf(k, lambda, x, 400).unwrap();
    let mut previous_error = f64::INFINITY;
    for terms in [0, 1, 2, 5, 10, 20, 50, 100] {
        let error = (noncentral_chi_squared::cdf(k, lambda, x, terms).unwrap() - reference).abs();
        assert!(error <= previous_error + 1e-12, "terms = {}", terms);
        previous_error = error;
    }
}

// ========================================
// Root finding and differentiation
// ========================================

#[test]
fn test_bisection_reference_roots() {
    init_tracing();
    let linear = bisection(|x: f64| 2.0 * x - 5.0, 0.0, 5.0, 1e-6, 1e-6).unwrap();
    assert_abs_diff_eq!(linear, 2.5, epsilon = 1e-6);

    let exponential = bisection(|x: f64| (0.5 * x).exp() - 5.0, 0.0, 5.0, 1e-6, 1e-6).unwrap();
    assert_abs_diff_eq!(exponential, 3.218_875_824_9, epsilon = 1e-6);
}

#[test]
fn test_first_derivative_stencils() {
    let f = |x: f64| 2.0 * x * x + 2.0;
    let h = 1e-6;
    assert_abs_diff_eq!(first_forward(f, 1.5, h), 6.0, epsilon = 1e-3);
    assert_abs_diff_eq!(first_backward(f, 1.5, h), 6.0, epsilon = 1e-3);
    assert_abs_diff_eq!(first_central(f, 1.5, h), 6.0, epsilon = 1e-3);
}

#[test]
fn test_incomplete_gamma_complementarity_across_grid_sizes() {
    for n in [10, 100, 1000] {
        for &(s, x) in &[(1.0_f64, 0.5), (2.5, 3.0), (6.0, 2.0)] {
            let total = lower_incomplete_gamma(s, x, n).unwrap()
                + upper_incomplete_gamma(s, x, n).unwrap();
            assert_relative_eq!(total, gamma_fn(s), max_relative = 1e-12);
        }
    }
}
