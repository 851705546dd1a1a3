//! # quant_math: Numerical Core for Option and Bond Pricing
//!
//! ## Role
//!
//! quant_math is the bottom layer of the workspace. Every pricer in
//! `quant_instruments` is a closed-form formula layered on top of it:
//! - Special functions: gamma, incomplete gamma, ₀F₁, factorials (`math::special`)
//! - Quadrature: trapezoidal and Simpson rules (`math::integration`)
//! - Distributions: normal, gamma, noncentral chi-squared (`math::probability`)
//! - Root finding: bisection (`math::optimization`)
//! - Finite differences of first, second and n-th order (`math::differentiation`)
//! - Fan-out/fan-in reductions over index ranges (`parallel`)
//! - The `Real` scalar trait (`traits`) and `MathError` (`types`)
//!
//! ## Dependencies
//!
//! - num-traits: generic floating-point arithmetic over `f32`/`f64`
//! - rand / rand_distr: distribution sampling
//! - rayon: partitioned reductions in quadrature and series
//! - thiserror: error enum
//! - tracing: diagnostics for domain errors, convergence and truncation
//! - serde: serialisation of configs and parameters (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use quant_math::math::integration::simpson;
//! use quant_math::math::optimization::bisection;
//! use quant_math::math::probability::normal;
//!
//! let area = simpson(|x: f64| x.exp(), 0.0, 1.0, 100).unwrap();
//! assert!((area - (1.0_f64.exp() - 1.0)).abs() < 1e-8);
//!
//! let p = normal::cdf(0.0_f64, 1.0, 1.96).unwrap();
//! assert!((p - 0.975).abs() < 1e-3);
//!
//! // Invert the normal cdf by bisection
//! let q = bisection(|x: f64| normal::cdf(0.0, 1.0, x).unwrap() - 0.975, -5.0, 5.0, 1e-10, 1e-10)
//!     .unwrap();
//! assert!((q - 1.96).abs() < 1e-3);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: derive `Serialize`/`Deserialize` for configs, distribution
//!   parameters and `MathError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod parallel;
pub mod traits;
pub mod types;
