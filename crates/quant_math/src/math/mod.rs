//! Numerical methods.
//!
//! Dependency order, leaf first:
//!
//! - [`special`]: factorials, gamma family, ₀F₁, incomplete gamma
//! - [`integration`]: trapezoidal and Simpson quadrature
//! - [`probability`]: normal, gamma and noncentral chi-squared distributions
//! - [`optimization`]: bisection root finding
//! - [`differentiation`]: forward, backward and central finite differences

pub mod differentiation;
pub mod integration;
pub mod optimization;
pub mod probability;
pub mod special;
