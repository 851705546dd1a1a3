//! Special functions.
//!
//! - [`factorial`], [`double_factorial`], [`binomial`], [`pochhammer`]
//! - [`gamma`], [`ln_gamma`]
//! - [`erf`], [`erfc`]
//! - [`hyp0f1`], [`ln_hyp0f1`]: confluent hypergeometric limit function
//! - [`lower_incomplete_gamma`], [`upper_incomplete_gamma`],
//!   [`regularized_lower_incomplete_gamma`]: quadrature of the defining integral
//!
//! Every function is pure, allocation-free and reentrant.

mod erf;
mod factorial;
mod gamma;
mod hypergeometric;
mod incomplete_gamma;

pub use erf::{erf, erfc};
pub use factorial::{binomial, double_factorial, factorial, pochhammer};
pub use gamma::{gamma, ln_gamma};
pub use hypergeometric::{hyp0f1, ln_hyp0f1, DEFAULT_SERIES_TERMS};
pub use incomplete_gamma::{
    lower_incomplete_gamma, regularized_lower_incomplete_gamma, upper_incomplete_gamma,
    DEFAULT_QUADRATURE_POINTS,
};
