//! Stochastic processes used by the simulation pricers.

mod gbm;

pub use gbm::{GeometricBrownianMotion, TermStructure};
