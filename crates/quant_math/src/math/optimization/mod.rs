//! Root finding.
//!
//! - [`BisectionSolver`]: bisection for monotonically increasing targets,
//!   configured through [`BisectionConfig`]
//! - [`bisection`]: free-function form taking the two tolerances directly
//!
//! Targets are plain callables `Fn(T) -> T`; pricers hand in closures over
//! their own state (for example price(σ) − market price when inverting for
//! implied volatility).

mod bisection;
mod config;

pub use bisection::{bisection, BisectionSolver};
pub use config::{BisectionConfig, ToleranceCombination};
