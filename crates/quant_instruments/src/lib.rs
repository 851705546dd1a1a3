//! # quant_instruments: Option and Bond Pricers
//!
//! Closed-form and simulation pricers layered on `quant_math`.
//!
//! This crate provides:
//! - European option pricers: Black–Scholes, absolute diffusion, general
//!   CEV and Monte Carlo (`european`)
//! - Zero-coupon bond prices under Vasicek and CIR (`bonds`)
//! - CIR options on zero-coupon bonds (`bond_option`)
//! - Geometric Brownian motion with term-structure coefficients (`process`)
//! - Finite-difference Greeks and their bump configuration (`greeks`)
//! - `PricingError` (`error`)
//!
//! ## Design Principles
//!
//! - **Capability traits** with a single required `price` method; Greeks
//!   and implied volatility are provided on top of it
//! - **Enum-based pricer families** (`EuropeanPricer`, `ZeroCouponBondPricer`)
//!   for static dispatch when the model is chosen at run time
//! - **Builder pattern** for configurations with validated defaults
//!
//! ## Usage Examples
//!
//! ```rust
//! use quant_instruments::european::{BlackScholes, EuropeanOptionPricer, OptionKind, OptionState};
//! use quant_instruments::greeks::GreeksConfig;
//!
//! let call = BlackScholes::new(100.0_f64, OptionKind::Call).unwrap();
//! let state = OptionState::new(100.0, 1.0, 0.05, 0.2).unwrap();
//!
//! let greeks = call.greeks(&state, &GreeksConfig::default()).unwrap();
//! assert!(greeks.delta > 0.5 && greeks.delta < 1.0);
//! assert!(greeks.theta < 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: derive `Serialize`/`Deserialize` for states, pricer
//!   parameters and configurations

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod bond_option;
pub mod bonds;
pub mod error;
pub mod european;
pub mod greeks;
pub mod process;
