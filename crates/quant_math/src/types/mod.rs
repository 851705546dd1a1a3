//! Core error types.
//!
//! # Re-exports
//!
//! - [`MathError`] from `error`

pub mod error;

pub use error::MathError;
