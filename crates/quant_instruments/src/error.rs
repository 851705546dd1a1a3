//! Error types for pricing operations.
//!
//! This module provides:
//! - `PricingError`: Errors raised by option, bond and bond-option pricers

use quant_math::types::MathError;
use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `InvalidParameter`: A market or contract input violates its constraint
/// - `Math`: A numerical routine rejected its input or did not converge
/// - `InvalidConfig`: A configuration failed validation
///
/// # Examples
/// ```
/// use quant_instruments::error::PricingError;
///
/// let err = PricingError::invalid_parameter("spot", -1.0, "must be positive");
/// assert_eq!(format!("{}", err), "Invalid parameter spot = -1: must be positive");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    /// Invalid market or contract input.
    #[error("Invalid parameter {name} = {value}: {constraint}")]
    InvalidParameter {
        /// Name of the offending input
        name: &'static str,
        /// Value that was supplied
        value: f64,
        /// Constraint that was violated
        constraint: &'static str,
    },

    /// Error from the numerical core.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PricingError {
    /// Builds [`PricingError::InvalidParameter`] and reports it through `tracing`.
    pub fn invalid_parameter(name: &'static str, value: f64, constraint: &'static str) -> Self {
        tracing::warn!(name, value, constraint, "invalid pricing parameter");
        PricingError::InvalidParameter {
            name,
            value,
            constraint,
        }
    }

    /// Builds [`PricingError::InvalidConfig`] and reports it through `tracing`.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!(%message, "invalid pricing configuration");
        PricingError::InvalidConfig(message)
    }
}
