//! Error types for structured error handling.
//!
//! This module provides:
//! - `MathError`: Errors raised by special functions, quadrature,
//!   distributions, root finding and finite differences

use thiserror::Error;

/// Categorised numerical errors.
///
/// Every invalid argument is detected at call entry and reported as
/// [`MathError::Domain`]; nothing is clamped or silently corrected.
/// Iterative routines that exhaust their iteration cap report
/// [`MathError::ConvergenceFailure`].
///
/// Truncated series (₀F₁, noncentral chi-squared cdf) never produce an
/// error purely because their term cap was reached.
///
/// # Examples
/// ```
/// use quant_math::types::MathError;
///
/// let err = MathError::domain("factorial", "n must be non-negative, got -1");
/// assert_eq!(
///     format!("{}", err),
///     "Domain error in factorial: n must be non-negative, got -1"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MathError {
    /// Invalid parameter passed to a numerical routine.
    #[error("Domain error in {context}: {message}")]
    Domain {
        /// Name of the routine that rejected the input
        context: String,
        /// Description of the violated precondition
        message: String,
    },

    /// Iterative method did not meet its tolerance within the iteration cap.
    #[error("{method} failed to converge after {iterations} iterations (last estimate {last_estimate})")]
    ConvergenceFailure {
        /// Name of the iterative method
        method: String,
        /// Number of iterations performed
        iterations: usize,
        /// Last estimate produced before giving up
        last_estimate: f64,
    },
}

impl MathError {
    /// Builds a [`MathError::Domain`] and reports it through `tracing`.
    pub fn domain(context: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!(context, %message, "domain error");
        MathError::Domain {
            context: context.to_string(),
            message,
        }
    }

    /// Builds a [`MathError::ConvergenceFailure`] and reports it through `tracing`.
    pub fn convergence_failure(method: &'static str, iterations: usize, last_estimate: f64) -> Self {
        tracing::warn!(method, iterations, last_estimate, "convergence failure");
        MathError::ConvergenceFailure {
            method: method.to_string(),
            iterations,
            last_estimate,
        }
    }

    /// Returns `true` for [`MathError::Domain`].
    #[inline]
    pub fn is_domain(&self) -> bool {
        matches!(self, MathError::Domain { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_display() {
        let err = MathError::domain("simpson", "n must be at least 1, got 0");
        assert_eq!(
            format!("{}", err),
            "Domain error in simpson: n must be at least 1, got 0"
        );
        assert!(err.is_domain());
    }

    #[test]
    fn test_convergence_failure_display() {
        let err = MathError::convergence_failure("bisection", 200, 1.5);
        let msg = format!("{}", err);
        assert!(msg.contains("bisection"));
        assert!(msg.contains("200"));
        assert!(!err.is_domain());
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = MathError::domain("factorial", "negative input");
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = MathError::domain("binomial", "bad k");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
