//! Error types for structured error handling.
//!
//! Every simulation, pricing and risk operation validates its inputs before
//! drawing a single random number. A bad input surfaces as
//! [`SimulationError::InvalidParameter`]; there is no recoverable failure inside
//! the simulation loops themselves.

use thiserror::Error;

/// Errors raised by simulation, pricing and risk operations.
///
/// # Examples
/// ```
/// use qsim_core::types::SimulationError;
///
/// let err = SimulationError::invalid("horizon", "must be positive, got 0");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'horizon': must be positive, got 0"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Caller supplied an out-of-range or non-finite parameter.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of why the value was rejected.
        reason: String,
    },
}

impl SimulationError {
    /// Builds an [`SimulationError::InvalidParameter`].
    #[inline]
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidParameter { name, .. } => name,
        }
    }
}

/// Result alias used throughout the workspace.
pub type SimResult<T> = Result<T, SimulationError>;
