//! Parameter validation helpers.
//!
//! Each helper returns the checked value on success so that constructors can
//! validate and bind in one expression:
//!
//! ```rust
//! use qsim_core::validation::{require_count, require_positive};
//!
//! let horizon = require_positive("horizon", 1.0).unwrap();
//! let steps = require_count("steps", 252).unwrap();
//! assert_eq!((horizon, steps), (1.0, 252));
//!
//! assert!(require_positive("horizon", 0.0).is_err());
//! ```

use crate::types::{SimResult, SimulationError};

/// Rejects NaN and infinite values.
#[inline]
pub fn require_finite(name: &'static str, value: f64) -> SimResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimulationError::invalid(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}

/// Requires a finite value strictly greater than zero.
#[inline]
pub fn require_positive(name: &'static str, value: f64) -> SimResult<f64> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::invalid(
            name,
            format!("must be positive, got {}", value),
        ))
    }
}

/// Requires a finite value greater than or equal to zero.
#[inline]
pub fn require_non_negative(name: &'static str, value: f64) -> SimResult<f64> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::invalid(
            name,
            format!("must be non-negative, got {}", value),
        ))
    }
}

/// Requires a value in the open interval (0, 1).
#[inline]
pub fn require_open_unit_interval(name: &'static str, value: f64) -> SimResult<f64> {
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(SimulationError::invalid(
            name,
            format!("must lie in (0, 1), got {}", value),
        ))
    }
}

/// Requires a count of at least one.
#[inline]
pub fn require_count(name: &'static str, value: usize) -> SimResult<usize> {
    if value >= 1 {
        Ok(value)
    } else {
        Err(SimulationError::invalid(name, "must be at least 1, got 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_finite() {
        assert_eq!(require_finite("x", -3.5), Ok(-3.5));
        assert!(require_finite("x", f64::NAN).is_err());
        assert!(require_finite("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("maturity", 0.5), Ok(0.5));
        assert!(require_positive("maturity", 0.0).is_err());
        assert!(require_positive("maturity", -1.0).is_err());
        assert!(require_positive("maturity", f64::NAN).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert_eq!(require_non_negative("volatility", 0.0), Ok(0.0));
        let err = require_non_negative("volatility", -0.1).unwrap_err();
        assert_eq!(err.parameter(), "volatility");
    }

    #[test]
    fn test_require_open_unit_interval() {
        assert_eq!(require_open_unit_interval("confidence", 0.95), Ok(0.95));
        assert!(require_open_unit_interval("confidence", 0.0).is_err());
        assert!(require_open_unit_interval("confidence", 1.0).is_err());
        assert!(require_open_unit_interval("confidence", f64::NAN).is_err());
    }

    #[test]
    fn test_require_count() {
        assert_eq!(require_count("iterations", 1), Ok(1));
        assert!(require_count("iterations", 0).is_err());
    }
}
