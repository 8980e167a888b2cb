//! Simulation defaults.
//!
//! Iteration counts, grid sizes and calendar conventions are plain
//! configuration values passed explicitly into each call. They deserialise
//! from a `[simulation]` TOML table; missing keys fall back to the defaults
//! below.
//!
//! ```rust
//! use qsim_core::config::SimulationDefaults;
//!
//! let defaults = SimulationDefaults::default();
//! assert_eq!(defaults.iterations, 100_000);
//! assert_eq!(defaults.steps, 200);
//! assert_eq!(defaults.trading_days_per_year, 252.0);
//! assert!(defaults.seed.is_none());
//! ```

use crate::types::SimResult;
use crate::validation::{require_count, require_positive};
use serde::{Deserialize, Serialize};

/// Default number of Monte Carlo realisations for pricing and VaR.
pub const DEFAULT_ITERATIONS: usize = 100_000;

/// Default number of time steps for full-path simulation.
pub const DEFAULT_STEPS: usize = 200;

/// Default number of paths when a whole `PathSet` is materialised.
pub const DEFAULT_PATH_COUNT: usize = 1_000;

/// Trading days per year used to annualise daily statistics.
pub const DEFAULT_TRADING_DAYS: f64 = 252.0;

/// Default simulation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationDefaults {
    /// Monte Carlo realisations for pricing and risk estimates.
    pub iterations: usize,
    /// Time steps per simulated path.
    pub steps: usize,
    /// Paths generated when the full path set is requested.
    pub path_count: usize,
    /// Trading days per year.
    pub trading_days_per_year: f64,
    /// Seed for reproducible runs; `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            steps: DEFAULT_STEPS,
            path_count: DEFAULT_PATH_COUNT,
            trading_days_per_year: DEFAULT_TRADING_DAYS,
            seed: None,
        }
    }
}

impl SimulationDefaults {
    /// Validates every field.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for zero counts or a non-positive day count.
    pub fn validate(&self) -> SimResult<()> {
        require_count("iterations", self.iterations)?;
        require_count("steps", self.steps)?;
        require_count("path_count", self.path_count)?;
        require_positive("trading_days_per_year", self.trading_days_per_year)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SimulationDefaults::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let defaults: SimulationDefaults = toml::from_str("iterations = 5000\nseed = 7").unwrap();
        assert_eq!(defaults.iterations, 5000);
        assert_eq!(defaults.seed, Some(7));
        assert_eq!(defaults.steps, DEFAULT_STEPS);
        assert_eq!(defaults.path_count, DEFAULT_PATH_COUNT);
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let defaults = SimulationDefaults {
            iterations: 0,
            ..Default::default()
        };
        let err = defaults.validate().unwrap_err();
        assert_eq!(err.parameter(), "iterations");
    }
}
