//! Simulation parameter bundle.

use qsim_core::types::SimResult;
use qsim_core::validation::{require_count, require_finite, require_non_negative, require_positive};

/// Immutable parameters of a one-dimensional path simulation.
///
/// The same bundle serves both supported dynamics:
///
/// | Field | GBM | Mean-reverting |
/// |-------|-----|----------------|
/// | `initial_value` | S₀ | r₀ / x₀ |
/// | `drift` | μ (or r under Q) | κ, mean-reversion speed |
/// | `long_run_mean` | unused | θ |
/// | `volatility` | σ | σ |
///
/// # Invariants
///
/// `horizon > 0`, `steps >= 1`, `paths >= 1`, `volatility >= 0`, all values finite.
///
/// # Examples
///
/// ```rust
/// use qsim_engine::SimulationParameters;
///
/// let params = SimulationParameters::gbm(100.0, 0.05, 0.2, 1.0, 252, 1_000);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.dt(), 1.0 / 252.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationParameters {
    /// Value at t = 0.
    pub initial_value: f64,
    /// GBM drift, or mean-reversion speed κ for mean-reverting dynamics.
    pub drift: f64,
    /// Long-run mean θ (mean-reverting dynamics only).
    pub long_run_mean: f64,
    /// Diffusion coefficient σ.
    pub volatility: f64,
    /// Time horizon T.
    pub horizon: f64,
    /// Number of time steps N.
    pub steps: usize,
    /// Number of paths M.
    pub paths: usize,
}

impl SimulationParameters {
    /// Parameters for geometric Brownian motion.
    pub fn gbm(
        initial_value: f64,
        drift: f64,
        volatility: f64,
        horizon: f64,
        steps: usize,
        paths: usize,
    ) -> Self {
        Self {
            initial_value,
            drift,
            long_run_mean: 0.0,
            volatility,
            horizon,
            steps,
            paths,
        }
    }

    /// Parameters for a mean-reverting (Vasicek / Ornstein-Uhlenbeck) process.
    pub fn mean_reverting(
        initial_value: f64,
        speed: f64,
        long_run_mean: f64,
        volatility: f64,
        horizon: f64,
        steps: usize,
        paths: usize,
    ) -> Self {
        Self {
            initial_value,
            drift: speed,
            long_run_mean,
            volatility,
            horizon,
            steps,
            paths,
        }
    }

    /// Time step `horizon / steps`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.horizon / self.steps as f64
    }

    /// Validates the invariants.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> SimResult<()> {
        require_finite("initial_value", self.initial_value)?;
        require_finite("drift", self.drift)?;
        require_finite("long_run_mean", self.long_run_mean)?;
        require_non_negative("volatility", self.volatility)?;
        require_positive("horizon", self.horizon)?;
        require_count("steps", self.steps)?;
        require_count("paths", self.paths)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_reverting_field_mapping() {
        let p = SimulationParameters::mean_reverting(0.1, 0.3, 0.12, 0.03, 1.0, 200, 1000);
        assert_eq!(p.drift, 0.3);
        assert_eq!(p.long_run_mean, 0.12);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let base = SimulationParameters::gbm(100.0, 0.05, 0.2, 1.0, 10, 10);

        let cases = [
            (SimulationParameters { horizon: 0.0, ..base }, "horizon"),
            (SimulationParameters { steps: 0, ..base }, "steps"),
            (SimulationParameters { paths: 0, ..base }, "paths"),
            (SimulationParameters { volatility: -0.1, ..base }, "volatility"),
            (SimulationParameters { initial_value: f64::NAN, ..base }, "initial_value"),
        ];
        for (params, name) in cases {
            assert_eq!(params.validate().unwrap_err().parameter(), name);
        }
    }
}
