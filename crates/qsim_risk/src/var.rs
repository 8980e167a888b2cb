//! Value-at-Risk estimation.
//!
//! Two estimators of the loss not exceeded with probability `c` over a
//! horizon of `n` periods:
//!
//! - **Monte Carlo**: simulate `M` GBM terminal values from `S` with drift
//!   `mu`, take the empirical `(1 − c)`-quantile `q` and report `S − q`.
//! - **Parametric**: assume normal i.i.d. period returns and report
//!   `S × (mu·n − z·sigma·√n)` with `z = Φ⁻¹(1 − c)`.
//!
//! `mu`, `sigma` and `n` share one time unit (usually trading days).
//!
//! # Quantile convention
//!
//! Lower nearest rank: index `floor((1 − c)·M)` of the ascending order
//! statistics, clamped to `M − 1`. The rounding error of `1 − c` is absorbed,
//! so `c = 0.9` with `M = 10` selects index 1. For a fixed random stream the
//! Monte Carlo VaR is therefore non-decreasing in `c`.

use qsim_core::math::{empirical_quantile, norm_inv_cdf};
use qsim_core::types::SimResult;
use qsim_core::validation::{
    require_count, require_finite, require_non_negative, require_open_unit_interval,
    require_positive,
};
use qsim_engine::{PathSimulator, SimRng, StreamSource};
use tracing::debug;

/// A position whose loss distribution is estimated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskPosition {
    /// Current value S.
    pub value: f64,
    /// Confidence level c in (0, 1).
    pub confidence: f64,
    /// Mean return per period.
    pub mu: f64,
    /// Return volatility per period.
    pub sigma: f64,
    /// Horizon n in periods.
    pub horizon: f64,
    /// Monte Carlo sample size.
    pub iterations: usize,
}

impl RiskPosition {
    /// Creates a position.
    pub fn new(
        value: f64,
        confidence: f64,
        mu: f64,
        sigma: f64,
        horizon: f64,
        iterations: usize,
    ) -> Self {
        Self {
            value,
            confidence,
            mu,
            sigma,
            horizon,
            iterations,
        }
    }

    /// Same position at another confidence level.
    #[must_use]
    pub fn with_confidence(self, confidence: f64) -> Self {
        Self { confidence, ..self }
    }

    /// Validates everything both estimators need.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the value or horizon is not positive, the
    /// confidence is outside (0, 1), sigma is negative, or mu is not finite.
    pub fn validate(&self) -> SimResult<()> {
        require_positive("value", self.value)?;
        require_open_unit_interval("confidence", self.confidence)?;
        require_finite("mu", self.mu)?;
        require_non_negative("sigma", self.sigma)?;
        require_positive("horizon", self.horizon)?;
        Ok(())
    }
}

/// Parametric VaR `S × (mu·n − z·sigma·√n)`, `z = Φ⁻¹(1 − c)`.
///
/// # Errors
///
/// Returns `InvalidParameter` if the position is invalid.
///
/// # Examples
///
/// ```rust
/// use qsim_risk::{parametric_var, RiskPosition};
///
/// let position = RiskPosition::new(1_000_000.0, 0.95, 0.0, 0.02, 1.0, 0);
/// let var = parametric_var(&position).unwrap();
/// assert!((var - 32_897.0).abs() < 1.0);
/// ```
pub fn parametric_var(position: &RiskPosition) -> SimResult<f64> {
    position.validate()?;
    let z = norm_inv_cdf(1.0 - position.confidence);
    let n = position.horizon;
    Ok(position.value * (position.mu * n - z * position.sigma * n.sqrt()))
}

/// Both VaR estimates for one position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarReport {
    /// The position the estimates refer to.
    pub position: RiskPosition,
    /// Simulated estimate.
    pub monte_carlo: f64,
    /// Closed-form estimate.
    pub parametric: f64,
}

impl VarReport {
    /// Monte Carlo minus parametric estimate.
    #[inline]
    pub fn difference(&self) -> f64 {
        self.monte_carlo - self.parametric
    }
}

/// Value-at-Risk estimator.
///
/// # Examples
///
/// ```rust
/// use qsim_engine::PathSimulator;
/// use qsim_risk::{RiskEstimator, RiskPosition};
///
/// let mut estimator = RiskEstimator::new(PathSimulator::with_seed(42));
/// let position = RiskPosition::new(1e6, 0.99, 0.0, 0.01, 1.0, 100_000);
///
/// let report = estimator.report(&position).unwrap();
/// assert!(report.difference().abs() / report.parametric < 0.05);
/// ```
#[derive(Debug)]
pub struct RiskEstimator<R: StreamSource = SimRng> {
    simulator: PathSimulator<R>,
}

impl<R: StreamSource> RiskEstimator<R> {
    /// Creates an estimator on top of `simulator`.
    pub fn new(simulator: PathSimulator<R>) -> Self {
        Self { simulator }
    }

    /// Underlying simulator.
    #[inline]
    pub fn simulator(&self) -> &PathSimulator<R> {
        &self.simulator
    }

    /// Mutable access to the simulator, e.g. to replay a stream with `reset`.
    #[inline]
    pub fn simulator_mut(&mut self) -> &mut PathSimulator<R> {
        &mut self.simulator
    }

    /// Monte Carlo VaR: `S − q` where `q` is the empirical `(1 − c)`-quantile
    /// of simulated terminal values.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the position is invalid or its iteration
    /// count is zero.
    pub fn estimate_var_mc(&mut self, position: &RiskPosition) -> SimResult<f64> {
        position.validate()?;
        require_count("iterations", position.iterations)?;

        let terminal = self.simulator.simulate_gbm_terminal(
            position.value,
            position.mu,
            position.sigma,
            position.horizon,
            position.iterations,
        )?;
        let mut values = terminal.into_vec();
        let percentile = empirical_quantile(&mut values, 1.0 - position.confidence);
        let var = position.value - percentile;

        debug!(
            confidence = position.confidence,
            horizon = position.horizon,
            percentile,
            var,
            "monte carlo VaR estimated"
        );
        Ok(var)
    }

    /// Parametric VaR; see [`parametric_var`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the position is invalid.
    pub fn estimate_var_parametric(&self, position: &RiskPosition) -> SimResult<f64> {
        let var = parametric_var(position)?;
        debug!(confidence = position.confidence, var, "parametric VaR estimated");
        Ok(var)
    }

    /// Runs both estimators.
    ///
    /// # Errors
    ///
    /// As [`estimate_var_mc`](Self::estimate_var_mc).
    pub fn report(&mut self, position: &RiskPosition) -> SimResult<VarReport> {
        let parametric = self.estimate_var_parametric(position)?;
        let monte_carlo = self.estimate_var_mc(position)?;
        Ok(VarReport {
            position: *position,
            monte_carlo,
            parametric,
        })
    }
}
