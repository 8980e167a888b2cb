//! European option pricing by terminal-value simulation.
//!
//! Under the risk-neutral measure the underlying drifts at the risk-free rate,
//! so the pricer simulates
//!
//! ```text
//! S_T = S0 × exp((r − σ²/2) T + σ √T × Z)
//! ```
//!
//! exactly, averages the payoff and discounts by `exp(−r T)`. The standard
//! error shrinks as `1/√iterations`; there is no adaptive stopping.

use qsim_core::config::DEFAULT_ITERATIONS;
use qsim_core::math::SampleStatistics;
use qsim_core::types::SimResult;
use qsim_core::validation::{require_count, require_finite, require_non_negative, require_positive};
use qsim_engine::{PathSimulator, SimRng, StreamSource};
use tracing::debug;

use crate::result::PricingResult;

/// Call or put.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionKind {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionKind {
    /// Payoff at expiry for terminal price `terminal`.
    #[inline]
    pub fn payoff(self, terminal: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (terminal - strike).max(0.0),
            OptionKind::Put => (strike - terminal).max(0.0),
        }
    }
}

/// A European option on a non-dividend-paying asset.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionContract {
    /// Spot price S0.
    pub spot: f64,
    /// Strike E.
    pub strike: f64,
    /// Maturity T in years.
    pub maturity: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Annualised volatility σ.
    pub volatility: f64,
    /// Call or put.
    pub kind: OptionKind,
}

impl OptionContract {
    /// Creates a contract.
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
        kind: OptionKind,
    ) -> Self {
        Self {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            kind,
        }
    }

    /// Same contract with the other option kind.
    #[must_use]
    pub fn with_kind(self, kind: OptionKind) -> Self {
        Self { kind, ..self }
    }

    /// Discount factor `exp(−r T)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Validates the contract.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if spot, strike or maturity is not positive,
    /// volatility is negative, or any field is not finite.
    pub fn validate(&self) -> SimResult<()> {
        require_positive("spot", self.spot)?;
        require_positive("strike", self.strike)?;
        require_positive("maturity", self.maturity)?;
        require_finite("rate", self.rate)?;
        require_non_negative("volatility", self.volatility)?;
        Ok(())
    }
}

/// Monte Carlo pricer for European options.
///
/// # Examples
///
/// ```rust
/// use qsim_engine::PathSimulator;
/// use qsim_pricing::{OptionContract, OptionKind, OptionPricer};
///
/// let mut pricer = OptionPricer::new(PathSimulator::with_seed(42), 50_000);
/// let call = OptionContract::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionKind::Call);
///
/// let result = pricer.price_with_error(&call).unwrap();
/// assert!((result.price - 10.45).abs() < 4.0 * result.std_error + 0.01);
/// ```
#[derive(Debug)]
pub struct OptionPricer<R: StreamSource = SimRng> {
    simulator: PathSimulator<R>,
    iterations: usize,
}

impl<R: StreamSource> OptionPricer<R> {
    /// Creates a pricer drawing `iterations` terminal values per price.
    pub fn new(simulator: PathSimulator<R>, iterations: usize) -> Self {
        Self {
            simulator,
            iterations,
        }
    }

    /// Creates a pricer with the default iteration count.
    pub fn with_default_iterations(simulator: PathSimulator<R>) -> Self {
        Self::new(simulator, DEFAULT_ITERATIONS)
    }

    /// Iterations per price.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Changes the iteration count.
    pub fn set_iterations(&mut self, iterations: usize) {
        self.iterations = iterations;
    }

    /// Underlying simulator.
    #[inline]
    pub fn simulator(&self) -> &PathSimulator<R> {
        &self.simulator
    }

    /// Mutable access to the simulator, e.g. to reset it.
    #[inline]
    pub fn simulator_mut(&mut self) -> &mut PathSimulator<R> {
        &mut self.simulator
    }

    /// Returns the simulator.
    pub fn into_simulator(self) -> PathSimulator<R> {
        self.simulator
    }

    /// Estimates the present value.
    ///
    /// # Errors
    ///
    /// See [`price_with_error`](Self::price_with_error).
    pub fn price(&mut self, contract: &OptionContract) -> SimResult<f64> {
        Ok(self.price_with_error(contract)?.price)
    }

    /// Estimates the present value and its standard error.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the contract is invalid or the iteration
    /// count is zero. Nothing is simulated in that case.
    pub fn price_with_error(&mut self, contract: &OptionContract) -> SimResult<PricingResult> {
        contract.validate()?;
        require_count("iterations", self.iterations)?;

        let terminal = self.simulator.simulate_gbm_terminal(
            contract.spot,
            contract.rate,
            contract.volatility,
            contract.maturity,
            self.iterations,
        )?;
        let payoffs: Vec<f64> = terminal
            .as_slice()
            .iter()
            .map(|&s| contract.kind.payoff(s, contract.strike))
            .collect();

        let stats = SampleStatistics::from_samples(&payoffs).scaled(contract.discount_factor());
        let result = PricingResult::from_statistics(stats);
        debug!(
            kind = ?contract.kind,
            price = result.price,
            std_error = result.std_error,
            iterations = result.iterations,
            "option priced"
        );
        Ok(result)
    }
}
