//! The path simulator.
//!
//! [`PathSimulator`] owns a seed and a call counter (epoch). Each simulation
//! call takes the next epoch and derives one independent random stream per
//! chunk of paths from `(seed, epoch, chunk)`. Two simulators built with the
//! same seed and configuration therefore replay the same sequence of calls
//! bit-for-bit, whatever the thread count.

use std::marker::PhantomData;

use qsim_core::types::{SimResult, SimulationError};
use qsim_core::validation::{
    require_count, require_finite, require_non_negative, require_positive,
};
use rand::Rng;
use tracing::debug;

use crate::config::EngineConfig;
use crate::parallel::{fill_rows, map_items, StreamPlan};
use crate::paths::{
    fill_random_walk, GbmStep, MeanRevertingStep, PathSet, SimulationParameters, TerminalValueSet,
};
use crate::rng::{SimRng, StreamSource};

/// Seeded generator of sample paths.
///
/// # Examples
///
/// ```rust
/// use qsim_engine::PathSimulator;
///
/// let mut a = PathSimulator::with_seed(7);
/// let mut b = PathSimulator::with_seed(7);
///
/// let x = a.simulate_gbm_terminal(100.0, 0.05, 0.2, 1.0, 1_000).unwrap();
/// let y = b.simulate_gbm_terminal(100.0, 0.05, 0.2, 1.0, 1_000).unwrap();
/// assert_eq!(x, y);
/// ```
#[derive(Debug)]
pub struct PathSimulator<R: StreamSource = SimRng> {
    config: EngineConfig,
    seed: u64,
    epoch: u64,
    _source: PhantomData<fn() -> R>,
}

impl PathSimulator<SimRng> {
    /// Simulator using [`SimRng`] streams and the default configuration with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_parts(EngineConfig::seeded(seed), seed)
    }
}

impl<R: StreamSource> PathSimulator<R> {
    /// Creates a simulator from a configuration.
    ///
    /// Without a configured seed, one is drawn from OS entropy; read it back
    /// with [`seed`](Self::seed) to replay the run.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration is invalid.
    pub fn new(config: EngineConfig) -> SimResult<Self> {
        config.validate()?;
        let seed = config.seed().unwrap_or_else(|| rand::thread_rng().gen());
        Ok(Self::from_parts(config, seed))
    }

    fn from_parts(config: EngineConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            epoch: 0,
            _source: PhantomData,
        }
    }

    /// Seed in use.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Engine configuration.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of simulation calls since construction or the last reset.
    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Rewinds the call counter; the next call replays the first call.
    pub fn reset(&mut self) {
        self.epoch = 0;
    }

    /// Switches to `seed` and rewinds the call counter.
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.epoch = 0;
    }

    fn next_plan(&mut self, n_items: usize) -> StreamPlan {
        let plan = StreamPlan {
            seed: self.seed,
            epoch: self.epoch,
            chunk_size: self.config.chunk_size(),
            parallel: self.config.should_parallelize(n_items),
        };
        self.epoch += 1;
        debug!(
            seed = plan.seed,
            epoch = plan.epoch,
            items = n_items,
            chunks = plan.chunk_count(n_items),
            parallel = plan.parallel,
            "simulation started"
        );
        plan
    }

    /// Evaluates `f` once per path, each call seeing independent randomness,
    /// and returns the results in path order.
    ///
    /// This is the shared map step behind every estimator; callers reduce the
    /// returned values sequentially. `f` also receives a scratch buffer it
    /// may reuse between paths.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `count` is zero.
    pub fn map_paths<T, F>(&mut self, count: usize, f: F) -> SimResult<Vec<T>>
    where
        T: Clone + Default + Send,
        F: Fn(&mut R, &mut Vec<f64>) -> T + Sync,
    {
        require_count("count", count)?;
        let plan = self.next_plan(count);
        Ok(map_items(&plan, count, f))
    }

    /// Draws `count` exact GBM terminal values
    /// `S0 * exp((drift - σ²/2) T + σ √T Z)`.
    ///
    /// With `sigma = 0` every value equals `S0 * exp(drift * T)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `s0 <= 0`, `sigma < 0`, `horizon <= 0`,
    /// `count == 0` or any input is not finite.
    pub fn simulate_gbm_terminal(
        &mut self,
        s0: f64,
        drift: f64,
        sigma: f64,
        horizon: f64,
        count: usize,
    ) -> SimResult<TerminalValueSet> {
        validate_gbm(s0, drift, sigma, horizon)?;
        require_count("count", count)?;

        let step = GbmStep::new(s0, drift, sigma, horizon);
        let plan = self.next_plan(count);
        let values = map_items(&plan, count, |rng: &mut R, _: &mut Vec<f64>| {
            step.sample_terminal(rng)
        });
        Ok(TerminalValueSet::new(values))
    }

    /// Simulates one GBM path of `steps + 1` points with the exact log-space step.
    ///
    /// # Errors
    ///
    /// As [`simulate_gbm_terminal`](Self::simulate_gbm_terminal), plus
    /// `steps == 0`.
    pub fn simulate_gbm_path(
        &mut self,
        s0: f64,
        drift: f64,
        sigma: f64,
        horizon: f64,
        steps: usize,
    ) -> SimResult<Vec<f64>> {
        let params = SimulationParameters::gbm(s0, drift, sigma, horizon, steps, 1);
        Ok(self.simulate_gbm_paths(&params)?.as_slice().to_vec())
    }

    /// Simulates `params.paths` GBM paths.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the parameters are invalid or the initial
    /// value is not positive.
    pub fn simulate_gbm_paths(&mut self, params: &SimulationParameters) -> SimResult<PathSet> {
        params.validate()?;
        require_positive("initial_value", params.initial_value)?;

        let step = GbmStep::new(params.initial_value, params.drift, params.volatility, params.dt());
        self.fill_path_set(params.paths, params.steps, params.horizon, |rng, row| {
            step.fill_path(rng, row)
        })
    }

    /// Simulates one Euler-Maruyama path of `steps + 1` points for
    /// `dx = κ(θ − x) dt + σ dW`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `sigma < 0`, `horizon <= 0`, `steps == 0`
    /// or any input is not finite.
    pub fn simulate_mean_reverting_path(
        &mut self,
        x0: f64,
        kappa: f64,
        theta: f64,
        sigma: f64,
        horizon: f64,
        steps: usize,
    ) -> SimResult<Vec<f64>> {
        let params =
            SimulationParameters::mean_reverting(x0, kappa, theta, sigma, horizon, steps, 1);
        Ok(self.simulate_mean_reverting_paths(&params)?.as_slice().to_vec())
    }

    /// Simulates `params.paths` Euler-Maruyama paths; `params.drift` is the
    /// mean-reversion speed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the parameters are invalid.
    pub fn simulate_mean_reverting_paths(
        &mut self,
        params: &SimulationParameters,
    ) -> SimResult<PathSet> {
        params.validate()?;

        let step = MeanRevertingStep::new(
            params.initial_value,
            params.drift,
            params.long_run_mean,
            params.volatility,
            params.dt(),
        );
        self.fill_path_set(params.paths, params.steps, params.horizon, |rng, row| {
            step.fill_path(rng, row)
        })
    }

    /// Simulates `count` symmetric ±1 random walks of `steps` unit steps,
    /// each starting at zero.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `steps` or `count` is zero.
    pub fn simulate_random_walks(&mut self, steps: usize, count: usize) -> SimResult<PathSet> {
        require_count("steps", steps)?;
        require_count("count", count)?;
        self.fill_path_set(count, steps, steps as f64, |rng, row| fill_random_walk(rng, row))
    }

    /// Calls the single-path generator `path_fn` `count` times, each with an
    /// independent stream position, and collects the paths.
    ///
    /// The paths' time grid is taken as unit steps; use
    /// [`PathSet::with_horizon`] to rescale it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `count` is zero, or (named `path_fn`) if
    /// the generator returns an empty path or paths of different lengths.
    pub fn simulate_many_paths<F>(&mut self, path_fn: F, count: usize) -> SimResult<PathSet>
    where
        F: Fn(&mut R) -> Vec<f64> + Sync,
    {
        let paths = self.map_paths(count, |rng, _| path_fn(rng))?;

        let n_points = paths.first().map_or(0, Vec::len);
        if n_points == 0 || paths.iter().any(|p| p.len() != n_points) {
            return Err(SimulationError::invalid(
                "path_fn",
                "generator must return non-empty paths of equal length",
            ));
        }
        let data: Vec<f64> = paths.into_iter().flatten().collect();
        PathSet::from_row_major(data, count, n_points, (n_points - 1) as f64)
            .ok_or_else(|| SimulationError::invalid("path_fn", "inconsistent path shape"))
    }

    fn fill_path_set<F>(
        &mut self,
        n_paths: usize,
        steps: usize,
        horizon: f64,
        fill: F,
    ) -> SimResult<PathSet>
    where
        F: Fn(&mut R, &mut [f64]) + Sync,
    {
        let n_points = steps + 1;
        let plan = self.next_plan(n_paths);
        let data = fill_rows(&plan, n_paths, n_points, fill);
        PathSet::from_row_major(data, n_paths, n_points, horizon)
            .ok_or_else(|| SimulationError::invalid("paths", "inconsistent path shape"))
    }
}

fn validate_gbm(s0: f64, drift: f64, sigma: f64, horizon: f64) -> SimResult<()> {
    require_positive("s0", s0)?;
    require_finite("drift", drift)?;
    require_non_negative("sigma", sigma)?;
    require_positive("horizon", horizon)?;
    Ok(())
}
