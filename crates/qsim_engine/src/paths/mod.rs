//! Path generation.
//!
//! Single-path kernels, generic over [`RandomSource`](crate::rng::RandomSource):
//!
//! - [`GbmStep`]: exact GBM step, used for terminal values and full paths
//! - [`MeanRevertingStep`]: Euler-Maruyama step for `dx = κ(θ − x) dt + σ dW`
//! - [`fill_random_walk`]: symmetric ±1 walk
//!
//! Kernels write into caller-provided slices and never allocate; the
//! [`PathSimulator`](crate::PathSimulator) decides where each path lives.

mod gbm;
mod mean_reverting;
mod params;
mod random_walk;
mod set;

pub use gbm::GbmStep;
pub use mean_reverting::MeanRevertingStep;
pub use params::SimulationParameters;
pub use random_walk::fill_random_walk;
pub use set::{PathSet, TerminalValueSet};
