//! # qsim_engine: Stochastic Path Simulation (Layer 2)
//!
//! ## Layer 2 Role
//!
//! qsim_engine generates sample paths of one-dimensional stochastic processes:
//! - Random source abstraction and the seeded `SimRng` (`rng`)
//! - Path kernels: exact GBM, Euler-Maruyama mean reversion, ±1 random walk (`paths`)
//! - `PathSet` / `TerminalValueSet` outputs
//! - `PathSimulator`, which owns the seed and schedules work (`simulator`)
//! - The chunked map primitive shared by all estimators (`parallel`)
//!
//! Depends only on qsim_core (Layer 1).
//!
//! ## Determinism
//!
//! Given a seed, every call produces the same numbers whether chunks run on one
//! thread or many. Parallelism is controlled by [`EngineConfig`].
//!
//! ## Usage Example
//!
//! ```rust
//! use qsim_engine::{EngineConfig, PathSimulator, SimulationParameters};
//!
//! let config = EngineConfig::builder().seed(2024).build().unwrap();
//! let mut sim: PathSimulator = PathSimulator::new(config).unwrap();
//!
//! let params = SimulationParameters::mean_reverting(0.05, 0.3, 0.04, 0.01, 1.0, 100, 500);
//! let rates = sim.simulate_mean_reverting_paths(&params).unwrap();
//! assert_eq!(rates.n_paths(), 500);
//! assert_eq!(rates.n_points(), 101);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod parallel;
pub mod paths;
pub mod rng;
pub mod simulator;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use paths::{PathSet, SimulationParameters, TerminalValueSet};
pub use rng::{RandomSource, SimRng, StreamSource};
pub use simulator::PathSimulator;
