//! # qsim_core: Foundation for Monte Carlo Simulation
//!
//! ## Layer 1 Role
//!
//! qsim_core is the bottom layer of the workspace and provides:
//! - Error types: `SimulationError` (`types::error`)
//! - Parameter validation helpers (`validation`)
//! - Standard normal distribution functions (`math::distributions`)
//! - Sample statistics, empirical quantiles and log-return statistics (`math::statistics`)
//! - Simulation defaults loaded from configuration (`config`)
//!
//! Layer 1 has no dependencies on other qsim_* crates.
//!
//! ## Usage Examples
//!
//! ```rust
//! use qsim_core::math::distributions::{norm_cdf, norm_inv_cdf};
//! use qsim_core::math::statistics::empirical_quantile;
//!
//! let z = norm_inv_cdf(0.05);
//! assert!((z + 1.644_853_6).abs() < 1e-6);
//! assert!((norm_cdf(z) - 0.05).abs() < 1e-6);
//!
//! let mut samples = vec![5.0, 1.0, 4.0, 2.0, 3.0];
//! assert_eq!(empirical_quantile(&mut samples, 0.4), 3.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod math;
pub mod types;
pub mod validation;

pub use config::SimulationDefaults;
pub use types::{SimResult, SimulationError};
