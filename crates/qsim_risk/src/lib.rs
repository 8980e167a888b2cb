//! # qsim_risk (L4: Risk)
//!
//! Value-at-Risk of a single position, by simulation and in closed form.
//!
//! This crate provides:
//! - `RiskPosition`: value, confidence, return drift and volatility, horizon
//! - `RiskEstimator`: Monte Carlo VaR on exact GBM terminal values
//! - `parametric_var`: normal-returns VaR
//! - `VarReport`: both estimates side by side
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             qsim_risk (L4)              │
//! │  var/ - RiskPosition, RiskEstimator     │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │            qsim_engine (L2)             │
//! │  PathSimulator, seeded random streams   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use qsim_engine::PathSimulator;
//! use qsim_risk::{RiskEstimator, RiskPosition};
//!
//! let position = RiskPosition::new(1_000_000.0, 0.95, 0.0, 0.02, 1.0, 100_000);
//! let mut estimator = RiskEstimator::new(PathSimulator::with_seed(7));
//!
//! let mc = estimator.estimate_var_mc(&position).unwrap();
//! let parametric = estimator.estimate_var_parametric(&position).unwrap();
//! assert!((mc - parametric).abs() / parametric < 0.05);
//! ```

#![warn(missing_docs)]

pub mod var;

pub use var::{parametric_var, RiskEstimator, RiskPosition, VarReport};
