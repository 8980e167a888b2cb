//! Core types shared by every qsim crate.

pub mod error;

pub use error::{SimResult, SimulationError};
