//! CLI command implementations
//!
//! Each submodule implements one subcommand as an `evaluate` step that
//! returns a serialisable report and a `run` step that prints it.

pub mod bond;
pub mod check;
pub mod option;
pub mod paths;
pub mod var;

use qsim_engine::PathSimulator;

use crate::config::CliConfig;
use crate::Result;

/// Simulator configured for this run.
pub(crate) fn simulator(config: &CliConfig) -> Result<PathSimulator> {
    Ok(PathSimulator::new(config.engine_config()?)?)
}
