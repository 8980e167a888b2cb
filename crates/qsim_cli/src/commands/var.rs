//! VaR command implementation
//!
//! Estimates the Value-at-Risk of a single position. Return drift and
//! volatility come either from flags or from a historical price file, in
//! which case the horizon is counted in the file's observation periods.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use qsim_core::math::LogReturnStats;
use qsim_risk::{RiskEstimator, RiskPosition};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::data::read_price_column;
use crate::output::{emit, OutputFormat, Table};
use crate::{CliError, Result};

/// Which estimator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarMethod {
    /// Simulated terminal values.
    Mc,
    /// Normal-returns closed form.
    Parametric,
    /// Both estimators.
    #[default]
    Both,
}

/// Arguments of `qsim var`.
#[derive(Debug, Clone, Args)]
pub struct VarArgs {
    /// Position value
    #[arg(long, default_value_t = 1_000_000.0)]
    pub value: f64,

    /// Confidence level in (0, 1)
    #[arg(long, default_value_t = 0.95)]
    pub confidence: f64,

    /// Mean return per period
    #[arg(long, requires = "sigma", conflicts_with = "prices", allow_negative_numbers = true)]
    pub mu: Option<f64>,

    /// Return volatility per period
    #[arg(long, requires = "mu", conflicts_with = "prices")]
    pub sigma: Option<f64>,

    /// CSV file of historical prices
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// Price column in the CSV file
    #[arg(long, default_value = "close")]
    pub column: String,

    /// Horizon in periods
    #[arg(long, default_value_t = 1.0)]
    pub horizon: f64,

    /// Monte Carlo iterations (defaults to the configured value)
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Estimator to run
    #[arg(long, value_enum, default_value = "both")]
    pub method: VarMethod,
}

impl Default for VarArgs {
    fn default() -> Self {
        Self {
            value: 1_000_000.0,
            confidence: 0.95,
            mu: None,
            sigma: None,
            prices: None,
            column: "close".to_string(),
            horizon: 1.0,
            iterations: None,
            method: VarMethod::Both,
        }
    }
}

/// Result of `qsim var`.
#[derive(Debug, Clone, Serialize)]
pub struct VarOutcome {
    pub position: RiskPosition,
    pub method: VarMethod,
    pub monte_carlo: Option<f64>,
    pub parametric: Option<f64>,
    pub seed: u64,
}

/// Resolves per-period drift and volatility.
pub fn return_parameters(args: &VarArgs) -> Result<(f64, f64)> {
    match (args.mu, args.sigma, &args.prices) {
        (Some(mu), Some(sigma), None) => Ok((mu, sigma)),
        (None, None, Some(path)) => {
            let prices = read_price_column(path, &args.column)?;
            let stats = LogReturnStats::from_prices(&prices)?;
            info!(
                "Estimated mu {:.6}, sigma {:.6} from {} returns",
                stats.mean, stats.std_dev, stats.observations
            );
            Ok((stats.mean, stats.std_dev))
        }
        (_, _, Some(_)) => Err(CliError::InvalidArgument(
            "--prices cannot be combined with --mu/--sigma".to_string(),
        )),
        _ => Err(CliError::InvalidArgument(
            "either --mu and --sigma or --prices is required".to_string(),
        )),
    }
}

/// Runs the requested estimators.
pub fn evaluate(args: &VarArgs, config: &CliConfig) -> Result<VarOutcome> {
    let (mu, sigma) = return_parameters(args)?;
    let position = RiskPosition::new(
        args.value,
        args.confidence,
        mu,
        sigma,
        args.horizon,
        args.iterations.unwrap_or(config.simulation.iterations),
    );

    let mut estimator = RiskEstimator::new(super::simulator(config)?);
    let parametric = match args.method {
        VarMethod::Parametric | VarMethod::Both => {
            Some(estimator.estimate_var_parametric(&position)?)
        }
        VarMethod::Mc => None,
    };
    let monte_carlo = match args.method {
        VarMethod::Mc | VarMethod::Both => Some(estimator.estimate_var_mc(&position)?),
        VarMethod::Parametric => None,
    };

    Ok(VarOutcome {
        position,
        method: args.method,
        monte_carlo,
        parametric,
        seed: estimator.simulator().seed(),
    })
}

/// Run the var command
pub fn run(args: &VarArgs, config: &CliConfig, format: OutputFormat) -> Result<()> {
    info!("Starting VaR estimation...");
    let outcome = evaluate(args, config)?;
    info!("VaR estimation complete");

    emit(format, &outcome, |o| {
        let mut table = Table::new(format!("Value-at-Risk at {}", o.position.confidence))
            .number("Position value", o.position.value)
            .number("mu", o.position.mu)
            .number("sigma", o.position.sigma)
            .number("Horizon", o.position.horizon);
        if let Some(var) = o.monte_carlo {
            table = table
                .number("Monte Carlo VaR", var)
                .row("Iterations", o.position.iterations);
        }
        if let Some(var) = o.parametric {
            table = table.number("Parametric VaR", var);
        }
        table.row("Seed", o.seed)
    })
}
