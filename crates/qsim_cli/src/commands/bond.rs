//! Bond command implementation
//!
//! Prices a zero-coupon bond by simulating short-rate paths and compares the
//! estimate with the Vasicek closed form.

use clap::Args;
use qsim_pricing::{vasicek_zero_coupon_price, BondContract, BondPathPricer, PricingResult};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{emit, OutputFormat, Table};
use crate::Result;

/// Arguments of `qsim bond`.
#[derive(Debug, Clone, Args)]
pub struct BondArgs {
    /// Face value paid at maturity
    #[arg(long, default_value_t = 1_000.0)]
    pub face: f64,

    /// Initial short rate
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    pub r0: f64,

    /// Mean-reversion speed
    #[arg(long, default_value_t = 0.3)]
    pub kappa: f64,

    /// Long-run mean rate
    #[arg(long, default_value_t = 0.12, allow_negative_numbers = true)]
    pub theta: f64,

    /// Short-rate volatility
    #[arg(long, default_value_t = 0.03)]
    pub sigma: f64,

    /// Maturity in years
    #[arg(long, default_value_t = 1.0)]
    pub maturity: f64,

    /// Time steps per path (defaults to the configured value)
    #[arg(long)]
    pub steps: Option<usize>,

    /// Monte Carlo iterations (defaults to the configured value)
    #[arg(long)]
    pub iterations: Option<usize>,
}

impl Default for BondArgs {
    fn default() -> Self {
        Self {
            face: 1_000.0,
            r0: 0.1,
            kappa: 0.3,
            theta: 0.12,
            sigma: 0.03,
            maturity: 1.0,
            steps: None,
            iterations: None,
        }
    }
}

/// Result of `qsim bond`.
#[derive(Debug, Clone, Serialize)]
pub struct BondReport {
    pub contract: BondContract,
    pub steps: usize,
    pub monte_carlo: PricingResult,
    pub vasicek: f64,
    pub seed: u64,
}

/// Prices the bond.
pub fn evaluate(args: &BondArgs, config: &CliConfig) -> Result<BondReport> {
    let contract = BondContract::new(
        args.face,
        args.r0,
        args.kappa,
        args.theta,
        args.sigma,
        args.maturity,
    );
    let steps = args.steps.unwrap_or(config.simulation.steps);
    let iterations = args.iterations.unwrap_or(config.simulation.iterations);

    let mut pricer = BondPathPricer::new(super::simulator(config)?);
    let monte_carlo = pricer.price_with_error(&contract, steps, iterations)?;

    Ok(BondReport {
        contract,
        steps,
        monte_carlo,
        vasicek: vasicek_zero_coupon_price(&contract),
        seed: pricer.simulator().seed(),
    })
}

/// Run the bond command
pub fn run(args: &BondArgs, config: &CliConfig, format: OutputFormat) -> Result<()> {
    info!("Starting bond pricing...");
    let report = evaluate(args, config)?;
    info!("Bond pricing complete");

    emit(format, &report, |r| {
        Table::new("Zero-coupon bond")
            .number("Face", r.contract.face)
            .number("Monte Carlo price", r.monte_carlo.price)
            .number("Standard error", r.monte_carlo.std_error)
            .number("Vasicek", r.vasicek)
            .row("Steps", r.steps)
            .row("Iterations", r.monte_carlo.iterations)
            .row("Seed", r.seed)
    })
}
