//! Option command implementation
//!
//! Prices a European call or put by Monte Carlo and prints the
//! Black-Scholes value next to it.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use qsim_core::math::LogReturnStats;
use qsim_pricing::{
    black_scholes_price, OptionContract, OptionKind, OptionPricer, PricingResult,
};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::data::read_price_column;
use crate::output::{emit, OutputFormat, Table};
use crate::{CliError, Result};

/// Option type accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Call,
    Put,
}

impl From<KindArg> for OptionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Call => OptionKind::Call,
            KindArg::Put => OptionKind::Put,
        }
    }
}

/// Arguments of `qsim option`.
#[derive(Debug, Clone, Args)]
pub struct OptionArgs {
    /// Spot price (defaults to the last price with --prices, else 100)
    #[arg(long)]
    pub spot: Option<f64>,

    /// Strike price
    #[arg(long, default_value_t = 100.0)]
    pub strike: f64,

    /// Time to maturity in years
    #[arg(long, default_value_t = 1.0)]
    pub maturity: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    pub rate: f64,

    /// Annualised volatility (estimated from --prices when omitted)
    #[arg(long)]
    pub volatility: Option<f64>,

    /// Call or put
    #[arg(long, value_enum, default_value = "call")]
    pub kind: KindArg,

    /// Monte Carlo iterations (defaults to the configured value)
    #[arg(long)]
    pub iterations: Option<usize>,

    /// CSV file of historical prices
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// Price column in the CSV file
    #[arg(long, default_value = "close")]
    pub column: String,
}

impl Default for OptionArgs {
    fn default() -> Self {
        Self {
            spot: None,
            strike: 100.0,
            maturity: 1.0,
            rate: 0.05,
            volatility: None,
            kind: KindArg::Call,
            iterations: None,
            prices: None,
            column: "close".to_string(),
        }
    }
}

const DEFAULT_SPOT: f64 = 100.0;
const DEFAULT_VOLATILITY: f64 = 0.2;

/// Result of `qsim option`.
#[derive(Debug, Clone, Serialize)]
pub struct OptionReport {
    pub contract: OptionContract,
    pub monte_carlo: PricingResult,
    pub confidence_95: f64,
    pub black_scholes: f64,
    pub seed: u64,
}

/// Builds the contract, estimating volatility from a price file when asked.
pub fn contract_from_args(args: &OptionArgs, config: &CliConfig) -> Result<OptionContract> {
    let history = match &args.prices {
        Some(path) => Some(read_price_column(path, &args.column)?),
        None => None,
    };

    let spot = match (args.spot, &history) {
        (Some(spot), _) => spot,
        (None, Some(prices)) => *prices
            .last()
            .ok_or_else(|| CliError::InvalidArgument("price file has no rows".to_string()))?,
        (None, None) => DEFAULT_SPOT,
    };

    let volatility = match (args.volatility, &history) {
        (Some(volatility), _) => volatility,
        (None, Some(prices)) => {
            let stats = LogReturnStats::from_prices(prices)?;
            let (_, annual) = stats.scaled_to(config.simulation.trading_days_per_year);
            info!(
                "Estimated volatility {:.4} from {} returns",
                annual, stats.observations
            );
            annual
        }
        (None, None) => DEFAULT_VOLATILITY,
    };

    Ok(OptionContract::new(
        spot,
        args.strike,
        args.maturity,
        args.rate,
        volatility,
        args.kind.into(),
    ))
}

/// Prices the option.
pub fn evaluate(args: &OptionArgs, config: &CliConfig) -> Result<OptionReport> {
    let contract = contract_from_args(args, config)?;
    let iterations = args.iterations.unwrap_or(config.simulation.iterations);

    let mut pricer = OptionPricer::new(super::simulator(config)?, iterations);
    let monte_carlo = pricer.price_with_error(&contract)?;

    Ok(OptionReport {
        contract,
        monte_carlo,
        confidence_95: monte_carlo.confidence_95(),
        black_scholes: black_scholes_price(&contract),
        seed: pricer.simulator().seed(),
    })
}

/// Run the option command
pub fn run(args: &OptionArgs, config: &CliConfig, format: OutputFormat) -> Result<()> {
    info!("Starting option pricing...");
    let report = evaluate(args, config)?;
    info!("Option pricing complete");

    emit(format, &report, |r| {
        Table::new(format!("European {:?} option", r.contract.kind))
            .number("Spot", r.contract.spot)
            .number("Strike", r.contract.strike)
            .number("Volatility", r.contract.volatility)
            .number("Monte Carlo price", r.monte_carlo.price)
            .number("Standard error", r.monte_carlo.std_error)
            .row(
                "95% interval",
                format!(
                    "[{:.6}, {:.6}]",
                    r.monte_carlo.price - r.confidence_95,
                    r.monte_carlo.price + r.confidence_95
                ),
            )
            .number("Black-Scholes", r.black_scholes)
            .row("Iterations", r.monte_carlo.iterations)
            .row("Seed", r.seed)
    })
}
