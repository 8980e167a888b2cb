//! qsim CLI - Monte Carlo pricing and risk from the command line
//!
//! # Commands
//!
//! - `qsim option` - Price a European option and compare with Black-Scholes
//! - `qsim var` - Monte Carlo and parametric Value-at-Risk
//! - `qsim bond` - Price a zero-coupon bond under a mean-reverting short rate
//! - `qsim paths` - Generate GBM, mean-reverting or random-walk paths
//! - `qsim check` - Print the effective configuration
//!
//! # Architecture
//!
//! The **S**ervice layer: it reads configuration, installs logging and
//! drives the pricing and risk crates.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod data;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::bond::BondArgs;
use commands::option::OptionArgs;
use commands::paths::PathsArgs;
use commands::var::VarArgs;
use config::{build_config, CliArgs, CliConfig};
use output::OutputFormat;

/// qsim Monte Carlo CLI
#[derive(Parser)]
#[command(name = "qsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (default: ./qsim.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Run on a single thread
    #[arg(long, global = true)]
    sequential: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option by Monte Carlo
    #[command(name = "option")]
    OptionPrice(OptionArgs),

    /// Estimate Value-at-Risk of a position
    Var(VarArgs),

    /// Price a zero-coupon bond by short-rate simulation
    Bond(BondArgs),

    /// Generate and export simulated paths
    Paths(PathsArgs),

    /// Check the effective configuration
    Check,
}

/// `RUST_LOG` wins; otherwise `--verbose`, otherwise the configured level.
fn log_filter(verbose: bool, config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose {
            "debug"
        } else {
            config.log_level.as_filter_str()
        };
        EnvFilter::new(level)
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = build_config(&CliArgs {
        config_file: cli.config.clone(),
        seed: cli.seed,
        sequential: cli.sequential,
    })?;

    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(cli.verbose, &config))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "configuration loaded");

    match &cli.command {
        Commands::OptionPrice(args) => commands::option::run(args, &config, cli.format),
        Commands::Var(args) => commands::var::run(args, &config, cli.format),
        Commands::Bond(args) => commands::bond::run(args, &config, cli.format),
        Commands::Paths(args) => commands::paths::run(args, &config, cli.format),
        Commands::Check => commands::check::run(&config, cli.format),
    }
}
