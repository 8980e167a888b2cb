//! Paths command implementation
//!
//! Generates a set of GBM, mean-reverting or random-walk paths, optionally
//! writes them as CSV for plotting, and prints a summary of the set.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use qsim_engine::{PathSet, SimulationParameters};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::data::write_paths_csv;
use crate::output::{emit, OutputFormat, Table};
use crate::Result;

/// Number of mean-path checkpoints in the summary.
const CHECKPOINTS: usize = 5;

/// Path process to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Process {
    /// Geometric Brownian motion, exact log-space steps.
    Gbm,
    /// Euler-Maruyama `dx = speed (mean - x) dt + sigma dW`.
    MeanReverting,
    /// Symmetric ±1 walk from zero; the horizon is the step count.
    Walk,
}

/// Arguments of `qsim paths`.
#[derive(Debug, Clone, Args)]
pub struct PathsArgs {
    /// Process to simulate
    #[arg(long, value_enum, default_value = "gbm")]
    pub process: Process,

    /// Starting value (100 for gbm, 0.1 for mean-reverting)
    #[arg(long, allow_negative_numbers = true)]
    pub initial: Option<f64>,

    /// GBM drift
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    pub drift: f64,

    /// Mean-reversion speed
    #[arg(long, default_value_t = 0.3)]
    pub speed: f64,

    /// Long-run mean
    #[arg(long, default_value_t = 0.12, allow_negative_numbers = true)]
    pub long_run_mean: f64,

    /// Volatility
    #[arg(long, default_value_t = 0.2)]
    pub volatility: f64,

    /// Horizon in years
    #[arg(long, default_value_t = 1.0)]
    pub horizon: f64,

    /// Time steps per path (defaults to the configured value)
    #[arg(long)]
    pub steps: Option<usize>,

    /// Number of paths (defaults to the configured value)
    #[arg(long)]
    pub paths: Option<usize>,

    /// CSV file to write the paths to
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Default for PathsArgs {
    fn default() -> Self {
        Self {
            process: Process::Gbm,
            initial: None,
            drift: 0.05,
            speed: 0.3,
            long_run_mean: 0.12,
            volatility: 0.2,
            horizon: 1.0,
            steps: None,
            paths: None,
            output: None,
        }
    }
}

/// Cross-sectional mean at one time point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Checkpoint {
    pub time: f64,
    pub mean: f64,
}

/// Summary printed by `qsim paths`.
#[derive(Debug, Clone, Serialize)]
pub struct PathsSummary {
    pub process: Process,
    pub n_paths: usize,
    pub n_points: usize,
    pub horizon: f64,
    pub mean_terminal: f64,
    pub terminal_std_dev: f64,
    pub checkpoints: Vec<Checkpoint>,
    pub seed: u64,
    pub output: Option<PathBuf>,
}

impl PathsSummary {
    fn from_paths(
        process: Process,
        paths: &PathSet,
        seed: u64,
        output: Option<PathBuf>,
    ) -> Self {
        let stats = paths.terminal_values().statistics();
        let times = paths.time_grid();
        let means = paths.mean_path();
        let last = paths.n_points() - 1;
        let mut indices: Vec<usize> = (0..CHECKPOINTS)
            .map(|i| i * last / (CHECKPOINTS - 1))
            .collect();
        indices.dedup();

        Self {
            process,
            n_paths: paths.n_paths(),
            n_points: paths.n_points(),
            horizon: paths.horizon(),
            mean_terminal: stats.mean,
            terminal_std_dev: stats.std_dev,
            checkpoints: indices
                .into_iter()
                .map(|i| Checkpoint {
                    time: times[i],
                    mean: means[i],
                })
                .collect(),
            seed,
            output,
        }
    }
}

/// Simulates the requested path set.
pub fn simulate(args: &PathsArgs, config: &CliConfig) -> Result<(PathSet, u64)> {
    let steps = args.steps.unwrap_or(config.simulation.steps);
    let count = args.paths.unwrap_or(config.simulation.path_count);
    let mut simulator = super::simulator(config)?;

    let paths = match args.process {
        Process::Gbm => {
            let params = SimulationParameters::gbm(
                args.initial.unwrap_or(100.0),
                args.drift,
                args.volatility,
                args.horizon,
                steps,
                count,
            );
            simulator.simulate_gbm_paths(&params)?
        }
        Process::MeanReverting => {
            let params = SimulationParameters::mean_reverting(
                args.initial.unwrap_or(0.1),
                args.speed,
                args.long_run_mean,
                args.volatility,
                args.horizon,
                steps,
                count,
            );
            simulator.simulate_mean_reverting_paths(&params)?
        }
        Process::Walk => simulator.simulate_random_walks(steps, count)?,
    };
    Ok((paths, simulator.seed()))
}

/// Simulates, writes the CSV if requested, and summarises.
pub fn evaluate(args: &PathsArgs, config: &CliConfig) -> Result<PathsSummary> {
    let (paths, seed) = simulate(args, config)?;

    if let Some(path) = &args.output {
        let file = File::create(path)?;
        write_paths_csv(&paths, BufWriter::new(file))?;
        info!("Wrote {} paths to {}", paths.n_paths(), path.display());
    }

    Ok(PathsSummary::from_paths(args.process, &paths, seed, args.output.clone()))
}

/// Run the paths command
pub fn run(args: &PathsArgs, config: &CliConfig, format: OutputFormat) -> Result<()> {
    info!("Starting path simulation...");
    let summary = evaluate(args, config)?;
    info!("Path simulation complete");

    emit(format, &summary, |s| {
        let mut table = Table::new(format!("{:?} paths", s.process))
            .row("Paths", s.n_paths)
            .row("Points per path", s.n_points)
            .number("Horizon", s.horizon)
            .number("Mean terminal value", s.mean_terminal)
            .number("Terminal std dev", s.terminal_std_dev);
        for checkpoint in &s.checkpoints {
            table = table.number(format!("Mean at t={:.4}", checkpoint.time), checkpoint.mean);
        }
        if let Some(output) = &s.output {
            table = table.row("Output", output.display());
        }
        table.row("Seed", s.seed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use approx::assert_relative_eq;

    fn config() -> CliConfig {
        let mut config = CliConfig::default();
        config.simulation.seed = Some(11);
        config
    }

    #[test]
    fn test_gbm_summary() {
        let args = PathsArgs {
            steps: Some(50),
            paths: Some(4_000),
            ..Default::default()
        };
        let summary = evaluate(&args, &config()).unwrap();
        assert_eq!(summary.n_paths, 4_000);
        assert_eq!(summary.n_points, 51);
        assert_eq!(summary.checkpoints.len(), CHECKPOINTS);
        assert_eq!(summary.checkpoints[0], Checkpoint { time: 0.0, mean: 100.0 });
        assert_relative_eq!(summary.checkpoints[4].time, 1.0, epsilon = 1e-12);
        // E[S_T] = S0 exp(mu T)
        let expected = 100.0 * 0.05_f64.exp();
        assert!((summary.mean_terminal - expected).abs() < 1.5, "{}", summary.mean_terminal);
    }

    #[test]
    fn test_walk_uses_step_horizon() {
        let args = PathsArgs {
            process: Process::Walk,
            steps: Some(2),
            paths: Some(10),
            ..Default::default()
        };
        let (paths, _) = simulate(&args, &config()).unwrap();
        assert_eq!(paths.horizon(), 2.0);
        for path in paths.iter() {
            assert_eq!(path[0], 0.0);
            assert_eq!((path[1] - path[0]).abs(), 1.0);
        }
        // Only three distinct grid points, so checkpoints collapse.
        let summary = PathsSummary::from_paths(Process::Walk, &paths, 0, None);
        assert_eq!(summary.checkpoints.len(), 3);
    }

    #[test]
    fn test_mean_reverting_starts_at_initial() {
        let args = PathsArgs {
            process: Process::MeanReverting,
            steps: Some(20),
            paths: Some(5),
            volatility: 0.03,
            ..Default::default()
        };
        let (paths, _) = simulate(&args, &config()).unwrap();
        assert!(paths.iter().all(|p| p[0] == 0.1));
    }

    #[test]
    fn test_writes_csv() {
        let path = std::env::temp_dir().join(format!("qsim-paths-{}.csv", std::process::id()));
        let args = PathsArgs {
            steps: Some(3),
            paths: Some(2),
            output: Some(path.clone()),
            ..Default::default()
        };
        evaluate(&args, &config()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "time,path_0,path_1");
        assert_eq!(lines[1], "0,100,100");
    }

    #[test]
    fn test_invalid_gbm_start() {
        let args = PathsArgs {
            initial: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(simulate(&args, &config()), Err(CliError::Simulation(_))));
    }
}
