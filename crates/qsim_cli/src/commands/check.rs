//! Check command implementation
//!
//! Prints the effective configuration after file, environment and flag
//! overrides have been applied.

use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{emit, OutputFormat, Table};
use crate::Result;

/// Effective configuration plus the size of the Rayon pool parallel runs use.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport<'a> {
    pub version: &'static str,
    #[serde(flatten)]
    pub config: &'a CliConfig,
    pub worker_threads: usize,
}

/// Collects the report.
pub fn evaluate(config: &CliConfig) -> Result<CheckReport<'_>> {
    // Fails on the same engine settings a simulation would.
    config.engine_config()?;
    Ok(CheckReport {
        version: env!("CARGO_PKG_VERSION"),
        config,
        worker_threads: rayon::current_num_threads(),
    })
}

/// Run the check command
pub fn run(config: &CliConfig, format: OutputFormat) -> Result<()> {
    info!("Checking configuration...");
    let report = evaluate(config)?;

    emit(format, &report, |r| {
        let sim = &r.config.simulation;
        let engine = &r.config.engine;
        Table::new(format!("qsim {}", r.version))
            .row("Log level", r.config.log_level.as_filter_str())
            .row("Iterations", sim.iterations)
            .row("Steps", sim.steps)
            .row("Path count", sim.path_count)
            .row("Trading days per year", sim.trading_days_per_year)
            .row(
                "Seed",
                sim.seed.map_or_else(|| "entropy".to_string(), |s| s.to_string()),
            )
            .row("Parallel", engine.parallel)
            .row("Parallel threshold", engine.parallel_threshold)
            .row("Chunk size", engine.chunk_size)
            .row("Worker threads", r.worker_threads)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::render_json;

    #[test]
    fn test_report_flattens_config() {
        let mut config = CliConfig::default();
        config.simulation.seed = Some(5);
        let report = evaluate(&config).unwrap();
        let json = render_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["simulation"]["seed"], 5);
        assert_eq!(value["simulation"]["iterations"], 100_000);
        assert_eq!(value["engine"]["parallel"], true);
        assert_eq!(value["log_level"], "warn");
        assert!(value["worker_threads"].as_u64().unwrap() >= 1);
    }

    #[test]
    fn test_worker_threads_follow_rayon_pool() {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(3).build().unwrap();
        let threads = pool.install(|| evaluate(&CliConfig::default()).unwrap().worker_threads);
        assert_eq!(threads, 3);
        assert_eq!(
            evaluate(&CliConfig::default()).unwrap().worker_threads,
            rayon::current_num_threads()
        );
    }

    #[test]
    fn test_bad_engine_settings() {
        let mut config = CliConfig::default();
        config.engine.chunk_size = 0;
        assert!(evaluate(&config).is_err());
    }
}
