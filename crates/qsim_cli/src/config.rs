//! CLI configuration management
//!
//! Loads configuration from a TOML file, environment variables and
//! command-line flags.
//!
//! ```toml
//! log_level = "info"
//!
//! [simulation]
//! iterations = 100000
//! steps = 200
//! path_count = 1000
//! trading_days_per_year = 252
//! seed = 42
//!
//! [engine]
//! parallel = true
//! parallel_threshold = 8192
//! chunk_size = 4096
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use qsim_core::config::SimulationDefaults;
use qsim_engine::config::{DEFAULT_CHUNK_SIZE, DEFAULT_PARALLEL_THRESHOLD};
use qsim_engine::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::{CliError, Result};

/// Default configuration file, read from the working directory if present.
pub const DEFAULT_CONFIG_FILE: &str = "qsim.toml";

/// Environment variable overriding the seed.
pub const ENV_SEED: &str = "QSIM_SEED";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "QSIM_LOG_LEVEL";
/// Environment variable overriding the iteration count.
pub const ENV_ITERATIONS: &str = "QSIM_ITERATIONS";

/// Log levels accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::Config(format!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// `[engine]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Allow Rayon.
    pub parallel: bool,
    /// Minimum path count before Rayon is used.
    pub parallel_threshold: usize,
    /// Paths per random stream.
    pub chunk_size: usize,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Effective CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level when neither `RUST_LOG` nor `--verbose` is given.
    pub log_level: LogLevel,
    /// Simulation defaults.
    pub simulation: SimulationDefaults,
    /// Engine scheduling.
    pub engine: EngineSection,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| CliError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `QSIM_*` overrides, reading variables through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            let seed = seed.trim().parse().map_err(|_| {
                CliError::Config(format!("{} must be an unsigned integer, got {}", ENV_SEED, seed))
            })?;
            self.simulation.seed = Some(seed);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level.trim().parse()?;
        }
        if let Some(iterations) = lookup(ENV_ITERATIONS) {
            self.simulation.iterations = iterations.trim().parse().map_err(|_| {
                CliError::Config(format!(
                    "{} must be a positive integer, got {}",
                    ENV_ITERATIONS, iterations
                ))
            })?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(seed) = cli.seed {
            self.simulation.seed = Some(seed);
        }
        if cli.sequential {
            self.engine.parallel = false;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.engine_config()?;
        Ok(())
    }

    /// Engine configuration for this run.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        Ok(EngineConfig::builder()
            .maybe_seed(self.simulation.seed)
            .parallel(self.engine.parallel)
            .parallel_threshold(self.engine.parallel_threshold)
            .chunk_size(self.engine.chunk_size)
            .build()?)
    }
}

/// Configuration-related command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Explicit config file path
    pub config_file: Option<PathBuf>,
    /// Seed override
    pub seed: Option<u64>,
    /// Force single-threaded execution
    pub sequential: bool,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
///
/// An explicit `--config` file must exist; the default `qsim.toml` is optional.
pub fn build_config(cli: &CliArgs) -> Result<CliConfig> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an injectable environment.
pub fn build_config_with_env<F>(cli: &CliArgs, env: F) -> Result<CliConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) if !path.exists() => {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        Some(path) => CliConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                CliConfig::from_file(default_path)?
            } else {
                CliConfig::default()
            }
        }
    };

    config.apply_env(env)?;
    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.simulation, SimulationDefaults::default());
        assert!(config.engine.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = CliConfig::from_toml(
            r#"
            log_level = "debug"

            [simulation]
            iterations = 5000
            seed = 42

            [engine]
            chunk_size = 128
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.simulation.iterations, 5000);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.steps, 200);
        assert_eq!(config.engine.chunk_size, 128);
        assert!(config.engine.parallel);
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(matches!(
            CliConfig::from_toml("log_level = 3"),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config
            .apply_env(env(&[
                (ENV_SEED, "7"),
                (ENV_LOG_LEVEL, "info"),
                (ENV_ITERATIONS, "2500"),
            ]))
            .unwrap();
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.simulation.iterations, 2500);
    }

    #[test]
    fn test_bad_env_value() {
        let mut config = CliConfig::default();
        assert!(config.apply_env(env(&[(ENV_SEED, "-1")])).is_err());
    }

    #[test]
    fn test_cli_beats_env() {
        let cli = CliArgs {
            seed: Some(99),
            sequential: true,
            ..Default::default()
        };
        let config = build_config_with_env(&cli, env(&[(ENV_SEED, "7")])).unwrap();
        assert_eq!(config.simulation.seed, Some(99));
        assert!(!config.engine.parallel);
        assert!(!config.engine_config().unwrap().parallel());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/qsim-test.toml")),
            ..Default::default()
        };
        assert!(matches!(
            build_config_with_env(&cli, env(&[])),
            Err(CliError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("qsim-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[simulation]\nsteps = 64\n").unwrap();
        let cli = CliArgs {
            config_file: Some(path.clone()),
            ..Default::default()
        };
        let config = build_config_with_env(&cli, env(&[])).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.simulation.steps, 64);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cli = CliArgs::default();
        let err = build_config_with_env(&cli, env(&[(ENV_ITERATIONS, "0")])).unwrap_err();
        assert!(matches!(err, CliError::Simulation(_)));
    }
}
