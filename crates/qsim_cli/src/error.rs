//! CLI error types.

use qsim_core::SimulationError;
use thiserror::Error;

/// Errors surfaced by the `qsim` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected simulation input.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Unreadable or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Bad combination of command-line arguments.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_error_passes_through() {
        let err: CliError = SimulationError::invalid("strike", "must be positive").into();
        assert_eq!(err.to_string(), "Invalid parameter 'strike': must be positive");
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            CliError::FileNotFound("prices.csv".into()).to_string(),
            "File not found: prices.csv"
        );
        assert_eq!(
            CliError::InvalidArgument("--mu requires --sigma".into()).to_string(),
            "Invalid argument: --mu requires --sigma"
        );
    }
}
