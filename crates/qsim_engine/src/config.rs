//! Simulation engine configuration.
//!
//! [`EngineConfig`] controls seeding and how path generation is scheduled.
//! None of these settings change the simulated numbers except `seed` and
//! `chunk_size`: parallel and sequential execution give bit-identical output.

use qsim_core::types::SimResult;
use qsim_core::validation::require_count;

/// Default number of paths drawn from one random stream.
pub const DEFAULT_CHUNK_SIZE: usize = 4_096;

/// Default minimum path count before Rayon is used.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 8_192;

/// Engine configuration.
///
/// # Examples
///
/// ```rust
/// use qsim_engine::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .seed(42)
///     .parallel(false)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.seed(), Some(42));
/// assert!(!config.parallel());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    seed: Option<u64>,
    parallel: bool,
    parallel_threshold: usize,
    chunk_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Default configuration with a fixed seed.
    #[inline]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether Rayon may be used.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Minimum path count before Rayon is used.
    #[inline]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Paths drawn from one random stream.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns whether `n_paths` paths should be generated in parallel.
    #[inline]
    pub fn should_parallelize(&self, n_paths: usize) -> bool {
        self.parallel && n_paths >= self.parallel_threshold
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `chunk_size` is zero.
    pub fn validate(&self) -> SimResult<()> {
        require_count("chunk_size", self.chunk_size)?;
        Ok(())
    }
}

/// Builder for [`EngineConfig`].
#[derive(Clone, Debug)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }
}

impl EngineConfigBuilder {
    /// Sets the seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Sets an optional seed; `None` draws one from OS entropy.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    /// Enables or disables Rayon.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Sets the minimum path count before Rayon is used.
    #[inline]
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    /// Sets the number of paths drawn from one random stream.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `chunk_size` is zero.
    pub fn build(self) -> SimResult<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.seed(), None);
        assert!(config.parallel());
        assert_eq!(config.chunk_size(), DEFAULT_CHUNK_SIZE);
        assert_eq!(config.parallel_threshold(), DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::builder()
            .seed(7)
            .parallel_threshold(10)
            .chunk_size(64)
            .build()
            .unwrap();
        assert_eq!(config.seed(), Some(7));
        assert_eq!(config.chunk_size(), 64);
        assert!(config.should_parallelize(10));
        assert!(!config.should_parallelize(9));
    }

    #[test]
    fn test_sequential_never_parallelizes() {
        let config = EngineConfig::builder().parallel(false).build().unwrap();
        assert!(!config.should_parallelize(usize::MAX));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let err = EngineConfig::builder().chunk_size(0).build().unwrap_err();
        assert_eq!(err.parameter(), "chunk_size");
    }
}
