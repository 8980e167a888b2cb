//! Monte Carlo pricing result.

use qsim_core::math::SampleStatistics;

/// Price estimate with its Monte Carlo standard error.
///
/// # Examples
///
/// ```rust
/// use qsim_pricing::PricingResult;
///
/// let result = PricingResult {
///     price: 10.5,
///     std_error: 0.05,
///     iterations: 100_000,
/// };
///
/// println!("Price: {} +/- {}", result.price, result.confidence_95());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Present value estimate.
    pub price: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
    /// Number of simulated realisations.
    pub iterations: usize,
}

impl PricingResult {
    /// Builds a result from per-path present values.
    pub(crate) fn from_statistics(stats: SampleStatistics) -> Self {
        Self {
            price: stats.mean,
            std_error: stats.std_error,
            iterations: stats.count,
        }
    }

    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bands() {
        let result = PricingResult {
            price: 1.0,
            std_error: 0.5,
            iterations: 4,
        };
        assert_eq!(result.confidence_95(), 0.98);
        assert_eq!(result.confidence_99(), 1.288);
    }

    #[test]
    fn test_from_statistics() {
        let stats = SampleStatistics::from_samples(&[1.0, 2.0, 3.0, 4.0]).scaled(2.0);
        let result = PricingResult::from_statistics(stats);
        assert_eq!(result.price, 5.0);
        assert_eq!(result.iterations, 4);
        assert!(result.std_error > 0.0);
    }
}
