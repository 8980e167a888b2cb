//! Sample statistics used to reduce simulated realisations.
//!
//! # Quantile convention
//!
//! Every quantile in qsim uses the **lower nearest rank** on ascending order
//! statistics: for `n` samples and probability `p` the selected zero-based
//! index is `floor(p * n)`, clamped to `n - 1`. A product that is an integer
//! up to rounding (as `(1.0 - 0.9) * 100` is) counts as that integer. The
//! index is non-decreasing in `p`, so a quantile computed on one fixed sample
//! is non-decreasing in `p`.
//!
//! ```text
//! n = 100, p = 0.05  ->  index 5  (the sixth smallest value)
//! n = 100, p = 0.999 ->  index 99 (the maximum)
//! n = 100, p = 0.001 ->  index 0  (the minimum)
//! ```

use crate::types::{SimResult, SimulationError};
use crate::validation::require_positive;
use serde::Serialize;

/// Arithmetic mean. Returns `NaN` for an empty slice.
#[inline]
pub fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Unbiased sample variance (n − 1 denominator). Zero for fewer than two samples.
///
/// Welford's update; a constant sample gives exactly zero.
pub fn sample_variance(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let mut running_mean = 0.0;
    let mut m2 = 0.0;
    for (i, &x) in samples.iter().enumerate() {
        let delta = x - running_mean;
        running_mean += delta / (i + 1) as f64;
        m2 += delta * (x - running_mean);
    }
    m2 / (n - 1) as f64
}

/// Relative width of the window in which `p * n` counts as a whole number.
const RANK_SNAP: f64 = 1e-9;

/// Zero-based index selected by the lower-nearest-rank convention.
///
/// Products within `1e-9 * n` of an integer are taken as that integer, so
/// `p = 1.0 - 0.9` with `n = 100` selects index 10 although the subtraction
/// leaves `p` slightly below 0.1.
///
/// # Panics
///
/// Debug builds assert `n > 0`.
#[inline]
pub fn quantile_index(p: f64, n: usize) -> usize {
    debug_assert!(n > 0);
    let scaled = p * n as f64;
    let nearest = scaled.round();
    let rank = if (scaled - nearest).abs() <= RANK_SNAP * n as f64 {
        nearest
    } else {
        scaled.floor()
    };
    if rank <= 0.0 {
        0
    } else {
        (rank as usize).min(n - 1)
    }
}

/// Empirical `p`-quantile of `samples` using the lower-nearest-rank convention.
///
/// Uses order-statistic selection (`select_nth_unstable_by`), so `samples` is
/// partially reordered in place. `p` is clamped to [0, 1]; callers validate
/// their own probability parameters. Returns `NaN` for an empty slice.
///
/// # Examples
/// ```
/// use qsim_core::math::statistics::empirical_quantile;
///
/// let mut xs: Vec<f64> = (1..=100).map(|i| i as f64).collect();
/// // floor(0.05 * 100) = 5 -> sixth smallest
/// assert_eq!(empirical_quantile(&mut xs, 0.05), 6.0);
/// ```
pub fn empirical_quantile(samples: &mut [f64], p: f64) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    let k = quantile_index(p.clamp(0.0, 1.0), samples.len());
    let (_, value, _) = samples.select_nth_unstable_by(k, f64::total_cmp);
    *value
}

/// Mean, dispersion and standard error of a set of Monte Carlo samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SampleStatistics {
    /// Number of samples.
    pub count: usize,
    /// Sample mean.
    pub mean: f64,
    /// Sample standard deviation (n − 1 denominator).
    pub std_dev: f64,
    /// Standard error of the mean, `std_dev / sqrt(count)`.
    pub std_error: f64,
}

impl SampleStatistics {
    /// Computes statistics over `samples` in index order.
    ///
    /// The summation order is fixed, so identical inputs give bit-identical
    /// outputs.
    pub fn from_samples(samples: &[f64]) -> Self {
        let count = samples.len();
        if count == 0 {
            return Self::default();
        }
        let std_dev = sample_variance(samples).sqrt();
        Self {
            count,
            mean: mean(samples),
            std_dev,
            std_error: std_dev / (count as f64).sqrt(),
        }
    }

    /// Multiplies the mean and dispersion by a constant factor (e.g. a discount factor).
    #[inline]
    pub fn scaled(self, factor: f64) -> Self {
        let factor_abs = factor.abs();
        Self {
            count: self.count,
            mean: self.mean * factor,
            std_dev: self.std_dev * factor_abs,
            std_error: self.std_error * factor_abs,
        }
    }
}

/// Drift and volatility estimated from a historical price series.
///
/// Callers derive the `mu`/`sigma` inputs of the option pricer and the risk
/// estimator from these log-return statistics; both are per observation period
/// (per day for daily closes).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LogReturnStats {
    /// Mean log return per period.
    pub mean: f64,
    /// Sample standard deviation of log returns per period.
    pub std_dev: f64,
    /// Number of returns used.
    pub observations: usize,
}

impl LogReturnStats {
    /// Computes statistics of `ln(p[i] / p[i-1])`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if fewer than three prices are supplied or any
    /// price is not strictly positive and finite.
    pub fn from_prices(prices: &[f64]) -> SimResult<Self> {
        if prices.len() < 3 {
            return Err(SimulationError::invalid(
                "prices",
                format!("need at least 3 prices, got {}", prices.len()),
            ));
        }
        for &p in prices {
            require_positive("prices", p)?;
        }

        let returns: Vec<f64> = prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
        Ok(Self {
            mean: mean(&returns),
            std_dev: sample_variance(&returns).sqrt(),
            observations: returns.len(),
        })
    }

    /// Scales per-period statistics to a longer horizon of `periods` periods,
    /// assuming i.i.d. returns (mean scales linearly, volatility with the square root).
    #[inline]
    pub fn scaled_to(&self, periods: f64) -> (f64, f64) {
        (self.mean * periods, self.std_dev * periods.sqrt())
    }
}
