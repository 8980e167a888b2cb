//! Owned simulation outputs.
//!
//! # Memory Layout
//!
//! [`PathSet`] stores paths row-major: `data[path_idx * n_points + step_idx]`,
//! where `step_idx = 0` holds the initial value.

use qsim_core::math::statistics::{mean, sample_variance};
use qsim_core::math::{empirical_quantile, SampleStatistics};

/// A matrix of `n_paths` sample paths, each with `n_points = steps + 1` values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSet {
    data: Vec<f64>,
    n_paths: usize,
    n_points: usize,
    horizon: f64,
}

impl PathSet {
    /// Wraps row-major path data.
    ///
    /// Returns `None` when `data.len() != n_paths * n_points` or `n_points` is zero.
    pub fn from_row_major(
        data: Vec<f64>,
        n_paths: usize,
        n_points: usize,
        horizon: f64,
    ) -> Option<Self> {
        if n_points == 0 || n_paths.checked_mul(n_points) != Some(data.len()) {
            return None;
        }
        Some(Self {
            data,
            n_paths,
            n_points,
            horizon,
        })
    }

    /// Returns the same paths with a different time horizon.
    #[must_use]
    pub fn with_horizon(self, horizon: f64) -> Self {
        Self { horizon, ..self }
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of points per path (steps + 1).
    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Time horizon covered by each path.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Returns path `index`, or `None` if out of range.
    #[inline]
    pub fn path(&self, index: usize) -> Option<&[f64]> {
        if index >= self.n_paths {
            return None;
        }
        let start = index * self.n_points;
        Some(&self.data[start..start + self.n_points])
    }

    /// Iterates over the paths in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.n_points)
    }

    /// Row-major backing data.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The final value of every path.
    pub fn terminal_values(&self) -> TerminalValueSet {
        TerminalValueSet::new(self.iter().map(|p| p[self.n_points - 1]).collect())
    }

    /// Cross-sectional average at each time point.
    pub fn mean_path(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.n_points];
        for path in self.iter() {
            for (acc, &x) in sums.iter_mut().zip(path) {
                *acc += x;
            }
        }
        let n = self.n_paths as f64;
        for acc in &mut sums {
            *acc /= n;
        }
        sums
    }

    /// Uniform time grid `0, dt, ..., horizon`.
    pub fn time_grid(&self) -> Vec<f64> {
        let steps = self.n_points - 1;
        if steps == 0 {
            return vec![0.0];
        }
        let dt = self.horizon / steps as f64;
        (0..self.n_points).map(|i| i as f64 * dt).collect()
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a [f64];
    type IntoIter = std::slice::ChunksExact<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.chunks_exact(self.n_points)
    }
}

/// Terminal values of `M` simulated paths.
///
/// # Examples
///
/// ```rust
/// use qsim_engine::TerminalValueSet;
///
/// let set = TerminalValueSet::new(vec![3.0, 1.0, 2.0, 4.0]);
/// assert_eq!(set.mean(), 2.5);
/// // Lower nearest rank: floor(0.5 * 4) = index 2 of [1, 2, 3, 4].
/// assert_eq!(set.quantile(0.5), 3.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerminalValueSet {
    values: Vec<f64>,
}

impl TerminalValueSet {
    /// Wraps terminal values.
    #[inline]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the set holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample mean.
    pub fn mean(&self) -> f64 {
        mean(&self.values)
    }

    /// Sample variance (n − 1 denominator).
    pub fn variance(&self) -> f64 {
        sample_variance(&self.values)
    }

    /// Mean, standard deviation and standard error in one pass.
    pub fn statistics(&self) -> SampleStatistics {
        SampleStatistics::from_samples(&self.values)
    }

    /// Empirical `p`-quantile by lower nearest rank.
    ///
    /// Works on a scratch copy; the set keeps its simulation order.
    pub fn quantile(&self, p: f64) -> f64 {
        let mut scratch = self.values.clone();
        empirical_quantile(&mut scratch, p)
    }

    /// Values in simulation order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the set, returning the values.
    #[inline]
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> PathSet {
        PathSet::from_row_major(vec![1.0, 2.0, 3.0, 1.0, 4.0, 5.0], 2, 3, 2.0).unwrap()
    }

    #[test]
    fn test_shape_checks() {
        assert!(PathSet::from_row_major(vec![0.0; 5], 2, 3, 1.0).is_none());
        assert!(PathSet::from_row_major(vec![], 0, 0, 1.0).is_none());
    }

    #[test]
    fn test_path_access() {
        let set = sample_set();
        assert_eq!(set.n_paths(), 2);
        assert_eq!(set.n_points(), 3);
        assert_eq!(set.path(1), Some(&[1.0, 4.0, 5.0][..]));
        assert_eq!(set.path(2), None);
        assert_eq!(set.iter().count(), 2);
        assert_eq!((&set).into_iter().count(), 2);
    }

    #[test]
    fn test_terminal_and_mean_path() {
        let set = sample_set();
        assert_eq!(set.terminal_values().as_slice(), &[3.0, 5.0]);
        assert_eq!(set.mean_path(), vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_time_grid() {
        assert_eq!(sample_set().time_grid(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_terminal_statistics() {
        let set = TerminalValueSet::new(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(set.len(), 8);
        assert_eq!(set.mean(), 5.0);
        assert!((set.variance() - 32.0 / 7.0).abs() < 1e-12);
        assert_eq!(set.statistics().count, 8);
    }

    #[test]
    fn test_quantile_keeps_order() {
        let set = TerminalValueSet::new(vec![5.0, 1.0, 4.0, 2.0, 3.0]);
        assert_eq!(set.quantile(0.0), 1.0);
        assert_eq!(set.quantile(0.2), 2.0);
        assert_eq!(set.quantile(1.0), 5.0);
        assert_eq!(set.as_slice(), &[5.0, 1.0, 4.0, 2.0, 3.0]);
    }
}
