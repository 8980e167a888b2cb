//! Mean-reverting (Vasicek / Ornstein-Uhlenbeck) dynamics.
//!
//! ```text
//! dx = κ(θ − x) dt + σ dW
//! ```
//!
//! Discretised with Euler-Maruyama:
//!
//! ```text
//! x[t+dt] = x[t] + κ(θ − x[t]) dt + σ√dt × Z
//! ```
//!
//! The scheme has weak order 1; the bias shrinks as the step count grows.
//! Nothing keeps `x` non-negative, so short rates can go below zero.

use crate::rng::RandomSource;

/// Precomputed Euler-Maruyama step for a mean-reverting process.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeanRevertingStep {
    initial_value: f64,
    speed: f64,
    long_run_mean: f64,
    dt: f64,
    vol_sqrt_dt: f64,
}

impl MeanRevertingStep {
    /// Creates the step for `dx = speed (long_run_mean - x) dt + volatility dW`.
    #[inline]
    pub fn new(
        initial_value: f64,
        speed: f64,
        long_run_mean: f64,
        volatility: f64,
        dt: f64,
    ) -> Self {
        Self {
            initial_value,
            speed,
            long_run_mean,
            dt,
            vol_sqrt_dt: volatility * dt.sqrt(),
        }
    }

    /// Time step.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Advances `x` by one step using the standard normal draw `z`.
    #[inline]
    pub fn advance(&self, x: f64, z: f64) -> f64 {
        x + self.speed * (self.long_run_mean - x) * self.dt + self.vol_sqrt_dt * z
    }

    /// Fills `out` with a path starting at the initial value.
    pub fn fill_path<R: RandomSource>(&self, rng: &mut R, out: &mut [f64]) {
        let Some((first, rest)) = out.split_first_mut() else {
            return;
        };
        *first = self.initial_value;
        let mut x = self.initial_value;
        for slot in rest {
            x = self.advance(x, rng.next_standard_normal());
            *slot = x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;
    use approx::assert_relative_eq;

    struct ZeroSource;

    impl RandomSource for ZeroSource {
        fn next_standard_normal(&mut self) -> f64 {
            0.0
        }
        fn next_uniform(&mut self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_single_step() {
        let step = MeanRevertingStep::new(0.1, 0.5, 0.05, 0.02, 0.25);
        let x = step.advance(0.1, 1.0);
        assert_relative_eq!(x, 0.1 + 0.5 * (0.05 - 0.1) * 0.25 + 0.02 * 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_deterministic_path_decays_towards_mean() {
        let step = MeanRevertingStep::new(0.10, 2.0, 0.03, 0.0, 0.01);
        let mut path = vec![0.0; 501];
        step.fill_path(&mut ZeroSource, &mut path);

        assert_eq!(path[0], 0.10);
        for pair in path.windows(2) {
            assert!(pair[1] < pair[0]);
            assert!(pair[1] > 0.03);
        }
        assert!((path[500] - 0.03).abs() < 1e-3);
    }

    #[test]
    fn test_at_long_run_mean_without_noise_is_constant() {
        let step = MeanRevertingStep::new(0.04, 1.5, 0.04, 0.0, 0.1);
        let mut path = vec![0.0; 11];
        step.fill_path(&mut ZeroSource, &mut path);
        assert!(path.iter().all(|&x| x == 0.04));
    }

    #[test]
    fn test_zero_speed_is_scaled_brownian_motion() {
        let step = MeanRevertingStep::new(0.0, 0.0, 1.0, 1.0, 1.0);
        let mut rng = SimRng::from_seed(3);
        let n = 20_000;
        let finals: Vec<f64> = (0..n)
            .map(|_| {
                let mut path = [0.0; 5];
                step.fill_path(&mut rng, &mut path);
                path[4]
            })
            .collect();
        let mean = finals.iter().sum::<f64>() / n as f64;
        let var = finals.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
        // Four unit steps give Var = 4.
        assert!(mean.abs() < 0.06, "mean = {}", mean);
        assert!((var - 4.0).abs() < 0.2, "variance = {}", var);
    }
}
