//! Geometric Brownian motion.
//!
//! ```text
//! dS = μ S dt + σ S dW
//! ```
//!
//! GBM has a closed-form transition density, so both generators use the exact
//! log-space step and carry no discretisation error:
//!
//! ```text
//! S(t+Δ) = S(t) × exp((μ − σ²/2)Δ + σ√Δ × Z)
//! ```

use crate::rng::RandomSource;

/// Precomputed exact GBM step over a fixed interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmStep {
    initial_value: f64,
    drift_dt: f64,
    vol_sqrt_dt: f64,
}

impl GbmStep {
    /// Step of length `dt` for drift `drift` and volatility `volatility`.
    #[inline]
    pub fn new(initial_value: f64, drift: f64, volatility: f64, dt: f64) -> Self {
        Self {
            initial_value,
            drift_dt: (drift - 0.5 * volatility * volatility) * dt,
            vol_sqrt_dt: volatility * dt.sqrt(),
        }
    }

    /// Advances `value` by one step using the standard normal draw `z`.
    #[inline]
    pub fn advance(&self, value: f64, z: f64) -> f64 {
        value * (self.drift_dt + self.vol_sqrt_dt * z).exp()
    }

    /// Draws the value after a single step from the initial value.
    ///
    /// With `dt = T` this is the exact terminal value at `T`.
    #[inline]
    pub fn sample_terminal<R: RandomSource>(&self, rng: &mut R) -> f64 {
        self.advance(self.initial_value, rng.next_standard_normal())
    }

    /// Fills `out` with a path: `out[0]` is the initial value and each later
    /// entry is one step further.
    pub fn fill_path<R: RandomSource>(&self, rng: &mut R, out: &mut [f64]) {
        let Some((first, rest)) = out.split_first_mut() else {
            return;
        };
        *first = self.initial_value;
        let mut value = self.initial_value;
        for slot in rest {
            value = self.advance(value, rng.next_standard_normal());
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;
    use approx::assert_relative_eq;

    /// Source returning a fixed normal draw.
    struct ConstantSource(f64);

    impl RandomSource for ConstantSource {
        fn next_standard_normal(&mut self) -> f64 {
            self.0
        }
        fn next_uniform(&mut self) -> f64 {
            0.5
        }
    }

    #[test]
    fn test_terminal_formula() {
        let step = GbmStep::new(100.0, 0.05, 0.2, 1.0);
        let value = step.sample_terminal(&mut ConstantSource(1.0));
        let expected = 100.0 * ((0.05_f64 - 0.5 * 0.04) + 0.2).exp();
        assert_relative_eq!(value, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_volatility_is_forward() {
        let step = GbmStep::new(50.0, 0.03, 0.0, 2.0);
        let value = step.sample_terminal(&mut ConstantSource(-2.5));
        assert_eq!(value, 50.0 * (0.03_f64 * 2.0).exp());
    }

    #[test]
    fn test_path_starts_at_initial_value_and_stays_positive() {
        let step = GbmStep::new(100.0, 0.05, 0.5, 1.0 / 50.0);
        let mut rng = SimRng::from_seed(42);
        let mut path = vec![0.0; 51];
        step.fill_path(&mut rng, &mut path);

        assert_eq!(path[0], 100.0);
        assert!(path.iter().all(|&s| s > 0.0 && s.is_finite()));
    }

    #[test]
    fn test_path_steps_compose() {
        // With a constant draw, N steps of dt equal one step of N * dt.
        let n = 8;
        let fine = GbmStep::new(10.0, 0.1, 0.3, 0.25);
        let coarse = GbmStep::new(10.0, 0.1, 0.3, 0.25 * n as f64);

        let mut path = vec![0.0; n + 1];
        fine.fill_path(&mut ConstantSource(0.0), &mut path);
        let terminal = coarse.sample_terminal(&mut ConstantSource(0.0));
        assert_relative_eq!(path[n], terminal, max_relative = 1e-12);
    }

    #[test]
    fn test_fill_empty_path() {
        let step = GbmStep::new(1.0, 0.0, 0.1, 1.0);
        step.fill_path(&mut ConstantSource(0.0), &mut []);
    }
}
