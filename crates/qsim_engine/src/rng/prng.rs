//! Seeded pseudo-random number generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

use super::source::{RandomSource, StreamSource};

/// Seeded PRNG used by the simulation engine.
///
/// Wraps `rand::rngs::StdRng`; normal variates come from
/// `rand_distr::StandardNormal` (Ziggurat method).
///
/// # Examples
///
/// ```rust
/// use qsim_engine::rng::{RandomSource, SimRng};
///
/// let mut rng = SimRng::from_seed(42);
/// let z = rng.next_standard_normal();
/// let u = rng.next_uniform();
/// assert!(z.is_finite());
/// assert!((0.0..1.0).contains(&u));
/// ```
#[derive(Clone, Debug)]
pub struct SimRng {
    inner: StdRng,
    seed: u64,
}

impl SimRng {
    /// Creates a generator initialised with `seed`.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::thread_rng().gen())
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn next_standard_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.inner.gen()
    }
}

impl StreamSource for SimRng {
    #[inline]
    fn from_stream_seed(stream_seed: u64) -> Self {
        Self::from_seed(stream_seed)
    }
}
