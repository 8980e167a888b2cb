//! Simple symmetric random walk.

use crate::rng::RandomSource;

/// Fills `out` with a ±1 random walk starting at zero.
///
/// Each increment is `-1` when the uniform draw falls below one half and `+1`
/// otherwise.
pub fn fill_random_walk<R: RandomSource>(rng: &mut R, out: &mut [f64]) {
    let Some((first, rest)) = out.split_first_mut() else {
        return;
    };
    *first = 0.0;
    let mut position = 0.0;
    for slot in rest {
        position += if rng.next_uniform() < 0.5 { -1.0 } else { 1.0 };
        *slot = position;
    }
}
