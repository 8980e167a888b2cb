//! Chunked, seed-stable parallel execution.
//!
//! Every simulation in the engine goes through [`for_each_chunk`]: the output
//! buffer is cut into chunks of `chunk_size` items, chunk `k` draws from its own
//! stream `stream_seed(seed, epoch, k)`, and each chunk writes only its own
//! slots. Which thread runs a chunk never affects the numbers it produces, so
//! Rayon and sequential execution agree bit-for-bit.

use rayon::prelude::*;

use crate::rng::{stream_seed, StreamSource};

/// Stream assignment for one simulation call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamPlan {
    /// Simulator seed.
    pub seed: u64,
    /// Call counter on the simulator.
    pub epoch: u64,
    /// Items per random stream.
    pub chunk_size: usize,
    /// Whether to dispatch chunks to Rayon.
    pub parallel: bool,
}

impl StreamPlan {
    /// Opens the random stream of chunk `chunk`.
    #[inline]
    pub fn open<R: StreamSource>(&self, chunk: usize) -> R {
        R::from_stream_seed(stream_seed(self.seed, self.epoch, chunk as u64))
    }

    /// Number of chunks needed for `n_items` items.
    #[inline]
    pub fn chunk_count(&self, n_items: usize) -> usize {
        n_items.div_ceil(self.chunk_size.max(1))
    }
}

/// Runs `body` once per chunk of `out`.
///
/// `out` holds `width` slots per item; chunk `k` covers items
/// `k * chunk_size .. (k + 1) * chunk_size` and receives a freshly opened
/// stream for that chunk.
pub fn for_each_chunk<R, T, F>(plan: &StreamPlan, out: &mut [T], width: usize, body: F)
where
    R: StreamSource,
    T: Send,
    F: Fn(&mut R, &mut [T]) + Sync,
{
    let stride = plan.chunk_size.max(1) * width.max(1);
    let run = |(chunk, slots): (usize, &mut [T])| {
        let mut rng: R = plan.open(chunk);
        body(&mut rng, slots);
    };

    if plan.parallel {
        out.par_chunks_mut(stride).enumerate().for_each(run);
    } else {
        out.chunks_mut(stride).enumerate().for_each(run);
    }
}

/// Maps every item index to one value, returning the values in index order.
///
/// `f` receives the chunk's stream and a scratch buffer reused across the
/// chunk's items.
pub fn map_items<R, T, F>(plan: &StreamPlan, n_items: usize, f: F) -> Vec<T>
where
    R: StreamSource,
    T: Clone + Default + Send,
    F: Fn(&mut R, &mut Vec<f64>) -> T + Sync,
{
    let mut out = vec![T::default(); n_items];
    for_each_chunk(plan, &mut out, 1, |rng: &mut R, slots: &mut [T]| {
        let mut scratch = Vec::new();
        for slot in slots {
            *slot = f(rng, &mut scratch);
        }
    });
    out
}

/// Fills `n_items` rows of `width` values each, row-major.
pub fn fill_rows<R, F>(plan: &StreamPlan, n_items: usize, width: usize, f: F) -> Vec<f64>
where
    R: StreamSource,
    F: Fn(&mut R, &mut [f64]) + Sync,
{
    let mut out = vec![0.0; n_items * width];
    for_each_chunk(plan, &mut out, width, |rng: &mut R, rows: &mut [f64]| {
        for row in rows.chunks_mut(width) {
            f(rng, row);
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RandomSource, SimRng};

    fn plan(parallel: bool, chunk_size: usize) -> StreamPlan {
        StreamPlan {
            seed: 42,
            epoch: 0,
            chunk_size,
            parallel,
        }
    }

    #[test]
    fn test_chunk_count() {
        assert_eq!(plan(false, 4).chunk_count(0), 0);
        assert_eq!(plan(false, 4).chunk_count(4), 1);
        assert_eq!(plan(false, 4).chunk_count(5), 2);
    }

    #[test]
    fn test_map_items_parallel_matches_sequential() {
        let f = |rng: &mut SimRng, _: &mut Vec<f64>| rng.next_standard_normal();
        let seq = map_items(&plan(false, 7), 1_000, f);
        let par = map_items(&plan(true, 7), 1_000, f);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_fill_rows_parallel_matches_sequential() {
        let f = |rng: &mut SimRng, row: &mut [f64]| rng.fill_standard_normal(row);
        let seq = fill_rows(&plan(false, 3), 50, 11, f);
        let par = fill_rows(&plan(true, 3), 50, 11, f);
        assert_eq!(seq.len(), 550);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_chunks_use_distinct_streams() {
        let values = map_items(&plan(false, 1), 2, |rng: &mut SimRng, _: &mut Vec<f64>| {
            rng.next_uniform()
        });
        assert_ne!(values[0], values[1]);
    }

    #[test]
    fn test_epoch_changes_stream() {
        let f = |rng: &mut SimRng, _: &mut Vec<f64>| rng.next_standard_normal();
        let first = map_items(&plan(false, 16), 16, f);
        let later = map_items(
            &StreamPlan {
                epoch: 1,
                ..plan(false, 16)
            },
            16,
            f,
        );
        assert_ne!(first, later);
    }

    #[test]
    fn test_scratch_is_per_chunk() {
        let lens = map_items(&plan(false, 4), 8, |_: &mut SimRng, scratch: &mut Vec<f64>| {
            scratch.push(0.0);
            scratch.len()
        });
        assert_eq!(lens, vec![1, 2, 3, 4, 1, 2, 3, 4]);
    }
}
