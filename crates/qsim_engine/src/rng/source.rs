//! Random source traits.

/// A source of independent random variates.
///
/// Static dispatch only: generators take `&mut impl RandomSource`.
pub trait RandomSource {
    /// Draws one standard normal variate (mean 0, variance 1).
    fn next_standard_normal(&mut self) -> f64;

    /// Draws one uniform variate in [0, 1).
    fn next_uniform(&mut self) -> f64;

    /// Fills `buffer` with standard normal variates.
    fn fill_standard_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_standard_normal();
        }
    }
}

/// A [`RandomSource`] constructible from a derived stream seed.
///
/// Implementations must be deterministic: the same stream seed always yields
/// the same sequence.
pub trait StreamSource: RandomSource + Send + Sized {
    /// Opens the stream identified by `stream_seed`.
    fn from_stream_seed(stream_seed: u64) -> Self;
}
