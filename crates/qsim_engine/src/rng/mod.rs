//! # Random Number Generation
//!
//! Random draws enter the engine through two traits:
//!
//! - [`RandomSource`]: anything that yields standard normal and uniform variates.
//!   Path generators are generic over it, so tests can inject a scripted source.
//! - [`StreamSource`]: a `RandomSource` that can be constructed from a 64-bit
//!   stream seed. The simulator uses it to open one independent stream per chunk
//!   of paths.
//!
//! [`SimRng`] is the production implementation (`StdRng` + Ziggurat normals).
//!
//! ## Stream derivation
//!
//! ```text
//! stream_seed(seed, epoch, chunk) = mix(mix(mix(seed) ^ epoch) ^ chunk)
//! ```
//!
//! where `mix` is the SplitMix64 finaliser. `epoch` counts calls on a simulator,
//! `chunk` is the index of a fixed-size block of paths. The mapping from path
//! index to stream never depends on thread scheduling.
//!
//! ```rust
//! use qsim_engine::rng::{RandomSource, SimRng};
//!
//! let mut a = SimRng::from_seed(12345);
//! let mut b = SimRng::from_seed(12345);
//! assert_eq!(a.next_standard_normal(), b.next_standard_normal());
//! ```

mod prng;
mod source;
mod stream;

pub use prng::SimRng;
pub use source::{RandomSource, StreamSource};
pub use stream::{splitmix64, stream_seed};
