//! Deterministic random number generation.
//!
//! Every source of randomness in a match (deck shuffles, random bots) flows
//! from one seeded `GameRng`, so a match is fully reproducible from its
//! configuration seed.
//!
//! ```
//! use take5::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut seat = rng.for_context("seat-1");
//!
//! // Same seed, same context: same sequence.
//! let mut again = GameRng::new(42).for_context("seat-1");
//! let cards = [3u8, 14, 15, 92];
//! assert_eq!(seat.choose(&cards), again.choose(&cards));
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Seeded ChaCha8 RNG with deterministic per-context streams.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a stream for a named purpose (e.g. `"deck"`, `"seat-2"`).
    ///
    /// Depends only on the seed and the context, not on how much of this
    /// RNG has been consumed. `FxHasher` is a fixed algorithm, so derived
    /// seeds are stable across builds.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Shuffle a slice in place (uniform permutation).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
