//! Deterministic random number generation.
//!
//! Deck shuffling is the only source of randomness in the engine. Using a
//! seedable ChaCha8 generator keeps whole sessions reproducible: the
//! session manager holds one master RNG and forks an independent child per
//! session, so a session replays identically from the same master seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable, forkable RNG.
///
/// Same seed produces an identical sequence; each fork produces a
/// different but deterministic sequence.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from the OS entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG into an independent branch.
    ///
    /// Each fork gets a distinct derived seed, so per-session RNGs drawn
    /// from one master are mutually independent yet reproducible.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range(0..1000), rng2.gen_range(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = GameRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..10).map(|_| rng.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_forks_are_reproducible() {
        let mut master1 = GameRng::new(7);
        let mut master2 = GameRng::new(7);

        let mut fork1 = master1.fork();
        let mut fork2 = master2.fork();

        for _ in 0..20 {
            assert_eq!(fork1.gen_range(0..1000), fork2.gen_range(0..1000));
        }
    }

    #[test]
    fn test_shuffle_deterministic() {
        let mut rng1 = GameRng::new(9);
        let mut rng2 = GameRng::new(9);

        let mut a: Vec<u32> = (0..52).collect();
        let mut b: Vec<u32> = (0..52).collect();
        rng1.shuffle(&mut a);
        rng2.shuffle(&mut b);

        assert_eq!(a, b);
    }
}
