//! Seeded random number generation
//!
//! Every placement decision is drawn from a [`GameRng`] owned by the
//! generation call. The stream is ChaCha8 seeded through
//! `SeedableRng::seed_from_u64`, and bounded integers are produced by
//! explicit rejection sampling over `next_u64`, so a seed maps to the
//! same dungeon on every platform and every build of this crate.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random source for map generation
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed (new games without a requested seed)
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `low..=high`
    ///
    /// # Panics
    ///
    /// Panics if `low > high`.
    pub fn next_int(&mut self, low: i32, high: i32) -> i32 {
        assert!(low <= high, "next_int called with low ({low}) > high ({high})");

        let span = (high as i64 - low as i64 + 1) as u64;
        (low as i64 + self.below(span) as i64) as i32
    }

    /// Fair coin
    pub fn coin_flip(&mut self) -> bool {
        self.next_int(0, 1) == 1
    }

    /// Choose a random element from a slice
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.below(items.len() as u64) as usize])
        }
    }

    /// Fisher-Yates shuffle in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i as u64 + 1) as usize;
            items.swap(i, j);
        }
    }

    /// Uniform value in `0..span`, `span > 0`
    fn below(&mut self, span: u64) -> u64 {
        // Largest multiple of span that fits, values above it would bias the low end
        let zone = (u64::MAX / span) * span;
        loop {
            let v = self.rng.next_u64();
            if v < zone {
                return v % span;
            }
        }
    }
}

/// Derive an independent seed for one level of a multi-level run
///
/// SplitMix64 finalizer over `run_seed + depth * golden gamma`.
pub fn level_seed(run_seed: u64, depth: u32) -> u64 {
    let mut z = run_seed.wrapping_add((depth as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
