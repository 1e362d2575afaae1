//! Random integer source

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::error::{Error, Result};

/// How a [`RandomSource`] seeds its generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seeding {
    /// Reseed from the wall clock before every draw. Not suitable for key
    /// material.
    Clock,
    /// One deterministic stream
    Fixed(u64),
    /// One stream seeded from the operating system
    Entropy,
}

/// Uniform big-integer generator.
///
/// Not `Sync`: give each thread its own instance.
pub struct RandomSource {
    rng: ChaCha20Rng,
    seeding: Seeding,
    last_seed: u64,
}

impl RandomSource {
    /// Clock-seeded source
    pub fn new() -> Self {
        Self::with_seeding(Seeding::Clock)
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_seeding(Seeding::Fixed(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_seeding(Seeding::Entropy)
    }

    pub fn with_seeding(seeding: Seeding) -> Self {
        let (rng, last_seed) = match seeding {
            Seeding::Clock => {
                let seed = clock_seed();
                (ChaCha20Rng::seed_from_u64(seed), seed)
            }
            Seeding::Fixed(seed) => (ChaCha20Rng::seed_from_u64(seed), seed),
            Seeding::Entropy => (ChaCha20Rng::from_entropy(), 0),
        };
        Self {
            rng,
            seeding,
            last_seed,
        }
    }

    pub fn seeding(&self) -> Seeding {
        self.seeding
    }

    /// Uniform r with 0 <= r < limit
    pub fn uniform_below(&mut self, limit: &BigUint) -> Result<BigUint> {
        if limit.is_zero() {
            return Err(Error::InvalidRange("random limit must be positive".into()));
        }
        self.reseed();
        Ok(self.rng.gen_biguint_below(limit))
    }

    /// Uniform r with 0 <= r < 2^bits
    pub fn uniform_bits(&mut self, bits: u64) -> BigUint {
        self.reseed();
        self.rng.gen_biguint(bits)
    }

    /// Uniform r with low <= r < high
    pub fn uniform_range(&mut self, low: &BigUint, high: &BigUint) -> Result<BigUint> {
        if high <= low {
            return Err(Error::InvalidRange(format!(
                "empty random range [{}, {})",
                low, high
            )));
        }
        let span = high - low;
        Ok(self.uniform_below(&span)? + low)
    }

    pub fn random_bit(&mut self) -> bool {
        self.uniform_bits(1).is_one()
    }

    fn reseed(&mut self) {
        if self.seeding != Seeding::Clock {
            return;
        }
        // Wait for the clock to move so two draws never share a seed.
        let mut seed = clock_seed();
        while seed == self.last_seed {
            std::hint::spin_loop();
            seed = clock_seed();
        }
        self.last_seed = seed;
        self.rng = ChaCha20Rng::seed_from_u64(seed);
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw draws continue the current stream without reseeding.
impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

fn clock_seed() -> u64 {
    seed_from_elapsed(SystemTime::now().duration_since(UNIX_EPOCH).ok())
}

/// Nanoseconds since the epoch. A clock set before the epoch falls back to a
/// process-wide counter so successive seeds still differ and are never 0.
fn seed_from_elapsed(elapsed: Option<Duration>) -> u64 {
    static FALLBACK: AtomicU64 = AtomicU64::new(1);
    match elapsed {
        Some(d) => d.as_nanos() as u64,
        None => FALLBACK.fetch_add(1, Ordering::Relaxed),
    }
}
