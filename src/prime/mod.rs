//! Probabilistic primality testing and random prime generation

pub mod search;
pub mod sieve;

pub use search::{random_prime, random_prime_in_range, CancelToken, SearchLimits};
pub use sieve::{factorize, primes_below, small_primes, SMALL_PRIME_LIMIT};

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::random::RandomSource;

/// Miller-Rabin rounds used when nothing else is configured
pub const RABIN_ROUNDS: u32 = 25;

/// Trial division by the small-prime table, then `rounds` Miller-Rabin
/// rounds with random witnesses.
pub fn is_probable_prime(n: &BigUint, rounds: u32, rng: &mut RandomSource) -> bool {
    if let Some(small) = n.to_u32() {
        if small < 2 {
            return false;
        }
    }
    for &sp in small_primes() {
        if (n % sp).is_zero() {
            return *n == BigUint::from(sp);
        }
    }
    if *n < BigUint::from(SMALL_PRIME_LIMIT * SMALL_PRIME_LIMIT) {
        // Every composite below 1000^2 has a factor in the table
        return true;
    }

    let one = BigUint::one();
    let n_minus_1 = n - &one;
    let (d, r) = decompose(&n_minus_1);
    let two = BigUint::from(2u32);

    'witness: for _ in 0..rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_1 {
            continue;
        }
        for _ in 1..r {
            x = &x * &x % n;
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Split n - 1 = d * 2^r with d odd
fn decompose(n_minus_1: &BigUint) -> (BigUint, u64) {
    let mut d = n_minus_1.clone();
    let mut r = 0u64;
    while d.is_even() {
        d >>= 1;
        r += 1;
    }
    (d, r)
}
