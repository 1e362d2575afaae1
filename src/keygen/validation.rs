//! Key validation functions

use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::{carmichael_lambda, RsaKeyPair};
use crate::error::{Error, Result};
use crate::prime::{is_probable_prime, RABIN_ROUNDS};
use crate::random::RandomSource;

/// Check every invariant of an RSA key pair.
///
/// Returns the first violated property as `Error::InvalidKey`.
pub fn check_keypair(key: &RsaKeyPair, max_gap_bits: u64) -> Result<()> {
    if key.n != &key.p * &key.q {
        return Err(Error::InvalidKey("n is not p * q"));
    }

    let mut rng = RandomSource::from_entropy();
    if !is_probable_prime(&key.p, RABIN_ROUNDS, &mut rng) {
        return Err(Error::InvalidKey("p is not prime"));
    }
    if !is_probable_prime(&key.q, RABIN_ROUNDS, &mut rng) {
        return Err(Error::InvalidKey("q is not prime"));
    }
    if !is_probable_prime(&key.e, RABIN_ROUNDS, &mut rng) {
        return Err(Error::InvalidKey("e is not prime"));
    }

    let lambda = carmichael_lambda(&key.p, &key.q);
    if key.d.is_zero() || key.d >= lambda {
        return Err(Error::InvalidKey("d is outside (0, lambda)"));
    }
    if (&key.e * &key.d) % &lambda != BigUint::one() {
        return Err(Error::InvalidKey("e * d is not 1 mod lambda"));
    }

    let gap = if key.p >= key.q {
        &key.p - &key.q
    } else {
        &key.q - &key.p
    };
    if key.p.bits().saturating_sub(gap.bits()) > max_gap_bits {
        return Err(Error::InvalidKey("p and q are too close"));
    }
    Ok(())
}
