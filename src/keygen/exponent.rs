//! RSA exponent generation (e, d)

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

use super::RsaKeyBuilder;
use crate::crypto::mod_inverse;
use crate::error::{Error, Result};
use crate::prime::random_prime;
use crate::random::RandomSource;

/// lcm(p - 1, q - 1)
pub fn carmichael_lambda(p: &BigUint, q: &BigUint) -> BigUint {
    let one = BigUint::one();
    (p - &one).lcm(&(q - &one))
}

impl RsaKeyBuilder {
    /// Draw a prime e of `e_bits` bits invertible modulo lcm(p-1, q-1) and
    /// return (d, e) with d = e^-1 in [0, lambda).
    pub fn generate_exponents(
        &self,
        rng: &mut RandomSource,
        e_bits: u64,
        p: &BigUint,
        q: &BigUint,
    ) -> Result<(BigUint, BigUint)> {
        if e_bits < 2 {
            return Err(Error::InvalidKeySize {
                component: "e",
                bits: e_bits,
                min: 2,
            });
        }
        let two = BigUint::from(2u32);
        if p <= &two || q <= &two {
            return Err(Error::InvalidRange(
                "RSA primes must be odd primes".into(),
            ));
        }

        let lambda = carmichael_lambda(p, q);
        for _ in 0..self.params.max_exponent_attempts {
            let e = random_prime(rng, e_bits, &self.limits)?;
            match mod_inverse(&e, &lambda) {
                Ok(d) => return Ok((d, e)),
                Err(Error::NotInvertible { .. }) => continue,
                Err(err) => return Err(err),
            }
        }

        Err(Error::PrimeSearchExhausted {
            context: "generate_exponents",
            attempts: u64::from(self.params.max_exponent_attempts),
        })
    }
}
