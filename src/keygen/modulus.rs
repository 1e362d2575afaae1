//! RSA modulus generation (n = p * q)

use num_bigint::BigUint;
use num_traits::One;

use super::RsaKeyBuilder;
use crate::error::{Error, Result};
use crate::prime::{random_prime, random_prime_in_range};
use crate::random::RandomSource;

impl RsaKeyBuilder {
    /// Generate (n, p, q) with bitlen(p) = p_bits, bitlen(q) = q_bits and
    /// bitlen(n) = p_bits + q_bits.
    ///
    /// q is redrawn until |p - q| is within `max_gap_bits` of p's length.
    pub fn generate_modulus(
        &self,
        rng: &mut RandomSource,
        p_bits: u64,
        q_bits: u64,
    ) -> Result<(BigUint, BigUint, BigUint)> {
        self.require_prime_bits("p", p_bits)?;
        self.require_prime_bits("q", q_bits)?;

        let one = BigUint::one();
        let n_bits = p_bits + q_bits;
        let n_max = (&one << n_bits) - &one; // 2^nb - 1
        let n_min = &one << (n_bits - 1); // 2^(nb-1)
        let q_max = (&one << q_bits) - &one; // 2^qb - 1
        let q_min = &one << (q_bits - 1); // 2^(qb-1)

        let mut attempts = 0u64;
        let mut p = random_prime(rng, p_bits, &self.limits)?;
        loop {
            attempts += 1;
            if attempts > u64::from(self.params.max_modulus_attempts) {
                return Err(Error::PrimeSearchExhausted {
                    context: "generate_modulus",
                    attempts: attempts - 1,
                });
            }

            let max_q = (&n_max / &p).min(q_max.clone());
            let min_q = ((&n_min + &p - &one) / &p).max(q_min.clone());
            if max_q <= min_q {
                // p too close to a power of two to leave room for q
                p = random_prime(rng, p_bits, &self.limits)?;
                continue;
            }

            let mut q = match random_prime_in_range(rng, &max_q, &min_q, &self.limits) {
                Ok(q) => q,
                Err(Error::PrimeSearchExhausted { .. }) => {
                    p = random_prime(rng, p_bits, &self.limits)?;
                    continue;
                }
                Err(err) => return Err(err),
            };
            let gap = if p >= q { &p - &q } else { &q - &p };
            if p_bits.saturating_sub(gap.bits()) > self.params.max_gap_bits {
                continue;
            }

            if p < q && p_bits == q_bits {
                std::mem::swap(&mut p, &mut q);
            }
            let n = &p * &q;
            return Ok((n, p, q));
        }
    }
}
