//! RSA key generation and textbook encryption
//!
//! Keys are derived from first principles: two random primes with a minimum
//! size and a minimum distance, then a small random prime public exponent
//! inverted modulo lcm(p-1, q-1). No padding scheme is applied.

pub mod exponent;
pub mod modulus;
pub mod validation;

pub use exponent::carmichael_lambda;
pub use validation::check_keypair;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::config::RsaParams;
use crate::crypto::{bytes_to_int, int_to_bytes, minimal_byte_length};
use crate::error::{Error, Result};
use crate::prime::SearchLimits;
use crate::random::RandomSource;

/// RSA public key (n, e)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: BigUint,
    pub e: BigUint,
}

/// Full RSA key pair
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub p: BigUint,
    pub q: BigUint,
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
}

/// Derives RSA keys under a set of size and search limits
#[derive(Clone, Debug)]
pub struct RsaKeyBuilder {
    pub params: RsaParams,
    pub limits: SearchLimits,
}

impl RsaKeyBuilder {
    pub fn new(params: RsaParams, limits: SearchLimits) -> Self {
        Self { params, limits }
    }

    /// Modulus and exponents in one go
    pub fn generate(
        &self,
        rng: &mut RandomSource,
        p_bits: u64,
        q_bits: u64,
        e_bits: u64,
    ) -> Result<RsaKeyPair> {
        self.require_prime_bits("p", p_bits)?;
        self.require_prime_bits("q", q_bits)?;
        if e_bits < 2 {
            return Err(Error::InvalidKeySize {
                component: "e",
                bits: e_bits,
                min: 2,
            });
        }

        let (n, p, q) = self.generate_modulus(rng, p_bits, q_bits)?;
        let (d, e) = self.generate_exponents(rng, e_bits, &p, &q)?;
        Ok(RsaKeyPair { p, q, n, e, d })
    }

    /// Key with the configured modulus split evenly between p and q
    pub fn generate_default(&self, rng: &mut RandomSource) -> Result<RsaKeyPair> {
        let p_bits = self.params.modulus_bits / 2;
        let q_bits = self.params.modulus_bits - p_bits;
        self.generate(rng, p_bits, q_bits, self.params.exponent_bits)
    }

    fn require_prime_bits(&self, component: &'static str, bits: u64) -> Result<()> {
        if bits < self.params.min_prime_bits {
            return Err(Error::InvalidKeySize {
                component,
                bits,
                min: self.params.min_prime_bits,
            });
        }
        Ok(())
    }
}

/// c = m^e mod n
pub fn encrypt(m: &BigUint, e: &BigUint, n: &BigUint) -> Result<BigUint> {
    check_operand(m, n)?;
    Ok(m.modpow(e, n))
}

/// m = c^d mod n
pub fn decrypt(c: &BigUint, d: &BigUint, n: &BigUint) -> Result<BigUint> {
    check_operand(c, n)?;
    Ok(c.modpow(d, n))
}

fn check_operand(value: &BigUint, n: &BigUint) -> Result<()> {
    if n.is_zero() {
        return Err(Error::InvalidRange("RSA modulus is zero".into()));
    }
    if value >= n {
        return Err(Error::InvalidRange(format!(
            "RSA operand {} is not below the modulus",
            value.to_str_radix(16)
        )));
    }
    Ok(())
}

impl RsaPublicKey {
    pub fn encrypt(&self, m: &BigUint) -> Result<BigUint> {
        encrypt(m, &self.e, &self.n)
    }

    /// Encrypt a big-endian message into exactly `minimal_byte_length(n)` bytes
    pub fn encrypt_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let c = self.encrypt(&bytes_to_int(data))?;
        int_to_bytes(&c, minimal_byte_length(&self.n))
    }
}

impl RsaKeyPair {
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }

    pub fn encrypt(&self, m: &BigUint) -> Result<BigUint> {
        encrypt(m, &self.e, &self.n)
    }

    pub fn decrypt(&self, c: &BigUint) -> Result<BigUint> {
        decrypt(c, &self.d, &self.n)
    }

    /// Decrypt to the minimal big-endian encoding of the plaintext.
    ///
    /// Leading zero bytes of the plaintext do not survive.
    pub fn decrypt_bytes(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let m = self.decrypt(&bytes_to_int(ciphertext))?;
        int_to_bytes(&m, minimal_byte_length(&m))
    }

    /// Modulus size in bits
    pub fn bits(&self) -> u64 {
        self.n.bits()
    }
}
