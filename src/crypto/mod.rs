//! Modular arithmetic helpers, byte codec and elliptic-curve operations

pub mod curve;
pub mod elgamal;
pub mod encoding;

pub use curve::{AffinePoint, Curve, PointArithmetic, ProjectivePoint};
pub use elgamal::{Ciphertext, ElGamalKeyPair};
pub use encoding::{bytes_to_int, int_to_bytes, minimal_byte_length};

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// Calculate modular multiplicative inverse using Extended Euclidean Algorithm
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    fn extended_gcd(a: BigInt, b: BigInt) -> (BigInt, BigInt, BigInt) {
        if a.is_zero() {
            return (b, BigInt::zero(), BigInt::one());
        }
        let (gcd, x1, y1) = extended_gcd(&b % &a, a.clone());
        let x = y1 - (&b / &a) * &x1;
        let y = x1;
        (gcd, x, y)
    }

    if m.is_zero() {
        return Err(Error::not_invertible(a, m));
    }

    let a_int = BigInt::from_biguint(Sign::Plus, a.clone());
    let m_int = BigInt::from_biguint(Sign::Plus, m.clone());

    let (gcd, x, _) = extended_gcd(&a_int % &m_int, m_int.clone());
    if !gcd.is_one() {
        return Err(Error::not_invertible(a, m));
    }

    // Bring a negative coefficient into [0, m)
    let result = x.mod_floor(&m_int);
    result
        .to_biguint()
        .ok_or_else(|| Error::not_invertible(a, m))
}

/// (a - b) mod m for already-reduced operands
pub(crate) fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    if a >= b {
        (a - b) % m
    } else {
        (m + a - b) % m
    }
}

/// Square root modulo an odd prime (Tonelli-Shanks). `None` for non-residues.
pub fn mod_sqrt(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    let one = BigUint::one();
    let a = a % p;
    if a.is_zero() {
        return Some(a);
    }
    if *p == BigUint::from(2u32) {
        return Some(a);
    }

    let p_minus_1 = p - &one;
    let half = &p_minus_1 >> 1;
    if a.modpow(&half, p) != one {
        return None;
    }

    if (p % 4u32) == BigUint::from(3u32) {
        return Some(a.modpow(&((p + &one) >> 2), p));
    }

    // p - 1 = q * 2^s with q odd
    let mut q = p_minus_1.clone();
    let mut s = 0u64;
    while q.is_even() {
        q >>= 1;
        s += 1;
    }

    let mut z = BigUint::from(2u32);
    while z.modpow(&half, p) != p_minus_1 {
        z += 1u32;
        if &z >= p {
            return None;
        }
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut r = a.modpow(&((&q + &one) >> 1), p);

    while !t.is_one() {
        let mut i = 0u64;
        let mut t2 = t.clone();
        while !t2.is_one() {
            t2 = &t2 * &t2 % p;
            i += 1;
            if i == m {
                return None;
            }
        }
        let b = c.modpow(&(BigUint::one() << (m - i - 1)), p);
        m = i;
        c = &b * &b % p;
        t = t * &c % p;
        r = r * &b % p;
    }
    Some(r)
}
