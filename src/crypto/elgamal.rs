//! EC-ElGamal encryption of short messages
//!
//! A message is embedded as the x-coordinate of a curve point:
//!
//! ```text
//! 00 || message || 80 || 00 .. 00 || tweak      (field length bytes)
//! ```
//!
//! The leading zero keeps x below p, the `80` marker delimits the message and
//! the tweak byte is bumped until x lands on the curve.

use num_bigint::BigUint;
use num_traits::One;

use super::curve::{AffinePoint, PointArithmetic};
use super::encoding::{bytes_to_int, int_to_bytes};
use crate::error::{Error, Result};
use crate::random::RandomSource;
use crate::types::NamedCurve;

/// Bytes of overhead around the message inside one point
const EMBED_OVERHEAD: usize = 3;

#[derive(Clone, Debug)]
pub struct ElGamalKeyPair {
    pub secret: BigUint,
    pub public: AffinePoint,
}

/// Ciphertext C = (C1, C2) = (rG, M + rQ)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub c1: AffinePoint,
    pub c2: AffinePoint,
}

/// Longest message one point can carry on this curve
pub fn max_message_len(group: &NamedCurve) -> usize {
    group.field_len().saturating_sub(EMBED_OVERHEAD)
}

/// Secret x in [1, n), public Q = xG
pub fn generate_keypair(group: &NamedCurve, rng: &mut RandomSource) -> Result<ElGamalKeyPair> {
    let secret = rng.uniform_range(&BigUint::one(), &group.order)?;
    let public = group.curve.mul(&secret, &group.generator)?;
    Ok(ElGamalKeyPair { secret, public })
}

/// Map a message onto a curve point
pub fn embed_message(group: &NamedCurve, msg: &[u8]) -> Result<AffinePoint> {
    let field_len = group.field_len();
    let max = max_message_len(group);
    if field_len < EMBED_OVERHEAD || msg.len() > max {
        return Err(Error::MessageTooLong {
            len: msg.len(),
            max,
        });
    }

    let mut buf = vec![0u8; field_len];
    buf[1..1 + msg.len()].copy_from_slice(msg);
    buf[1 + msg.len()] = 0x80;

    for tweak in 0..=u8::MAX {
        buf[field_len - 1] = tweak;
        let x = bytes_to_int(&buf);
        if let Some(y) = group.curve.lift_x(&x) {
            return Ok(AffinePoint::new(x, y));
        }
    }
    Err(Error::NotEmbeddable)
}

/// Recover the message carried by an embedded point
pub fn extract_message(group: &NamedCurve, point: &AffinePoint) -> Result<Vec<u8>> {
    if point.is_identity() {
        return Err(Error::NotEmbeddable);
    }
    let buf = int_to_bytes(&point.x, group.field_len())?;
    if buf.len() < EMBED_OVERHEAD {
        return Err(Error::NotEmbeddable);
    }
    // Drop the leading zero and the tweak, then strip the 80 00 .. padding
    let body = &buf[1..buf.len() - 1];
    let marker = body
        .iter()
        .rposition(|&b| b != 0)
        .filter(|&i| body[i] == 0x80)
        .ok_or(Error::NotEmbeddable)?;
    Ok(body[..marker].to_vec())
}

pub fn encrypt(
    group: &NamedCurve,
    public: &AffinePoint,
    msg: &[u8],
    rng: &mut RandomSource,
) -> Result<Ciphertext> {
    if !group.curve.contains(public) {
        return Err(Error::PointNotOnCurve);
    }
    let m = embed_message(group, msg)?;
    let r = rng.uniform_range(&BigUint::one(), &group.order)?;

    let c1 = group.curve.mul(&r, &group.generator)?;
    let shared = group.curve.mul(&r, public)?;
    let c2 = group.curve.add(&m, &shared)?;

    Ok(Ciphertext { c1, c2 })
}

/// M = C2 - x*C1
pub fn decrypt(group: &NamedCurve, secret: &BigUint, ct: &Ciphertext) -> Result<Vec<u8>> {
    let curve = &group.curve;
    if !curve.contains(&ct.c1) || !curve.contains(&ct.c2) {
        return Err(Error::PointNotOnCurve);
    }
    let shared = curve.mul(secret, &ct.c1)?;
    let m = curve.add(&ct.c2, &shared.negate(curve))?;
    extract_message(group, &m)
}
