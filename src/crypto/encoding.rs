//! Big-endian byte buffer <-> integer conversion

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{Error, Result};

/// Decode an unsigned big-endian byte string
pub fn bytes_to_int(buf: &[u8]) -> BigUint {
    BigUint::from_bytes_be(buf)
}

/// Encode into exactly `out_len` big-endian bytes, left-padded with zeros.
///
/// Values wider than `out_len` are rejected rather than truncated.
pub fn int_to_bytes(v: &BigUint, out_len: usize) -> Result<Vec<u8>> {
    if v.is_zero() {
        return Ok(vec![0u8; out_len]);
    }
    let bytes = v.to_bytes_be();
    if bytes.len() > out_len {
        return Err(Error::EncodingOverflow {
            needed: bytes.len(),
            available: out_len,
        });
    }
    let mut out = vec![0u8; out_len - bytes.len()];
    out.extend_from_slice(&bytes);
    Ok(out)
}

/// Bytes needed for the unsigned big-endian encoding (zero still takes one)
pub fn minimal_byte_length(v: &BigUint) -> usize {
    let nibbles = ((v.bits() + 3) / 4).max(1) as usize;
    (nibbles + 1) / 2
}
