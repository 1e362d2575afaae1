//! Tunable parameters
//!
//! Defaults are 25 Rabin rounds, a 49-bit RSA prime floor and a 4-bit p/q
//! gap. These are far below modern recommendations. Any field may be
//! overridden from a TOML file:
//!
//! ```toml
//! [prime]
//! rabin_rounds = 40
//!
//! [rsa]
//! min_prime_bits = 256
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::prime::RABIN_ROUNDS;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Params {
    pub prime: PrimeParams,
    pub rsa: RsaParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PrimeParams {
    /// Miller-Rabin rounds per candidate
    pub rabin_rounds: u32,
    /// Ceiling on candidates examined by one prime search
    pub max_search_steps: u64,
    /// Optional wall-clock budget for one prime search
    pub timeout_ms: Option<u64>,
}

impl Default for PrimeParams {
    fn default() -> Self {
        Self {
            rabin_rounds: RABIN_ROUNDS,
            max_search_steps: 1 << 20,
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RsaParams {
    /// Smallest accepted bit length for p and q
    pub min_prime_bits: u64,
    /// Largest allowed bitlen(p) - bitlen(|p - q|)
    pub max_gap_bits: u64,
    /// Draws of q (and fresh p) before giving up on a modulus
    pub max_modulus_attempts: u32,
    /// Draws of e before giving up on an invertible exponent
    pub max_exponent_attempts: u32,
    /// Modulus size used when the caller does not pick one
    pub modulus_bits: u64,
    /// Public exponent size used when the caller does not pick one
    pub exponent_bits: u64,
}

impl Default for RsaParams {
    fn default() -> Self {
        Self {
            min_prime_bits: 49,
            max_gap_bits: 4,
            max_modulus_attempts: 1000,
            max_exponent_attempts: 100,
            modulus_bits: 1024,
            exponent_bits: 5,
        }
    }
}

impl Params {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let params: Self = toml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// Reject settings under which a search could return composites
    pub fn validate(&self) -> Result<()> {
        if self.prime.rabin_rounds == 0 {
            return Err(Error::InvalidRange(
                "prime.rabin_rounds must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let params = Params::from_toml_str("").unwrap();
        assert_eq!(params, Params::default());
        assert_eq!(params.prime.rabin_rounds, 25);
        assert_eq!(params.rsa.min_prime_bits, 49);
        assert_eq!(params.rsa.max_gap_bits, 4);
    }

    #[test]
    fn test_partial_override() {
        let params = Params::from_toml_str(
            "[prime]\nrabin_rounds = 40\ntimeout_ms = 500\n\n[rsa]\nmin_prime_bits = 128\n",
        )
        .unwrap();
        assert_eq!(params.prime.rabin_rounds, 40);
        assert_eq!(params.prime.timeout_ms, Some(500));
        assert_eq!(params.prime.max_search_steps, 1 << 20);
        assert_eq!(params.rsa.min_prime_bits, 128);
        assert_eq!(params.rsa.max_gap_bits, 4);
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let err = Params::from_toml_str("[prime]\nrabin_rounds = 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));
        Params::default().validate().unwrap();
    }

    #[test]
    fn test_bad_config_is_reported() {
        let err = Params::from_toml_str("[prime]\nrabin_rounds = \"many\"\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
