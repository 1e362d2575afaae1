//! Error types for prime, RSA and curve operations

use thiserror::Error;

/// Result type for primecurve operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for primecurve operations
#[derive(Error, Debug)]
pub enum Error {
    /// Bounds or bit lengths that cannot describe a valid request
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// RSA component size below the allowed floor
    #[error("invalid key size for {component}: {bits} bits (minimum {min})")]
    InvalidKeySize {
        component: &'static str,
        bits: u64,
        min: u64,
    },

    /// A bounded search ran out of attempts
    #[error("{context}: no probable prime found after {attempts} attempts")]
    PrimeSearchExhausted {
        context: &'static str,
        attempts: u64,
    },

    /// The search deadline passed before a prime was found
    #[error("{context}: deadline exceeded after {attempts} attempts")]
    DeadlineExceeded {
        context: &'static str,
        attempts: u64,
    },

    /// The search was cancelled through its token
    #[error("{context}: cancelled")]
    Cancelled { context: &'static str },

    /// A generated value fell outside its own range (logic defect)
    #[error("internal error: {value} outside [{min}, {max}]")]
    RangeExhausted {
        value: String,
        min: String,
        max: String,
    },

    /// Modular inverse does not exist
    #[error("{value} has no inverse modulo {modulus}")]
    NotInvertible { value: String, modulus: String },

    /// Integer does not fit in the requested byte length
    #[error("encoding overflow: value needs {needed} bytes, buffer has {available}")]
    EncodingOverflow { needed: usize, available: usize },

    /// Key material failed a consistency check
    #[error("invalid key: {0}")]
    InvalidKey(&'static str),

    /// Message does not fit in one curve point
    #[error("message of {len} bytes exceeds the {max} bytes a point can carry")]
    MessageTooLong { len: usize, max: usize },

    /// No tweak byte produced a valid x-coordinate
    #[error("message cannot be embedded in a curve point")]
    NotEmbeddable,

    /// Point does not satisfy the curve equation
    #[error("point is not on the curve")]
    PointNotOnCurve,

    /// Parameter file could not be parsed
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the error signals a bug in this crate rather than bad input
    /// or bad luck. Callers should not retry these.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::RangeExhausted { .. })
    }

    pub(crate) fn not_invertible(value: &impl ToString, modulus: &impl ToString) -> Self {
        Error::NotInvertible {
            value: value.to_string(),
            modulus: modulus.to_string(),
        }
    }
}
