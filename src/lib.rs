//! primecurve - prime generation, RSA key derivation and elliptic curve
//! arithmetic over arbitrary-precision integers.
//!
//! Educational code: nothing here is constant time and the default sizes are
//! far below current recommendations.

pub mod config;
pub mod crypto;
pub mod error;
pub mod keygen;
pub mod prime;
pub mod random;
pub mod types;

pub use config::{Params, PrimeParams, RsaParams};
pub use crypto::{
    bytes_to_int, int_to_bytes, minimal_byte_length, AffinePoint, Curve, PointArithmetic,
    ProjectivePoint,
};
pub use error::{Error, Result};
pub use keygen::{check_keypair, RsaKeyBuilder, RsaKeyPair, RsaPublicKey};
pub use prime::{is_probable_prime, random_prime, random_prime_in_range, SearchLimits};
pub use random::{RandomSource, Seeding};
pub use types::NamedCurve;
