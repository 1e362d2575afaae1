//! Common types and constants

use num_bigint::BigUint;

use crate::crypto::{AffinePoint, Curve};

/// Curves known by name, with descriptions
pub const CURVE_NAMES: &[(&str, &str)] = &[
    ("test23", "y^2 = x^3 + x + 1 over F23, 28 points (textbook example)"),
    ("prime192v1", "NIST P-192 / X9.62 prime192v1"),
];

/// A curve together with a base point and its order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedCurve {
    pub name: &'static str,
    pub curve: Curve,
    pub generator: AffinePoint,
    pub order: BigUint,
}

impl NamedCurve {
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "test23" => Some(TestCurve23::group()),
            "prime192v1" | "P-192" | "secp192r1" => Some(Prime192v1::group()),
            _ => None,
        }
    }

    /// Field size in bytes
    pub fn field_len(&self) -> usize {
        ((self.curve.p.bits() + 7) / 8) as usize
    }
}

/// Small curve for exhaustive checks: y^2 = x^3 + x + 1 over F23
#[derive(Clone)]
pub struct TestCurve23;

impl TestCurve23 {
    pub const P: u32 = 23;
    pub const A: u32 = 1;
    pub const B: u32 = 1;
    pub const GX: u32 = 3;
    pub const GY: u32 = 10;
    pub const ORDER: u32 = 28;

    pub fn group() -> NamedCurve {
        NamedCurve {
            name: "test23",
            curve: Curve::new(
                BigUint::from(Self::P),
                BigUint::from(Self::A),
                BigUint::from(Self::B),
            ),
            generator: AffinePoint::new(BigUint::from(Self::GX), BigUint::from(Self::GY)),
            order: BigUint::from(Self::ORDER),
        }
    }
}

/// X9.62 prime192v1 (NIST P-192)
#[derive(Clone)]
pub struct Prime192v1;

impl Prime192v1 {
    const P: [u8; 24] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    ];
    const A: [u8; 24] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfc,
    ];
    const B: [u8; 24] = [
        0x64, 0x21, 0x05, 0x19, 0xe5, 0x9c, 0x80, 0xe7,
        0x0f, 0xa7, 0xe9, 0xab, 0x72, 0x24, 0x30, 0x49,
        0xfe, 0xb8, 0xde, 0xec, 0xc1, 0x46, 0xb9, 0xb1,
    ];
    const GX: [u8; 24] = [
        0x18, 0x8d, 0xa8, 0x0e, 0xb0, 0x30, 0x90, 0xf6,
        0x7c, 0xbf, 0x20, 0xeb, 0x43, 0xa1, 0x88, 0x00,
        0xf4, 0xff, 0x0a, 0xfd, 0x82, 0xff, 0x10, 0x12,
    ];
    const GY: [u8; 24] = [
        0x07, 0x19, 0x2b, 0x95, 0xff, 0xc8, 0xda, 0x78,
        0x63, 0x10, 0x11, 0xed, 0x6b, 0x24, 0xcd, 0xd5,
        0x73, 0xf9, 0x77, 0xa1, 0x1e, 0x79, 0x48, 0x11,
    ];
    const N: [u8; 24] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0x99, 0xde, 0xf8, 0x36,
        0x14, 0x6b, 0xc9, 0xb1, 0xb4, 0xd2, 0x28, 0x31,
    ];

    pub fn p() -> BigUint {
        BigUint::from_bytes_be(&Self::P)
    }

    pub fn a() -> BigUint {
        BigUint::from_bytes_be(&Self::A)
    }

    pub fn b() -> BigUint {
        BigUint::from_bytes_be(&Self::B)
    }

    pub fn gx() -> BigUint {
        BigUint::from_bytes_be(&Self::GX)
    }

    pub fn gy() -> BigUint {
        BigUint::from_bytes_be(&Self::GY)
    }

    pub fn n() -> BigUint {
        BigUint::from_bytes_be(&Self::N)
    }

    pub fn group() -> NamedCurve {
        NamedCurve {
            name: "prime192v1",
            curve: Curve::new(Self::p(), Self::a(), Self::b()),
            generator: AffinePoint::new(Self::gx(), Self::gy()),
            order: Self::n(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        for (name, _) in CURVE_NAMES {
            let group = NamedCurve::by_name(name).unwrap();
            assert_eq!(&group.name, name);
            assert!(group.curve.contains(&group.generator));
        }
        assert!(NamedCurve::by_name("secp256k1").is_none());
    }

    #[test]
    fn test_p192_field_len() {
        let group = Prime192v1::group();
        assert_eq!(group.field_len(), 24);
        assert_eq!(Prime192v1::p().bits(), 192);
        assert_eq!(Prime192v1::a(), Prime192v1::p() - 3u32);
    }
}
