//! Elliptic curve point operations over prime fields
//!
//! Short Weierstrass curves y^2 = x^3 + ax + b. Points come in two
//! representations sharing the [`PointArithmetic`] interface:
//!
//! * [`AffinePoint`]: (x, y), one field inversion per operation.
//! * [`ProjectivePoint`]: (X, Y, Z) with x = X/Z, y = Y/Z. No inversions
//!   until [`ProjectivePoint::to_affine`].
//!
//! Coordinates are kept reduced into [0, p). None of this is constant time.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::{mod_inverse, mod_sqrt, sub_mod};
use crate::error::{Error, Result};

/// Curve parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    pub p: BigUint,
    pub a: BigUint,
    /// Only used by [`Curve::contains`] and [`Curve::lift_x`]
    pub b: BigUint,
}

impl Curve {
    pub fn new(p: BigUint, a: BigUint, b: BigUint) -> Self {
        let a = a % &p;
        let b = b % &p;
        Self { p, a, b }
    }

    /// x^3 + ax + b mod p
    fn rhs(&self, x: &BigUint) -> BigUint {
        let p = &self.p;
        let x = x % p;
        (&x * &x % p * &x + &self.a * &x + &self.b) % p
    }

    /// Check the curve equation. The identity is always on the curve.
    pub fn contains(&self, point: &AffinePoint) -> bool {
        if point.infinity {
            return true;
        }
        let p = &self.p;
        if &point.x >= p || &point.y >= p {
            return false;
        }
        &point.y * &point.y % p == self.rhs(&point.x)
    }

    /// A y with (x, y) on the curve, if x is a valid abscissa
    pub fn lift_x(&self, x: &BigUint) -> Option<BigUint> {
        mod_sqrt(&self.rhs(x), &self.p)
    }

    /// Build a point and check that it lies on the curve
    pub fn point(&self, x: BigUint, y: BigUint) -> Result<AffinePoint> {
        let point = AffinePoint::new(x, y);
        if !self.contains(&point) {
            return Err(Error::PointNotOnCurve);
        }
        Ok(point)
    }

    /// k * P computed in projective coordinates with one final inversion
    pub fn mul(&self, k: &BigUint, point: &AffinePoint) -> Result<AffinePoint> {
        ProjectivePoint::from_affine(point)
            .mul(k, self)?
            .to_affine(self)
    }

    /// P + Q computed in projective coordinates
    pub fn add(&self, lhs: &AffinePoint, rhs: &AffinePoint) -> Result<AffinePoint> {
        ProjectivePoint::from_affine(lhs)
            .add(&ProjectivePoint::from_affine(rhs), self)?
            .to_affine(self)
    }
}

/// Group operations shared by both point representations
pub trait PointArithmetic: Clone + Sized {
    fn identity() -> Self;

    fn is_identity(&self) -> bool;

    /// 2P
    fn double(&self, curve: &Curve) -> Result<Self>;

    /// P + Q
    fn add(&self, other: &Self, curve: &Curve) -> Result<Self>;

    /// -P
    fn negate(&self, curve: &Curve) -> Self;

    /// Scalar multiplication using double-and-add algorithm.
    ///
    /// Starts from P and walks k from its second-highest bit down to bit 0.
    fn mul(&self, k: &BigUint, curve: &Curve) -> Result<Self> {
        if k.is_zero() {
            return Ok(Self::identity());
        }

        let mut result = self.clone();
        for i in (0..k.bits() - 1).rev() {
            result = result.double(curve)?;
            if k.bit(i) {
                result = result.add(self, curve)?;
            }
        }

        Ok(result)
    }
}

/// Elliptic curve point in affine coordinates
///
/// The identity is flagged by `infinity` and stored as (0, 0).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffinePoint {
    pub x: BigUint,
    pub y: BigUint,
    pub infinity: bool,
}

impl AffinePoint {
    /// Create a new point (no curve check, see [`Curve::point`])
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self {
            x,
            y,
            infinity: false,
        }
    }
}

impl PointArithmetic for AffinePoint {
    fn identity() -> Self {
        Self {
            x: BigUint::zero(),
            y: BigUint::zero(),
            infinity: true,
        }
    }

    fn is_identity(&self) -> bool {
        self.infinity
    }

    fn double(&self, curve: &Curve) -> Result<Self> {
        let p = &curve.p;
        if self.infinity {
            return Ok(self.clone());
        }
        let x = &self.x % p;
        let y = &self.y % p;
        if y.is_zero() {
            return Ok(Self::identity());
        }

        // s = (3*x^2 + a) / (2*y) mod p
        let numerator = (BigUint::from(3u32) * &x * &x + &curve.a) % p;
        let denominator = (BigUint::from(2u32) * &y) % p;
        let s = numerator * mod_inverse(&denominator, p)? % p;

        // x3 = s^2 - 2*x1
        let x3 = sub_mod(&(&s * &s % p), &(BigUint::from(2u32) * &x % p), p);
        // y3 = s * (x1 - x3) - y1
        let y3 = sub_mod(&(&s * sub_mod(&x, &x3, p) % p), &y, p);

        Ok(Self::new(x3, y3))
    }

    fn add(&self, other: &Self, curve: &Curve) -> Result<Self> {
        if self.infinity {
            return Ok(other.clone());
        }
        if other.infinity {
            return Ok(self.clone());
        }

        let p = &curve.p;
        let (x1, y1) = (&self.x % p, &self.y % p);
        let (x2, y2) = (&other.x % p, &other.y % p);

        if x1 == x2 {
            if y1 == y2 {
                return self.double(curve);
            }
            // Points are inverse of each other
            return Ok(Self::identity());
        }

        // s = (y2 - y1) / (x2 - x1) mod p
        let numerator = sub_mod(&y2, &y1, p);
        let denominator = sub_mod(&x2, &x1, p);
        let s = numerator * mod_inverse(&denominator, p)? % p;

        // x3 = s^2 - x1 - x2
        let x3 = sub_mod(&(&s * &s % p), &((&x1 + &x2) % p), p);
        // y3 = s * (x1 - x3) - y1
        let y3 = sub_mod(&(&s * sub_mod(&x1, &x3, p) % p), &y1, p);

        Ok(Self::new(x3, y3))
    }

    fn negate(&self, curve: &Curve) -> Self {
        if self.infinity {
            return self.clone();
        }
        let p = &curve.p;
        Self::new(&self.x % p, sub_mod(&BigUint::zero(), &(&self.y % p), p))
    }
}

/// Elliptic curve point in projective coordinates (identity has Z = 0)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectivePoint {
    pub x: BigUint,
    pub y: BigUint,
    pub z: BigUint,
}

impl ProjectivePoint {
    pub fn new(x: BigUint, y: BigUint, z: BigUint) -> Self {
        Self { x, y, z }
    }

    pub fn from_affine(point: &AffinePoint) -> Self {
        if point.infinity {
            return Self::identity();
        }
        Self::new(point.x.clone(), point.y.clone(), BigUint::one())
    }

    /// Divide through by Z. The identity converts to the affine identity.
    pub fn to_affine(&self, curve: &Curve) -> Result<AffinePoint> {
        let p = &curve.p;
        if self.z.is_zero() {
            return Ok(AffinePoint::identity());
        }
        if self.z.is_one() {
            return Ok(AffinePoint::new(&self.x % p, &self.y % p));
        }
        let z_inv = mod_inverse(&self.z, p)?;
        Ok(AffinePoint::new(&self.x * &z_inv % p, &self.y * &z_inv % p))
    }

    /// Same affine point, whatever the scaling of the coordinates
    pub fn equivalent(&self, other: &Self, curve: &Curve) -> bool {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }
        let p = &curve.p;
        &self.x * &other.z % p == &other.x * &self.z % p
            && &self.y * &other.z % p == &other.y * &self.z % p
    }
}

impl PointArithmetic for ProjectivePoint {
    fn identity() -> Self {
        Self::new(BigUint::zero(), BigUint::zero(), BigUint::zero())
    }

    fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    fn double(&self, curve: &Curve) -> Result<Self> {
        if self.is_identity() {
            return Ok(self.clone());
        }
        let p = &curve.p;
        let (x, y, z) = (&self.x, &self.y, &self.z);

        let s = y * z % p;
        let e = y * &s % p;
        let f = x * &e % p;
        // w = 3*x^2 + a*z^2
        let w = (BigUint::from(3u32) * x * x + &curve.a * z * z) % p;
        // h = w^2 - 8*f
        let f8 = (&f << 3u32) % p;
        let h = sub_mod(&(&w * &w % p), &f8, p);

        // x3 = 2*s*h
        let x3 = (&s * &h << 1u32) % p;
        // y3 = w*(4*f - h) - 8*e^2
        let f4 = (&f << 2u32) % p;
        let e2_8 = (&e * &e << 3u32) % p;
        let y3 = sub_mod(&(&w * sub_mod(&f4, &h, p) % p), &e2_8, p);
        // z3 = 8*s^3
        let z3 = (&s * &s * &s << 3u32) % p;

        Ok(Self::new(x3, y3, z3))
    }

    fn add(&self, other: &Self, curve: &Curve) -> Result<Self> {
        if self.is_identity() {
            return Ok(other.clone());
        }
        if other.is_identity() {
            return Ok(self.clone());
        }
        let p = &curve.p;
        let (x1, y1, z1) = (&self.x, &self.y, &self.z);
        let (x2, y2, z2) = (&other.x, &other.y, &other.z);

        let x1z2 = x1 * z2 % p;
        let x2z1 = x2 * z1 % p;
        let y1z2 = y1 * z2 % p;
        let y2z1 = y2 * z1 % p;

        if x1z2 == x2z1 {
            if y1z2 == y2z1 {
                return self.double(curve);
            }
            return Ok(Self::identity());
        }

        // v = x2*z1 - x1*z2, u = y2*z1 - y1*z2, t = x2*z1 + x1*z2
        let v = sub_mod(&x2z1, &x1z2, p);
        let u = sub_mod(&y2z1, &y1z2, p);
        let t = (&x2z1 + &x1z2) % p;

        let v2 = &v * &v % p;
        let v3 = &v2 * &v % p;
        let z1z2 = z1 * z2 % p;

        // a = u^2*z1*z2 - v^2*t
        let a = sub_mod(&(&u * &u % p * &z1z2 % p), &(&v2 * &t % p), p);

        let x3 = &v * &a % p;
        let z3 = &v3 * &z1z2 % p;
        // y3 = (x1*z2*v^2 - a)*u - y1*z2*v^3
        let y3 = sub_mod(
            &(sub_mod(&(&x1z2 * &v2 % p), &a, p) * &u % p),
            &(&y1z2 * &v3 % p),
            p,
        );

        Ok(Self::new(x3, y3, z3))
    }

    fn negate(&self, curve: &Curve) -> Self {
        if self.is_identity() {
            return self.clone();
        }
        let p = &curve.p;
        Self::new(
            self.x.clone(),
            sub_mod(&BigUint::zero(), &(&self.y % p), p),
            self.z.clone(),
        )
    }
}
