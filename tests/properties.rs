//! Property-based tests for the codec, prime search, RSA and curve arithmetic

use num_bigint::BigUint;
use primecurve::crypto::{bytes_to_int, int_to_bytes, minimal_byte_length};
use primecurve::crypto::{PointArithmetic, ProjectivePoint};
use primecurve::prime::{factorize, primes_below, random_prime, random_prime_in_range};
use primecurve::types::{Prime192v1, TestCurve23};
use primecurve::{Error, RandomSource, RsaKeyBuilder, RsaParams, SearchLimits};
use proptest::prelude::*;

proptest! {
    #[test]
    fn codec_preserves_value(bytes in prop::collection::vec(any::<u8>(), 0..64), pad in 0usize..8) {
        let v = bytes_to_int(&bytes);
        let len = minimal_byte_length(&v) + pad;
        let out = int_to_bytes(&v, len).unwrap();
        prop_assert_eq!(out.len(), len);
        prop_assert_eq!(bytes_to_int(&out), v);
    }

    #[test]
    fn codec_refuses_short_buffers(bytes in prop::collection::vec(1u8..=255, 2..32)) {
        let v = bytes_to_int(&bytes);
        let short = minimal_byte_length(&v) - 1;
        let is_overflow = matches!(
            int_to_bytes(&v, short),
            Err(Error::EncodingOverflow { .. })
        );
        prop_assert!(is_overflow);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn range_prime_found_iff_one_exists(seed in any::<u64>(), min in 0u32..20_000, width in 1u32..200) {
        let max = min + width;
        let mut rng = RandomSource::seeded(seed);
        let odd_primes: Vec<u32> = primes_below(max as usize + 1)
            .into_iter()
            .filter(|&p| p > 2 && p >= min)
            .collect();

        match random_prime_in_range(
            &mut rng,
            &BigUint::from(max),
            &BigUint::from(min),
            &SearchLimits::default(),
        ) {
            Ok(p) => {
                prop_assert!(odd_primes.iter().any(|&q| BigUint::from(q) == p));
            }
            Err(Error::PrimeSearchExhausted { .. }) => prop_assert!(odd_primes.is_empty()),
            Err(Error::InvalidRange(_)) => prop_assert!(max <= 2),
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }

    #[test]
    fn small_fixed_size_prime_is_prime(seed in any::<u64>(), bits in 2u64..=40) {
        let mut rng = RandomSource::seeded(seed);
        let p = random_prime(&mut rng, bits, &SearchLimits::default()).unwrap();
        prop_assert_eq!(p.bits(), bits);
        // Trial division is exact at this size
        let v = p.to_u64_digits().first().copied().unwrap_or(0);
        prop_assert_eq!(factorize(v), vec![(v, 1)]);
    }

    #[test]
    fn affine_and_projective_agree(k in any::<u64>()) {
        let group = TestCurve23::group();
        let curve = &group.curve;
        let k = BigUint::from(k);
        let affine = group.generator.mul(&k, curve).unwrap();
        let projective = ProjectivePoint::from_affine(&group.generator)
            .mul(&k, curve)
            .unwrap()
            .to_affine(curve)
            .unwrap();
        prop_assert_eq!(&affine, &projective);

        let reduced = k % BigUint::from(TestCurve23::ORDER);
        prop_assert_eq!(group.generator.mul(&reduced, curve).unwrap(), affine);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn scalar_mul_distributes_over_addition(a in any::<u64>(), b in any::<u64>()) {
        let group = Prime192v1::group();
        let curve = &group.curve;
        let (a, b) = (BigUint::from(a), BigUint::from(b));
        let lhs = curve.mul(&(&a + &b), &group.generator).unwrap();
        let rhs = curve
            .add(
                &curve.mul(&a, &group.generator).unwrap(),
                &curve.mul(&b, &group.generator).unwrap(),
            )
            .unwrap();
        prop_assert!(curve.contains(&lhs));
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn large_fixed_size_prime_passes_fermat(seed in any::<u64>(), bits in 41u64..=512) {
        let mut rng = RandomSource::seeded(seed);
        let p = random_prime(&mut rng, bits, &SearchLimits::default()).unwrap();
        prop_assert_eq!(p.bits(), bits);
        let p_minus_1 = &p - 1u32;
        for base in [2u32, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
            prop_assert_eq!(BigUint::from(base).modpow(&p_minus_1, &p), BigUint::from(1u32));
        }
        for small in primes_below(1000) {
            prop_assert!(&p % small != BigUint::from(0u32));
        }
    }

    #[test]
    fn rsa_round_trip(seed in any::<u64>(), m in any::<u64>()) {
        let mut rng = RandomSource::seeded(seed);
        let key = RsaKeyBuilder::new(RsaParams::default(), SearchLimits::default())
            .generate(&mut rng, 64, 64, 17)
            .unwrap();
        let m = BigUint::from(m);
        let c = key.encrypt(&m).unwrap();
        prop_assert_eq!(key.decrypt(&c).unwrap(), m);
    }
}
