//! Random prime search
//!
//! Both searches draw one random odd starting point, pick a direction once,
//! and walk by two until a probable prime turns up. The walk wraps around
//! instead of leaving the requested bit length or range.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use super::is_probable_prime;
use crate::config::PrimeParams;
use crate::error::{Error, Result};
use crate::random::RandomSource;

/// Shared flag that stops running searches
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Bounds applied to every prime search run with these limits
#[derive(Clone, Debug)]
pub struct SearchLimits {
    pub rounds: u32,
    pub max_steps: u64,
    pub deadline: Option<Instant>,
    pub cancel: Option<CancelToken>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::from_params(&PrimeParams::default())
    }
}

impl SearchLimits {
    /// Limits from configuration. A configured timeout starts counting now.
    pub fn from_params(params: &PrimeParams) -> Self {
        Self {
            rounds: params.rabin_rounds,
            max_steps: params.max_search_steps,
            deadline: params
                .timeout_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            cancel: None,
        }
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Fail on zero rounds, or once `steps` candidates have been rejected past a limit
    pub(crate) fn check(&self, context: &'static str, steps: u64) -> Result<()> {
        if self.rounds == 0 {
            return Err(Error::InvalidRange(format!(
                "{}: at least one Miller-Rabin round is required",
                context
            )));
        }
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(Error::Cancelled { context });
        }
        if steps > self.max_steps {
            return Err(Error::PrimeSearchExhausted {
                context,
                attempts: steps,
            });
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(Error::DeadlineExceeded {
                context,
                attempts: steps,
            });
        }
        Ok(())
    }
}

/// Random probable prime of exactly `bits` bits
pub fn random_prime(rng: &mut RandomSource, bits: u64, limits: &SearchLimits) -> Result<BigUint> {
    if bits < 2 {
        return Err(Error::InvalidRange(format!(
            "prime bit length must be at least 2, got {}",
            bits
        )));
    }
    limits.check("random_prime", 0)?;

    let one = BigUint::one();
    let msb = &one << (bits - 1);

    let upward = rng.random_bit();
    let mut p = rng.uniform_bits(bits);
    p |= &msb; // Set MSB
    p |= &one; // Set odd number

    let mut steps = 0u64;
    while !is_probable_prime(&p, limits.rounds, rng) {
        steps += 1;
        limits.check("random_prime", steps)?;
        if upward {
            p += 2u32;
            if p.bits() != bits {
                p = &msb + &one; // 100.....1
            }
        } else {
            p -= 2u32;
            if p.bits() != bits {
                p = (&one << bits) - &one; // 111.....1
            }
        }
    }
    Ok(p)
}

/// Random probable prime p with pmin <= p <= pmax.
///
/// The walk covers the odd numbers inside the range, so 2 is never returned.
pub fn random_prime_in_range(
    rng: &mut RandomSource,
    pmax: &BigUint,
    pmin: &BigUint,
    limits: &SearchLimits,
) -> Result<BigUint> {
    if pmax <= pmin {
        return Err(Error::InvalidRange(format!(
            "empty prime range [{}, {}]",
            pmin, pmax
        )));
    }
    if *pmax <= BigUint::from(2u32) {
        return Err(Error::InvalidRange(format!(
            "prime range upper bound {} must exceed 2",
            pmax
        )));
    }
    limits.check("random_prime_in_range", 0)?;

    // Odd window [lo, hi] inside [pmin, pmax]
    let three = BigUint::from(3u32);
    let mut lo = if pmin.is_even() {
        pmin + 1u32
    } else {
        pmin.clone()
    };
    if lo < three {
        lo = three;
    }
    let hi = if pmax.is_even() {
        pmax - 1u32
    } else {
        pmax.clone()
    };
    if lo > hi {
        return Err(Error::InvalidRange(format!(
            "no odd candidates in [{}, {}]",
            pmin, pmax
        )));
    }

    let candidates = ((&hi - &lo) >> 1) + 1u32;
    let mut p = &lo + (rng.uniform_below(&candidates)? << 1);
    let upward = rng.random_bit();

    let mut remaining = candidates;
    let mut steps = 0u64;
    loop {
        if is_probable_prime(&p, limits.rounds, rng) {
            break;
        }
        remaining -= 1u32;
        steps += 1;
        if remaining.is_zero() {
            return Err(Error::PrimeSearchExhausted {
                context: "random_prime_in_range",
                attempts: steps,
            });
        }
        limits.check("random_prime_in_range", steps)?;

        if upward {
            p += 2u32;
            if p > hi {
                p = lo.clone();
            }
        } else if p == lo {
            p = hi.clone();
        } else {
            p -= 2u32;
        }
    }

    if &p < pmin || &p > pmax {
        return Err(Error::RangeExhausted {
            value: p.to_str_radix(16),
            min: pmin.to_str_radix(16),
            max: pmax.to_str_radix(16),
        });
    }
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prime::primes_below;

    #[test]
    fn test_fixed_bit_length() {
        let mut rng = RandomSource::seeded(10);
        let limits = SearchLimits::default();
        for bits in [2u64, 3, 8, 16, 33, 64, 128] {
            let p = random_prime(&mut rng, bits, &limits).unwrap();
            assert_eq!(p.bits(), bits);
            assert!(p.is_odd());
        }
    }

    #[test]
    fn test_small_primes_are_real() {
        let mut rng = RandomSource::seeded(11);
        let limits = SearchLimits::default();
        let table: Vec<BigUint> = primes_below(1 << 12).into_iter().map(BigUint::from).collect();
        for _ in 0..50 {
            let p = random_prime(&mut rng, 12, &limits).unwrap();
            assert!(table.contains(&p), "{} is not prime", p);
        }
    }

    #[test]
    fn test_bit_length_rejected() {
        let mut rng = RandomSource::seeded(12);
        let limits = SearchLimits::default();
        assert!(matches!(
            random_prime(&mut rng, 1, &limits),
            Err(Error::InvalidRange(_))
        ));
        assert!(random_prime(&mut rng, 0, &limits).is_err());
    }

    #[test]
    fn test_range_bounds_respected() {
        let mut rng = RandomSource::seeded(13);
        let limits = SearchLimits::default();
        let cases = [(3u32, 100u32), (90, 97), (1_000, 1_100), (0, 10), (24, 30), (14, 17)];
        for (min, max) in cases {
            let (pmin, pmax) = (BigUint::from(min), BigUint::from(max));
            for _ in 0..20 {
                let p = random_prime_in_range(&mut rng, &pmax, &pmin, &limits).unwrap();
                assert!(p >= pmin && p <= pmax, "{} outside [{}, {}]", p, min, max);
                assert!(primes_below(max as usize + 1).contains(&p.to_u32_digits()[0]));
            }
        }
    }

    #[test]
    fn test_range_rejects_bad_bounds() {
        let mut rng = RandomSource::seeded(14);
        let limits = SearchLimits::default();
        let cases = [(10u32, 10u32), (10, 5), (0, 2), (1, 2)];
        for (min, max) in cases {
            let err = random_prime_in_range(
                &mut rng,
                &BigUint::from(max),
                &BigUint::from(min),
                &limits,
            )
            .unwrap_err();
            assert!(matches!(err, Error::InvalidRange(_)));
        }
    }

    #[test]
    fn test_range_without_primes() {
        // 24..=28 holds no prime
        let mut rng = RandomSource::seeded(15);
        let limits = SearchLimits::default();
        let err = random_prime_in_range(
            &mut rng,
            &BigUint::from(28u32),
            &BigUint::from(24u32),
            &limits,
        )
        .unwrap_err();
        assert!(matches!(err, Error::PrimeSearchExhausted { .. }));
        assert!(!err.is_internal());
    }

    #[test]
    fn test_step_ceiling() {
        // With no steps allowed only a prime starting point succeeds
        let mut rng = RandomSource::seeded(16);
        let limits = SearchLimits::default().with_max_steps(0);
        let mut exhausted = 0;
        for _ in 0..10 {
            match random_prime(&mut rng, 40, &limits) {
                Ok(p) => assert_eq!(p.bits(), 40),
                Err(Error::PrimeSearchExhausted { attempts, .. }) => {
                    assert_eq!(attempts, 1);
                    exhausted += 1;
                }
                Err(other) => panic!("unexpected error {}", other),
            }
        }
        assert!(exhausted > 0);
    }

    #[test]
    fn test_cancelled_search() {
        let mut rng = RandomSource::seeded(17);
        let token = CancelToken::new();
        token.cancel();
        let limits = SearchLimits::default().with_cancel(token);
        let err = random_prime(&mut rng, 64, &limits).unwrap_err();
        assert!(matches!(err, Error::Cancelled { .. }));
    }

    #[test]
    fn test_expired_deadline() {
        let mut rng = RandomSource::seeded(18);
        let limits = SearchLimits::default().with_deadline(Instant::now());
        let err = random_prime(&mut rng, 64, &limits).unwrap_err();
        assert!(matches!(err, Error::DeadlineExceeded { .. }));
    }

    #[test]
    fn test_zero_rounds_rejected() {
        // Zero rounds would accept any composite without a small factor
        let mut rng = RandomSource::seeded(19);
        let limits = SearchLimits::default().with_rounds(0);
        let err = random_prime(&mut rng, 64, &limits).unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));
        let err = random_prime_in_range(
            &mut rng,
            &BigUint::from(1u64 << 40),
            &BigUint::from(1u64 << 39),
            &limits,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));
    }

    #[test]
    fn test_custom_rounds_and_timeout() {
        let mut rng = RandomSource::seeded(20);
        let limits = SearchLimits::default()
            .with_rounds(1)
            .with_timeout(Duration::from_secs(60));
        assert_eq!(limits.rounds, 1);
        let p = random_prime(&mut rng, 48, &limits).unwrap();
        assert_eq!(p.bits(), 48);

        let limits = SearchLimits::default().with_timeout(Duration::ZERO);
        let err = random_prime(&mut rng, 48, &limits).unwrap_err();
        assert!(matches!(err, Error::DeadlineExceeded { .. }));
    }
}
