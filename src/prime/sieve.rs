//! Sieve of Eratosthenes and trial-division factorization

use std::sync::OnceLock;

/// Bound of the cached trial-division table
pub const SMALL_PRIME_LIMIT: usize = 1000;

/// All primes below `limit`
pub fn primes_below(limit: usize) -> Vec<u32> {
    if limit <= 2 {
        return Vec::new();
    }
    let mut is_prime = vec![true; limit];
    is_prime[0] = false;
    is_prime[1] = false;

    let mut k = 2;
    while k * k < limit {
        if is_prime[k] {
            for i in (k * k..limit).step_by(k) {
                is_prime[i] = false;
            }
        }
        k += 1;
    }

    is_prime
        .iter()
        .enumerate()
        .filter(|(_, &p)| p)
        .map(|(i, _)| i as u32)
        .collect()
}

/// Primes below [`SMALL_PRIME_LIMIT`], computed once
pub fn small_primes() -> &'static [u32] {
    static TABLE: OnceLock<Vec<u32>> = OnceLock::new();
    TABLE.get_or_init(|| primes_below(SMALL_PRIME_LIMIT))
}

/// Prime factorization as (prime, exponent) pairs in increasing order.
///
/// Values below 4 are returned as a single factor of themselves.
pub fn factorize(n: u64) -> Vec<(u64, u32)> {
    if n < 4 {
        return vec![(n, 1)];
    }

    let mut factors = Vec::new();
    let mut m = n;
    let mut prime = 2u64;
    while prime <= m / prime {
        let mut e = 0;
        while m % prime == 0 {
            m /= prime;
            e += 1;
        }
        if e > 0 {
            factors.push((prime, e));
        }
        prime += if prime == 2 { 1 } else { 2 };
    }
    if m != 1 {
        factors.push((m, 1));
    }
    factors
}

/// "2^3 * 3 * 5" style rendering
pub fn format_factors(factors: &[(u64, u32)]) -> String {
    factors
        .iter()
        .map(|&(p, e)| {
            if e == 1 {
                p.to_string()
            } else {
                format!("{}^{}", p, e)
            }
        })
        .collect::<Vec<_>>()
        .join(" * ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primes_below() {
        assert_eq!(primes_below(2), Vec::<u32>::new());
        assert_eq!(primes_below(3), vec![2]);
        assert_eq!(primes_below(30), vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert_eq!(primes_below(10_000).len(), 1229);
    }

    #[test]
    fn test_small_prime_table() {
        let table = small_primes();
        assert_eq!(table.len(), 168);
        assert_eq!(table.first(), Some(&2));
        assert_eq!(table.last(), Some(&997));
    }

    #[test]
    fn test_factorize() {
        assert_eq!(factorize(360), vec![(2, 3), (3, 2), (5, 1)]);
        assert_eq!(factorize(97), vec![(97, 1)]);
        assert_eq!(factorize(3), vec![(3, 1)]);
        assert_eq!(factorize(1), vec![(1, 1)]);
        assert_eq!(factorize(4), vec![(2, 2)]);
        let n = 600_851_475_143u64;
        let product: u64 = factorize(n).iter().map(|&(p, e)| p.pow(e)).product();
        assert_eq!(product, n);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_factors(&factorize(360)), "2^3 * 3^2 * 5");
        assert_eq!(format_factors(&factorize(13)), "13");
    }
}
