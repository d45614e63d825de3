//! # Sieve — Semiprime Enumeration Engine
//!
//! Enumerates all semiprimes (Ω(n) = 2: either p·q with p ≠ q, or p²) in
//! [4, x] for a u32 bound x, without factoring anything. The engine keeps
//! two arrays indexed 0..=x and classifies every index from their final
//! values alone:
//!
//! 1. **Factor counts** (`u8`): for each prime p ≤ isqrt(x) and each power
//!    p, p², p³, … ≤ x, every multiple of that power gets its count bumped
//!    by one. A prime p with p^a ∥ i is visited once per dividing power
//!    level, so counts\[i\] ends at Ω(i) restricted to primes ≤ isqrt(x).
//! 2. **Partial products** (`u32`): the same visits multiply products\[i\]
//!    by p, so products\[i\] ends at ∏ p^{a_p} over the sieved primes —
//!    exactly the part of i built from primes ≤ isqrt(x).
//!
//! ## Classification
//!
//! For i ≥ 4, i is a semiprime iff:
//!
//! - `counts[i] == 2 && products[i] == i` — both prime factors (or the
//!   square root, for i = p²) are ≤ isqrt(x), and the product reconstructs
//!   i exactly; or
//! - `counts[i] == 1 && products[i] < i` — the sieve saw a single small
//!   prime p, and the cofactor i/p is the one prime factor of i above
//!   isqrt(x). No integer ≤ x has two prime factors above isqrt(x), so the
//!   cofactor needs no inspection. A prime i is not misclassified here:
//!   it has counts\[i\] == 0.
//!
//! Total work is ~x · Σ 1/p over the sieved prime powers, on the order of
//! x log log x, with two tight allocation-free inner loops; memory is a bit
//! over 5·x bytes (one u8 + one u32 per index).

use tracing::debug;

use crate::arith::isqrt;
use crate::primes;

/// Smallest bound with any semiprime: 4 = 2².
pub const MIN_BOUND: u32 = 4;

/// Ω(i) < 32 for any i < 2^32, so the u8 counters cannot saturate. The
/// engine asserts this bound in debug builds.
const MAX_FACTOR_COUNT: u8 = 32;

/// Aggregate result of one enumeration: how many semiprimes, and their sum.
/// The sum outgrows u32 long before the bound does (already at x = 10^5),
/// so it is accumulated in u64.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Totals {
    pub count: u64,
    pub sum: u64,
}

/// The filled sieve: both accumulator arrays plus the bound they cover.
///
/// Building one is the entire sieve pass; afterwards the value is
/// immutable and classification reads are O(1) per index.
pub struct SemiprimeSieve {
    bound: u32,
    sqrt_bound: u32,
    counts: Vec<u8>,
    products: Vec<u32>,
}

impl SemiprimeSieve {
    /// Build the sieve for `bound`, generating the prime table internally.
    ///
    /// A bound below [`MIN_BOUND`] produces an empty sieve: no allocation,
    /// no iteration, zero totals.
    pub fn new(bound: u32) -> Self {
        let sqrt_bound = isqrt(bound as u64) as u32;
        let prime_limit = if bound < MIN_BOUND { 0 } else { sqrt_bound };
        let primes = primes::generate_primes(prime_limit);
        debug!(
            bound,
            sqrt_bound,
            primes = primes.len(),
            "prime table ready"
        );
        Self::with_primes(bound, &primes)
    }

    /// Build the sieve for `bound` from an injected prime list.
    ///
    /// `primes` must contain every prime ≤ isqrt(bound), strictly
    /// ascending — the classification rule is silently wrong on a short
    /// list. Primes above isqrt(bound) are harmless but wasted work.
    pub fn with_primes(bound: u32, primes: &[u32]) -> Self {
        let sqrt_bound = isqrt(bound as u64) as u32;
        if bound < MIN_BOUND {
            return SemiprimeSieve {
                bound,
                sqrt_bound,
                counts: Vec::new(),
                products: Vec::new(),
            };
        }
        debug_assert!(primes.windows(2).all(|w| w[0] < w[1]));

        let len = bound as usize + 1;
        let mut counts = vec![0u8; len];
        let mut products = vec![1u32; len];

        let x = bound as u64;
        for &p in primes {
            // power runs through p, p², p³, … ≤ x; u64 so the final
            // overshooting multiply cannot wrap.
            let mut power = p as u64;
            while power <= x {
                let mut m = power;
                while m <= x {
                    let i = m as usize;
                    counts[i] += 1;
                    debug_assert!(counts[i] <= MAX_FACTOR_COUNT);
                    // The running product divides i at every step, so this
                    // never overflows u32.
                    products[i] *= p;
                    m += power;
                }
                power *= p as u64;
            }
        }

        debug!(bound, "sieve pass complete");
        SemiprimeSieve {
            bound,
            sqrt_bound,
            counts,
            products,
        }
    }

    /// The inclusive upper bound this sieve covers.
    pub fn bound(&self) -> u32 {
        self.bound
    }

    /// isqrt of the bound — the threshold between sieved and inferred
    /// prime factors.
    pub fn sqrt_bound(&self) -> u32 {
        self.sqrt_bound
    }

    /// The classification predicate: is `i` a semiprime?
    ///
    /// Indices below 4 or above the bound are never semiprimes here (out
    /// of the sieve's domain).
    pub fn is_semiprime(&self, i: u32) -> bool {
        if i < MIN_BOUND || i > self.bound {
            return false;
        }
        let idx = i as usize;
        let count = self.counts[idx];
        let product = self.products[idx];
        if count == 2 && product == i {
            return true;
        }
        if count == 1 && product < i {
            // The single sieved prime divides i, and the cofactor must lie
            // above isqrt(bound) — otherwise its own factors would have
            // been sieved and count could not be 1. This is the invariant
            // the whole inferred-large-factor branch rests on.
            debug_assert!(i % product == 0);
            debug_assert!(i / product > self.sqrt_bound);
            return true;
        }
        false
    }

    /// Iterate the semiprimes in [4, bound] in ascending order.
    pub fn iter(&self) -> Semiprimes<'_> {
        Semiprimes {
            sieve: self,
            next: MIN_BOUND as u64,
        }
    }

    /// Count and sum of all semiprimes in [4, bound]. One scan, no
    /// allocation.
    pub fn totals(&self) -> Totals {
        let mut count = 0u64;
        let mut sum = 0u64;
        for s in self.iter() {
            count += 1;
            sum += s as u64;
        }
        Totals { count, sum }
    }
}

/// Ascending iterator over the semiprimes of a built sieve.
pub struct Semiprimes<'a> {
    sieve: &'a SemiprimeSieve,
    /// Next index to examine; u64 so a bound of u32::MAX cannot wrap the
    /// final increment.
    next: u64,
}

impl Iterator for Semiprimes<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while self.next <= self.sieve.bound as u64 {
            let i = self.next as u32;
            self.next += 1;
            if self.sieve.is_semiprime(i) {
                return Some(i);
            }
        }
        None
    }
}
