//! Property-based tests for the semiprime sieve.
//!
//! These use the `proptest` framework to verify invariants across thousands
//! of randomly generated bounds, rather than the specific fixed points the
//! unit tests pin. The reference classifier is trial-division Ω from
//! `arith`, which shares no code with the counting sieve.
//!
//! # How to run
//!
//! ```bash
//! cargo test --test property_tests
//!
//! # Increase case count for thorough testing (default is 256):
//! PROPTEST_CASES=2000 cargo test --test property_tests
//! ```

use proptest::prelude::*;

use semisieve::arith::{big_omega, isqrt};
use semisieve::sieve::{SemiprimeSieve, Totals};

proptest! {
    /// The classification predicate agrees with trial division on every
    /// index of the sieved range.
    ///
    /// **Property**: for all i in [0, x], is_semiprime(i) == (i >= 4 && Ω(i) == 2).
    ///
    /// This is the strongest statement about the engine: the dual-array
    /// accumulation plus the (count, product) rule is exactly the Ω(i) == 2
    /// test, for every index at once.
    #[test]
    fn prop_classifier_matches_trial_division(x in 4u32..2500) {
        let sieve = SemiprimeSieve::new(x);
        for i in 0..=x {
            let expected = i >= 4 && big_omega(i as u64) == 2;
            prop_assert_eq!(
                sieve.is_semiprime(i), expected,
                "x = {}, i = {}", x, i
            );
        }
    }

    /// isqrt is exact over the full u64 domain.
    ///
    /// **Property**: a = isqrt(n) satisfies a² <= n < (a+1)², checked in
    /// u128 so the squares cannot wrap. The float seed is only an estimate;
    /// the correction loop must never accept an off-by-one root, because the
    /// engine's prime-table bound (and with it the classification rule)
    /// hangs off this value.
    #[test]
    fn prop_isqrt_exact(n in any::<u64>()) {
        let a = isqrt(n) as u128;
        let n = n as u128;
        prop_assert!(a * a <= n, "isqrt too large for {}", n);
        prop_assert!((a + 1) * (a + 1) > n, "isqrt too small for {}", n);
    }

    /// Running the sieve twice over the same bound yields identical output.
    ///
    /// **Property**: the engine is a pure function of (bound, prime list) —
    /// no hidden state survives a run.
    #[test]
    fn prop_idempotent(x in 4u32..5000) {
        let a = SemiprimeSieve::new(x);
        let b = SemiprimeSieve::new(x);
        prop_assert!(a.iter().eq(b.iter()), "x = {}", x);
        prop_assert_eq!(a.totals(), b.totals());
    }

    /// The semiprime set is monotone in the bound.
    ///
    /// **Property**: the set for bound x, restricted to values <= x, is a
    /// prefix (by value) of the set for any x' >= x. Growing the bound can
    /// only append larger semiprimes, never change earlier classifications.
    #[test]
    fn prop_monotone_prefix(x in 4u32..2000, extra in 0u32..2000) {
        let small = SemiprimeSieve::new(x);
        let large = SemiprimeSieve::new(x + extra);
        let prefix: Vec<u32> = large.iter().take_while(|&s| s <= x).collect();
        prop_assert_eq!(small.iter().collect::<Vec<u32>>(), prefix, "x = {}", x);
    }

    /// Totals are consistent with the iterator they summarize.
    ///
    /// **Property**: totals() == fold over iter() — count is the number of
    /// yielded values, sum their u64 sum.
    #[test]
    fn prop_totals_match_iter(x in 4u32..10_000) {
        let sieve = SemiprimeSieve::new(x);
        let (count, sum) = sieve
            .iter()
            .fold((0u64, 0u64), |(c, s), v| (c + 1, s + v as u64));
        prop_assert_eq!(sieve.totals(), Totals { count, sum });
    }

    /// Every yielded semiprime with a factor above isqrt(x) decomposes as
    /// (small prime) × (prime cofactor).
    ///
    /// **Property**: for yielded s with a smallest prime factor p such that
    /// s/p > isqrt(x), the cofactor s/p is itself prime — the engine's
    /// inferred-large-factor branch never admits a composite cofactor.
    #[test]
    fn prop_inferred_cofactor_is_prime(x in 10u32..3000) {
        let sieve = SemiprimeSieve::new(x);
        let sqrt_x = isqrt(x as u64);
        for s in sieve.iter() {
            let s = s as u64;
            let mut p = 2u64;
            while p * p <= s && s % p != 0 {
                p += 1;
            }
            let smallest = if p * p <= s { p } else { s };
            let cofactor = s / smallest;
            if cofactor > sqrt_x {
                prop_assert_eq!(
                    big_omega(cofactor), 1,
                    "s = {} yielded with composite large cofactor {}", s, cofactor
                );
            }
        }
    }
}
