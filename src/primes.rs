//! # Primes — Prime Source for the Semiprime Sieve
//!
//! Generates the ordered list of primes the engine sieves with. The engine
//! only ever asks for primes up to isqrt(x) (at most 65535 for a u32 bound),
//! but the generator accepts any u32 limit.
//!
//! ## Algorithm: Wheel-30 Sieve of Eratosthenes
//!
//! Only integers coprime to 30 = 2·3·5 are tracked — 8 residues per block
//! of 30, packed one byte per block, so the bitmap is 8/30 ≈ 26.7% the size
//! of a naive odd-only sieve. The wheel primes 2, 3, 5 are emitted directly.
//! Complexity: O(n log log n) time, O(n/30) space.

use crate::arith::isqrt;

/// The 8 residues mod 30 coprime to the wheel primes {2, 3, 5}.
const SPOKES: [u8; 8] = [1, 7, 11, 13, 17, 19, 23, 29];

/// Residue mod 30 → bit position within a block byte; 255 marks residues
/// the wheel never stores (multiples of 2, 3, or 5).
const SPOKE_BIT: [u8; 30] = [
    255, 0, 255, 255, 255, 255, 255, 1, 255, 255, 255, 2, 255, 3, 255, 255, 255, 4, 255, 5, 255,
    255, 255, 6, 255, 255, 255, 255, 255, 7,
];

/// Generate all primes `<= limit` in ascending order.
///
/// Returns an empty list for `limit < 2`. Ownership of the list transfers
/// to the caller; the engine holds it for the duration of one sieve pass.
pub fn generate_primes(limit: u32) -> Vec<u32> {
    if limit < 2 {
        return Vec::new();
    }
    if limit < 7 {
        return [2u32, 3, 5].iter().copied().filter(|&p| p <= limit).collect();
    }

    let limit = limit as usize;
    let num_blocks = limit / 30 + 1;
    // All bits set: every spoke position starts presumed prime.
    let mut wheel = vec![0xFFu8; num_blocks];

    // Cross off composites. Only spoke values up to isqrt(limit) need to
    // act as sieving primes; marking starts at n² since smaller multiples
    // have a smaller prime factor and were already crossed off.
    let sqrt_limit = isqrt(limit as u64) as usize;
    for block in 0..num_blocks {
        for &r in &SPOKES {
            let n = block * 30 + r as usize;
            if n < 7 || n > sqrt_limit {
                continue;
            }
            if wheel[block] & (1 << SPOKE_BIT[r as usize]) == 0 {
                continue; // already known composite
            }
            let mut m = n * n;
            while m <= limit {
                let bit = SPOKE_BIT[m % 30];
                if bit != 255 {
                    wheel[m / 30] &= !(1 << bit);
                }
                m += n;
            }
        }
    }

    // Collect survivors in ascending order.
    let mut primes = Vec::with_capacity(prime_count_upper_bound(limit));
    primes.extend_from_slice(&[2, 3, 5]);
    for (block, &byte) in wheel.iter().enumerate() {
        if byte == 0 {
            continue;
        }
        for (bit, &r) in SPOKES.iter().enumerate() {
            if byte & (1 << bit) != 0 {
                let n = block * 30 + r as usize;
                if n > 5 && n <= limit {
                    primes.push(n as u32);
                }
            }
        }
    }
    primes
}

/// Overestimate of π(n) for preallocation: 1.3 · n / ln n.
fn prime_count_upper_bound(n: usize) -> usize {
    if n < 10 {
        return 4;
    }
    let nf = n as f64;
    (1.3 * nf / nf.ln()) as usize
}
