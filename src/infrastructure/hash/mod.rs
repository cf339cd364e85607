// Bucket hashing and prime sizing helpers

use std::fmt::{self, Display, Write};

/// Multiplier of the polynomial rolling hash
pub const HASH_MULTIPLIER: u64 = 31;

/// Streams formatted text into a polynomial hash reduced modulo `modulus`.
///
/// Reducing after every character keeps the accumulator bounded while giving
/// the same residue as evaluating the whole polynomial over unbounded integers.
struct PolynomialHasher {
    acc: u64,
    modulus: u64,
}

impl PolynomialHasher {
    fn new(modulus: usize) -> Self {
        assert!(modulus > 0, "hash modulus must be positive");
        PolynomialHasher {
            acc: 0,
            modulus: modulus as u64,
        }
    }

    fn finish(&self) -> usize {
        self.acc as usize
    }
}

impl Write for PolynomialHasher {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            let next = self.acc as u128 * HASH_MULTIPLIER as u128 + ch as u128;
            self.acc = (next % self.modulus as u128) as u64;
        }
        Ok(())
    }
}

/// Polynomial hash of a string, reduced to `0..modulus`.
///
/// Computes `acc = acc * 31 + code_point` over the characters of `key`.
pub fn polynomial_hash(key: &str, modulus: usize) -> usize {
    let mut hasher = PolynomialHasher::new(modulus);
    // write_str above never fails
    let _ = hasher.write_str(key);
    hasher.finish()
}

/// Bucket index of any displayable key.
///
/// The key is hashed through its `Display` form, so `112` and `"112"` land
/// in the same bucket.
pub fn bucket_index<K: Display + ?Sized>(key: &K, modulus: usize) -> usize {
    let mut hasher = PolynomialHasher::new(modulus);
    // write_str above never fails
    let _ = write!(hasher, "{}", key);
    hasher.finish()
}

/// Check whether `n` is prime by trial division over odd divisors
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    let mut divisor = 3;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Smallest prime greater than or equal to `n` (2 for any `n <= 2`)
pub fn find_next_prime(n: usize) -> usize {
    if n <= 2 {
        return 2;
    }

    // Only odd candidates past 2
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}
