//! Prime sizing for bucket arrays.
//!
//! Both tables keep a prime bucket count. Quadratic probing over a prime modulus visits
//! `(capacity + 1) / 2` distinct slots before repeating, which is what the 0.5 load bound of
//! the open addressing table relies on.

/// Returns true if `n` is prime, by trial division with odd factors up to `sqrt(n)`.
#[must_use]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n.is_multiple_of(2) {
        return false;
    }

    let mut factor: usize = 3;
    while factor.saturating_mul(factor) <= n {
        if n.is_multiple_of(factor) {
            return false;
        }
        factor = factor.saturating_add(2);
    }

    true
}

/// Returns the smallest odd prime greater than or equal to `n`.
///
/// Even inputs are bumped to the next odd number and only odd candidates are tested after
/// that, so `0`, `1` and `2` all give 3. Use [`prime_capacity`] to keep a prime as is.
#[must_use]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n.is_multiple_of(2) { n.saturating_add(1) } else { n };
    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }

    candidate
}

/// Rounds a resize target to a prime, keeping it as is when it already is one.
#[must_use]
pub fn prime_capacity(requested: usize) -> usize {
    if is_prime(requested) { requested } else { next_prime(requested) }
}
