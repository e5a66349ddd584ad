//! Deterministic exploration-order shuffle
//!
//! A fixed number of transpositions driven by an additive stride, so two
//! runs with the same queue always explore in the same order. The goal is
//! varied-but-repeatable ordering, not statistical uniformity; nothing here
//! touches an entropy source.
//!
//! The explorer always removes messages from the slice it shuffled, never
//! from an unpermuted copy, so the permuted index is the removal index.

/// Transpositions applied per shuffle
const ROUNDS: usize = 6113;
/// Additive stride feeding the second swap index
const STRIDE: usize = 611_953;
/// Starting value of the stride accumulator
const SEED: usize = 17;

/// Permute `items` in place with the fixed transposition scheme.
///
/// Empty and single-element slices are left untouched.
pub fn deterministic_shuffle<T>(items: &mut [T]) {
    let n = items.len();
    if n < 2 {
        return;
    }
    let mut d = SEED;
    for a in 0..ROUNDS {
        d = d.wrapping_add(STRIDE);
        items.swap(a % n, d % n);
    }
}
