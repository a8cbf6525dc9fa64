//! Round function of the sponge permutation.
//!
//! This is the Blake2b round with the message injection removed: each round
//! mixes the 4×4 word matrix along its columns, then along its diagonals.
//! All additions wrap modulo 2⁶⁴.

use super::STATE_LEN_INT64;

/// Number of rounds applied by the full permutation.
pub const FULL_ROUNDS: usize = 12;

/// Word quadruples mixed by each round: four columns, then four diagonals.
pub const ROUND_QUADRUPLES: [[usize; 4]; 8] = [
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
    [0, 5, 10, 15],
    [1, 6, 11, 12],
    [2, 7, 8, 13],
    [3, 4, 9, 14],
];

/// Rotates a 64-bit word right by `n` bits.
#[inline(always)]
pub fn rotr64(w: u64, n: u32) -> u64 {
    w.rotate_right(n)
}

/// Adds two 64-bit words modulo 2⁶⁴.
#[inline(always)]
pub fn add64(a: u64, b: u64) -> u64 {
    a.wrapping_add(b)
}

/// Blake2b's G mixing function, without message words.
///
/// ```text
/// a = a + b;  d = (d ⊕ a) >>> 32
/// c = c + d;  b = (b ⊕ c) >>> 24
/// a = a + b;  d = (d ⊕ a) >>> 16
/// c = c + d;  b = (b ⊕ c) >>> 63
/// ```
#[inline(always)]
fn g(a: u64, b: u64, c: u64, d: u64) -> (u64, u64, u64, u64) {
    let a = add64(a, b);
    let d = rotr64(d ^ a, 32);
    let c = add64(c, d);
    let b = rotr64(b ^ c, 24);
    let a = add64(a, b);
    let d = rotr64(d ^ a, 16);
    let c = add64(c, d);
    let b = rotr64(b ^ c, 63);
    (a, b, c, d)
}

/// Applies one round (columns, then diagonals) to the state.
#[inline(always)]
pub fn round(v: &mut [u64; STATE_LEN_INT64]) {
    for [a, b, c, d] in ROUND_QUADRUPLES {
        (v[a], v[b], v[c], v[d]) = g(v[a], v[b], v[c], v[d]);
    }
}

/// Full permutation: [`FULL_ROUNDS`] rounds.
pub fn permute_full(v: &mut [u64; STATE_LEN_INT64]) {
    for _ in 0..FULL_ROUNDS {
        round(v);
    }
}

/// Reduced permutation: a single round.
pub fn permute_reduced(v: &mut [u64; STATE_LEN_INT64]) {
    round(v);
}
