//! Blake2b-based sponge used by Lyra2.
//!
//! The sponge operates on a 1024-bit state of 16 × 64-bit words. The first
//! words form the rate (the part absorbed into and squeezed from), the
//! remaining words the capacity, which is seeded with the Blake2b IV.
//!
//! The permutation is the Blake2b round function without message words:
//! every round applies the G mixing function to the same column and
//! diagonal quadruples. Two permutations are exposed:
//!
//! - the full permutation (12 rounds), used while absorbing the password,
//!   salt and parameters and when squeezing the final key
//! - the reduced permutation (1 round), used by the row-level squeeze and
//!   duplex operations that fill and mix the memory matrix
//!
//! The module is split into:
//!
//! - [`round`]
//!   The G function and the round/permutation definitions.
//!
//! - `core`
//!   The [`Sponge`] type: initialization, absorb and squeeze.
//!
//! - `duplex`
//!   Reduced-round row operations over a flat word buffer. Rows are given
//!   as word offsets into that buffer; each row holds `columns` blocks of
//!   [`BLOCK_LEN_INT64`] words.

mod core;
mod duplex;
pub mod round;

pub use self::core::Sponge;

/// Number of 64-bit words in the sponge state.
pub const STATE_LEN_INT64: usize = 16;

/// Number of 64-bit words in one matrix block (the sponge's bitrate).
pub const BLOCK_LEN_INT64: usize = 12;

/// Same as [`BLOCK_LEN_INT64`], in bytes.
pub const BLOCK_LEN_BYTES: usize = BLOCK_LEN_INT64 * 8;

/// Number of 64-bit words absorbed per block while reading the input.
pub const BLOCK_LEN_BLAKE2_SAFE_INT64: usize = 8;

/// Same as [`BLOCK_LEN_BLAKE2_SAFE_INT64`], in bytes.
pub const BLOCK_LEN_BLAKE2_SAFE_BYTES: usize = BLOCK_LEN_BLAKE2_SAFE_INT64 * 8;

/// Blake2b initialization vector, loaded into the capacity words.
pub const BLAKE2B_IV: [u64; 8] = [
    0x6a09e667f3bcc908,
    0xbb67ae8584caa73b,
    0x3c6ef372fe94f82b,
    0xa54ff53a5f1d36f1,
    0x510e527fade682d1,
    0x9b05688c2b3e6c1f,
    0x1f83d9abfb41bd6b,
    0x5be0cd19137e2179,
];
