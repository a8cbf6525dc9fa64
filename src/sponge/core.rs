//! Sponge state, absorb and squeeze.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::round::{permute_full, permute_reduced};
use super::{
    BLAKE2B_IV, BLOCK_LEN_BLAKE2_SAFE_INT64, BLOCK_LEN_BYTES, BLOCK_LEN_INT64, STATE_LEN_INT64,
};

/// Sponge built on the Blake2b round function.
///
/// The state is wiped when the sponge is dropped.
#[derive(Clone)]
pub struct Sponge {
    pub(super) state: [u64; STATE_LEN_INT64],
}

impl Sponge {
    /// Creates a sponge in its initial state.
    ///
    /// The first 512 bits are zero and the remaining 512 bits hold the
    /// Blake2b IV. An all-zero state would be a fixed point of the
    /// permutation, which is why the IV is used even though sponges usually
    /// start from zero.
    pub fn new() -> Self {
        let mut state = [0u64; STATE_LEN_INT64];
        state[BLOCK_LEN_BLAKE2_SAFE_INT64..].copy_from_slice(&BLAKE2B_IV);
        Self { state }
    }

    /// Current state words.
    pub fn state(&self) -> &[u64; STATE_LEN_INT64] {
        &self.state
    }

    /// Applies the 12-round permutation.
    pub fn permute_full(&mut self) {
        permute_full(&mut self.state);
    }

    /// Applies the 1-round permutation.
    pub fn permute_reduced(&mut self) {
        permute_reduced(&mut self.state);
    }

    /// Absorbs one 8-word block and applies the full permutation.
    ///
    /// Only used while absorbing the padded password, salt and parameters.
    pub fn absorb_safe_block(&mut self, block: &[u64; BLOCK_LEN_BLAKE2_SAFE_INT64]) {
        self.state
            .iter_mut()
            .zip(block.iter())
            .for_each(|(s, w)| *s ^= w);

        self.permute_full();
    }

    /// Absorbs one full 12-word block and applies the full permutation.
    pub fn absorb_block(&mut self, block: &[u64; BLOCK_LEN_INT64]) {
        self.state
            .iter_mut()
            .zip(block.iter())
            .for_each(|(s, w)| *s ^= w);

        self.permute_full();
    }

    /// Squeezes `out.len()` bytes from the sponge.
    ///
    /// Output is taken from the little-endian encoding of the state in
    /// chunks of [`BLOCK_LEN_BYTES`]. The full permutation runs after every
    /// complete chunk; a trailing partial chunk is copied from the state as
    /// it stands.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        let mut chunks = out.chunks_exact_mut(BLOCK_LEN_BYTES);

        for chunk in &mut chunks {
            self.write_rate(chunk);
            self.permute_full();
        }

        let rem = chunks.into_remainder();
        if !rem.is_empty() {
            self.write_rate(rem);
        }
    }

    /// Writes the leading `out.len()` bytes of the state, little-endian.
    fn write_rate(&self, out: &mut [u8]) {
        debug_assert!(out.len() <= BLOCK_LEN_BYTES);

        out.chunks_mut(8)
            .zip(self.state.iter())
            .for_each(|(dst, word)| dst.copy_from_slice(&word.to_le_bytes()[..dst.len()]));
    }
}

impl Default for Sponge {
    fn default() -> Self {
        Self::new()
    }
}

impl Zeroize for Sponge {
    fn zeroize(&mut self) {
        self.state.zeroize();
    }
}

impl Drop for Sponge {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Sponge {}
