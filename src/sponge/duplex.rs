//! Reduced-round squeeze and duplex operations over matrix rows.
//!
//! Every operation takes the whole matrix as a flat word buffer and the
//! rows it touches as word offsets of the row's first block. Rows may
//! coincide during the wandering phase, so blocks are read into locals and
//! written back in a fixed order within each column.
//!
//! Several operations read their inputs from the first column upwards while
//! writing their output from the last column downwards. Those keep two
//! explicit cursors; the direction is part of the algorithm.

use super::core::Sponge;
use super::BLOCK_LEN_INT64;

/// Copies the block starting at `offset`.
#[inline(always)]
fn read_block(memory: &[u64], offset: usize) -> [u64; BLOCK_LEN_INT64] {
    core::array::from_fn(|p| memory[offset + p])
}

/// Offset of the last block of the row starting at `row`.
#[inline(always)]
fn last_column(row: usize, columns: usize) -> usize {
    row + (columns - 1) * BLOCK_LEN_INT64
}

impl Sponge {
    /// XORs the rotated rate into the block at `offset`.
    ///
    /// Word `p` of the block receives word `(p + 11) % 12` of the state,
    /// i.e. the 12-word rate rotated by one word position.
    #[inline(always)]
    fn xor_rotated_rate(&self, memory: &mut [u64], offset: usize) {
        for p in 0..BLOCK_LEN_INT64 {
            memory[offset + p] ^= self.state[(p + BLOCK_LEN_INT64 - 1) % BLOCK_LEN_INT64];
        }
    }

    /// Fills row 0 with squeezed blocks, from the last column to the first.
    ///
    /// `M[0][C-1-col] = rate; f_reduced()`
    pub fn reduced_squeeze_row0(&mut self, memory: &mut [u64], row_out: usize, columns: usize) {
        let mut out = last_column(row_out, columns);

        for col in 0..columns {
            memory[out..out + BLOCK_LEN_INT64].copy_from_slice(&self.state[..BLOCK_LEN_INT64]);
            self.permute_reduced();

            if col + 1 < columns {
                out -= BLOCK_LEN_INT64;
            }
        }
    }

    /// Derives row 1 from row 0.
    ///
    /// For each column: absorb `M[in][col]`, reduced permutation, then
    /// `M[out][C-1-col] = M[in][col] ⊕ rate`.
    pub fn reduced_duplex_row1(
        &mut self,
        memory: &mut [u64],
        row_in: usize,
        row_out: usize,
        columns: usize,
    ) {
        let mut input = row_in;
        let mut out = last_column(row_out, columns);

        for col in 0..columns {
            let block_in = read_block(memory, input);

            self.state
                .iter_mut()
                .zip(block_in.iter())
                .for_each(|(s, w)| *s ^= w);

            self.permute_reduced();

            for p in 0..BLOCK_LEN_INT64 {
                memory[out + p] = block_in[p] ^ self.state[p];
            }

            input += BLOCK_LEN_INT64;
            if col + 1 < columns {
                out -= BLOCK_LEN_INT64;
            }
        }
    }

    /// Setup-phase duplex over `M[in] ⊞ M[in_out]`.
    ///
    /// `⊞` is the wordwise wrapping addition. For each column, with the
    /// output written from the last column down:
    ///
    /// ```text
    /// absorb(M[in][col] ⊞ M[in_out][col]); f_reduced()
    /// M[out][C-1-col] = M[in][col] ⊕ rate
    /// M[in_out][col] ^= rotW(rate)
    /// ```
    pub fn reduced_duplex_row_setup(
        &mut self,
        memory: &mut [u64],
        row_in: usize,
        row_in_out: usize,
        row_out: usize,
        columns: usize,
    ) {
        let mut input = row_in;
        let mut in_out = row_in_out;
        let mut out = last_column(row_out, columns);

        for col in 0..columns {
            let block_in = read_block(memory, input);
            let block_in_out = read_block(memory, in_out);

            for p in 0..BLOCK_LEN_INT64 {
                self.state[p] ^= block_in[p].wrapping_add(block_in_out[p]);
            }

            self.permute_reduced();

            for p in 0..BLOCK_LEN_INT64 {
                memory[out + p] = block_in[p] ^ self.state[p];
            }

            self.xor_rotated_rate(memory, in_out);

            input += BLOCK_LEN_INT64;
            in_out += BLOCK_LEN_INT64;
            if col + 1 < columns {
                out -= BLOCK_LEN_INT64;
            }
        }
    }

    /// Wandering-phase duplex over `M[in] ⊞ M[in_out]`.
    ///
    /// Same absorption as [`Sponge::reduced_duplex_row_setup`], but all rows
    /// advance from the first column and the output row is updated in place:
    ///
    /// ```text
    /// absorb(M[in][col] ⊞ M[in_out][col]); f_reduced()
    /// M[out][col] ^= rate
    /// M[in_out][col] ^= rotW(rate)
    /// ```
    pub fn reduced_duplex_row(
        &mut self,
        memory: &mut [u64],
        row_in: usize,
        row_in_out: usize,
        row_out: usize,
        columns: usize,
    ) {
        let mut input = row_in;
        let mut in_out = row_in_out;
        let mut out = row_out;

        for _ in 0..columns {
            let block_in = read_block(memory, input);
            let block_in_out = read_block(memory, in_out);

            for p in 0..BLOCK_LEN_INT64 {
                self.state[p] ^= block_in[p].wrapping_add(block_in_out[p]);
            }

            self.permute_reduced();

            for p in 0..BLOCK_LEN_INT64 {
                memory[out + p] ^= self.state[p];
            }

            self.xor_rotated_rate(memory, in_out);

            input += BLOCK_LEN_INT64;
            in_out += BLOCK_LEN_INT64;
            out += BLOCK_LEN_INT64;
        }
    }
}
