//! Memory matrix for Lyra2.
//!
//! The matrix is a single flat buffer of 64-bit words holding `rows` rows of
//! `columns` blocks each; a block is [`BLOCK_LEN_INT64`] words. The word at
//! `(row, column, offset)` lives at `(row * columns + column) * 12 + offset`.

use zeroize::Zeroize;

use crate::sponge::BLOCK_LEN_INT64;

/// Errors returned when the matrix cannot be created.
#[derive(Debug)]
pub(crate) struct AllocationError {
    /// Requested size in bytes, `None` if it overflows `usize`.
    pub bytes: Option<usize>,
}

/// Row-major matrix of sponge-sized blocks, wiped on drop.
pub(crate) struct MemoryMatrix {
    words: Vec<u64>,
    rows: usize,
    columns: usize,
}

impl MemoryMatrix {
    /// Allocates a zeroed `rows × columns` matrix.
    ///
    /// Allocation failure is reported instead of aborting the process.
    pub(crate) fn allocate(rows: usize, columns: usize) -> Result<Self, AllocationError> {
        let len = rows
            .checked_mul(columns)
            .and_then(|blocks| blocks.checked_mul(BLOCK_LEN_INT64))
            .ok_or(AllocationError { bytes: None })?;

        let bytes = len.checked_mul(8);
        let mut words = Vec::new();
        words
            .try_reserve_exact(len)
            .map_err(|_| AllocationError { bytes })?;
        words.resize(len, 0);

        Ok(Self {
            words,
            rows,
            columns,
        })
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn columns(&self) -> usize {
        self.columns
    }

    /// Number of words in one row.
    #[inline]
    pub(crate) fn row_len(&self) -> usize {
        self.columns * BLOCK_LEN_INT64
    }

    /// Word offset of the first block of `row`.
    #[inline]
    pub(crate) fn row_offset(&self, row: usize) -> usize {
        debug_assert!(row < self.rows, "row {row} out of range");
        row * self.row_len()
    }

    /// Word offset of block `(row, column)`.
    #[inline]
    pub(crate) fn block_offset(&self, row: usize, column: usize) -> usize {
        debug_assert!(column < self.columns, "column {column} out of range");
        self.row_offset(row) + column * BLOCK_LEN_INT64
    }

    /// Copy of block `(row, column)`.
    pub(crate) fn block(&self, row: usize, column: usize) -> [u64; BLOCK_LEN_INT64] {
        let offset = self.block_offset(row, column);
        core::array::from_fn(|p| self.words[offset + p])
    }

    pub(crate) fn words(&self) -> &[u64] {
        &self.words
    }

    pub(crate) fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }
}

impl Drop for MemoryMatrix {
    fn drop(&mut self) {
        self.words.zeroize();
    }
}
