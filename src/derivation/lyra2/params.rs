//! Parameter definitions and validation for Lyra2.
//!
//! This module defines the cost parameters of Lyra2 and checks them before
//! any memory is allocated.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::padding::padded_words;
use crate::sponge::{BLOCK_LEN_BYTES, BLOCK_LEN_INT64};

/// Smallest supported number of matrix rows.
///
/// Rows 0 and 1 are filled before the setup loop, which needs at least one
/// more row to revisit them.
pub const MIN_ROWS: usize = 3;

/// Configuration parameters for Lyra2.
///
/// The memory matrix holds `rows × columns` blocks of 96 bytes; together
/// with `time_cost` (the number of wandering passes) this sets the cost of
/// one derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lyra2Params {
    /// Number of wandering passes over the matrix (minimum 1).
    pub time_cost: u64,
    /// Number of matrix rows (minimum 3).
    pub rows: usize,
    /// Number of blocks per row (minimum 1).
    pub columns: usize,
    /// Length of the derived key in bytes.
    pub key_len: usize,
}

/// Errors raised while validating [`Lyra2Params`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Lyra2ParamError {
    #[error("the memory matrix needs at least 3 rows, got {rows}")]
    TooFewRows { rows: usize },
    #[error("the memory matrix needs at least one column")]
    TooFewColumns,
    #[error("time cost must be at least 1")]
    TooFewPasses,
    #[error(
        "padded password and salt need {required_words} words but the matrix holds {available_words}"
    )]
    InputTooLong {
        required_words: usize,
        available_words: usize,
    },
}

impl Lyra2Params {
    /// Number of 64-bit words in the memory matrix, or `None` on overflow.
    pub fn matrix_words(&self) -> Option<usize> {
        self.rows
            .checked_mul(self.columns)?
            .checked_mul(BLOCK_LEN_INT64)
    }

    /// Size of the memory matrix in bytes, or `None` on overflow.
    pub fn memory_bytes(&self) -> Option<usize> {
        self.rows
            .checked_mul(self.columns)?
            .checked_mul(BLOCK_LEN_BYTES)
    }

    /// Checks the cost parameters alone.
    pub(crate) fn validate(&self) -> Result<(), Lyra2ParamError> {
        if self.time_cost < 1 {
            return Err(Lyra2ParamError::TooFewPasses);
        }

        if self.rows < MIN_ROWS {
            return Err(Lyra2ParamError::TooFewRows { rows: self.rows });
        }

        if self.columns < 1 {
            return Err(Lyra2ParamError::TooFewColumns);
        }

        Ok(())
    }

    /// Checks that the padded password and salt fit in the matrix.
    ///
    /// The padded input is written into the matrix before absorption, so it
    /// cannot exceed the matrix size. A matrix too large to address is
    /// reported by the allocator instead.
    pub(crate) fn validate_input(
        &self,
        password_len: usize,
        salt_len: usize,
    ) -> Result<(), Lyra2ParamError> {
        let required_words = padded_words(password_len, salt_len);

        match self.matrix_words() {
            Some(available_words) if available_words < required_words => {
                Err(Lyra2ParamError::InputTooLong {
                    required_words,
                    available_words,
                })
            }
            _ => Ok(()),
        }
    }
}

impl Default for Lyra2Params {
    /// Default parameters: 1 pass, 8 × 8 matrix (6 KiB), 32-byte key.
    fn default() -> Self {
        Self {
            time_cost: 1,
            rows: 8,
            columns: 8,
            key_len: 32,
        }
    }
}
