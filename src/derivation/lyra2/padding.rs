//! Encoding of the password, salt and parameters into the first blocks.
//!
//! The absorbed message is
//!
//! ```text
//! pad(password || salt || basil)
//! basil = kLen || |password| || |salt| || T || R || C || 128
//! ```
//!
//! where every basil element is a 64-bit little-endian integer. The message
//! is zero-padded to whole 64-byte blocks and the last byte of the last
//! block is XORed with `0x01`.
//!
//! The block count is `(|password| + |salt| + 48) / 64 + 1`. When the final
//! basil element straddles the end of that buffer only its leading bytes are
//! kept; the dropped bytes are all zero.

use zeroize::Zeroizing;

use crate::sponge::{BLOCK_LEN_BLAKE2_SAFE_BYTES, BLOCK_LEN_BLAKE2_SAFE_INT64};

/// Number of parameters encoded after the salt, excluding the trailer.
const BASIL_PARAMS: usize = 6;

/// Last basil element.
const BASIL_TRAILER: u64 = 128;

/// Number of 64-byte blocks in the padded message.
pub(crate) fn blocks_input(password_len: usize, salt_len: usize) -> usize {
    let size_for_basil = BASIL_PARAMS * 8;
    (password_len + salt_len + size_for_basil) / BLOCK_LEN_BLAKE2_SAFE_BYTES + 1
}

/// Number of 64-bit words in the padded message.
pub(crate) fn padded_words(password_len: usize, salt_len: usize) -> usize {
    blocks_input(password_len, salt_len) * BLOCK_LEN_BLAKE2_SAFE_INT64
}

/// Unpadded message bytes: password, salt, then the basil.
fn message_bytes<'a>(
    key_len: usize,
    time_cost: u64,
    password: &'a [u8],
    salt: &'a [u8],
    rows: usize,
    columns: usize,
) -> impl Iterator<Item = u8> + 'a {
    let basil: [u64; BASIL_PARAMS + 1] = [
        key_len as u64,
        password.len() as u64,
        salt.len() as u64,
        time_cost,
        rows as u64,
        columns as u64,
        BASIL_TRAILER,
    ];

    password
        .iter()
        .chain(salt.iter())
        .copied()
        .chain(basil.into_iter().flat_map(u64::to_le_bytes))
}

/// Builds the padded message as bytes.
///
/// The returned buffer is wiped when dropped.
pub fn build_padded_message(
    key_len: usize,
    time_cost: u64,
    password: &[u8],
    salt: &[u8],
    rows: usize,
    columns: usize,
) -> Zeroizing<Vec<u8>> {
    let len = blocks_input(password.len(), salt.len()) * BLOCK_LEN_BLAKE2_SAFE_BYTES;
    let mut buf = Zeroizing::new(vec![0u8; len]);

    buf.iter_mut()
        .zip(message_bytes(key_len, time_cost, password, salt, rows, columns))
        .for_each(|(dst, byte)| *dst = byte);

    buf[len - 1] ^= 0x01;
    buf
}

/// Writes the padded message directly into `words`, little-endian.
///
/// This keeps the only copy of the password inside the memory matrix, where
/// filling row 0 overwrites it. Returns the number of 8-word blocks written.
///
/// # Panics
///
/// Panics if `words` is shorter than the padded message; callers check this
/// when validating the parameters.
pub(crate) fn write_padded_message(
    words: &mut [u64],
    key_len: usize,
    time_cost: u64,
    password: &[u8],
    salt: &[u8],
    rows: usize,
    columns: usize,
) -> usize {
    let blocks = blocks_input(password.len(), salt.len());
    let len = blocks * BLOCK_LEN_BLAKE2_SAFE_INT64;
    let padded = &mut words[..len];
    padded.fill(0);

    message_bytes(key_len, time_cost, password, salt, rows, columns)
        .take(len * 8)
        .enumerate()
        .for_each(|(i, byte)| padded[i / 8] |= u64::from(byte) << (8 * (i % 8)));

    // Final byte of the buffer is the top byte of the last word.
    padded[len - 1] ^= 0x01u64 << 56;
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_count_rounds_up_past_the_basil() {
        assert_eq!(blocks_input(0, 0), 1);
        assert_eq!(blocks_input(8, 4), 1);
        assert_eq!(blocks_input(15, 1), 2);
        assert_eq!(blocks_input(16, 0), 2);
        assert_eq!(blocks_input(80, 0), 3);
    }

    #[test]
    fn layout_of_short_message() {
        let buf = build_padded_message(32, 1, b"password", b"salt", 4, 4);
        assert_eq!(buf.len(), 64);

        assert_eq!(&buf[..8], b"password");
        assert_eq!(&buf[8..12], b"salt");

        let basil: Vec<u64> = buf[12..60]
            .chunks_exact(8)
            .map(|c| u64::from_le_bytes(c.try_into().unwrap()))
            .collect();
        assert_eq!(basil, vec![32, 8, 4, 1, 4, 4]);

        // Trailer 128 starts at byte 60 and is cut after 4 bytes.
        assert_eq!(&buf[60..63], &[0x80, 0, 0]);
        assert_eq!(buf[63], 0x01);
    }

    #[test]
    fn trailer_on_last_byte_is_combined_with_final_bit() {
        // 15 + 1 + 48 = 64 data bytes would overflow one block: two blocks,
        // trailer at offset 64.
        let buf = build_padded_message(32, 1, b"abcdefghijklmno", b"s", 4, 2);
        assert_eq!(buf.len(), 128);
        assert_eq!(buf[64], 0x80);
        assert_eq!(buf[127], 0x01);

        // 14 + 1 + 48 = 63: trailer lands on the very last byte.
        let buf = build_padded_message(32, 2, b"abcdefghijklmn", b"s", 4, 2);
        assert_eq!(buf.len(), 64);
        assert_eq!(buf[63], 0x81);
    }

    #[test]
    fn in_place_words_match_byte_encoding() {
        let cases: [(&[u8], &[u8]); 4] = [
            (b"", b""),
            (b"password", b"salt"),
            (b"abcdefghijklmn", b"s"),
            (&[0xA5; 150], &[0x5A; 33]),
        ];

        for (password, salt) in cases {
            let bytes = build_padded_message(64, 3, password, salt, 16, 4);

            let mut words = vec![u64::MAX; bytes.len() / 8 + 5];
            let blocks = write_padded_message(&mut words, 64, 3, password, salt, 16, 4);
            assert_eq!(blocks * BLOCK_LEN_BLAKE2_SAFE_BYTES, bytes.len());

            let expected: Vec<u64> = bytes
                .chunks_exact(8)
                .map(|c| u64::from_le_bytes(c.try_into().unwrap()))
                .collect();
            assert_eq!(&words[..expected.len()], expected.as_slice());
            assert!(words[expected.len()..].iter().all(|&w| w == u64::MAX));
        }
    }
}
