use lyra2::sponge::round::{add64, permute_full, permute_reduced, rotr64};
use lyra2::sponge::{BLAKE2B_IV, BLOCK_LEN_INT64, STATE_LEN_INT64, Sponge};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const W: usize = BLOCK_LEN_INT64;

fn initial_state() -> [u64; STATE_LEN_INT64] {
    *Sponge::new().state()
}

// -------------------------------------------------------
// 1. WORD PRIMITIVES
// -------------------------------------------------------

#[test]
fn add64_wraps_silently() {
    assert_eq!(add64(0xFFFF_FFFF_FFFF_FFFF, 1), 0);
    assert_eq!(add64(0xFFFF_FFFF_FFFF_FFFF, 0xFFFF_FFFF_FFFF_FFFF), 0xFFFF_FFFF_FFFF_FFFE);
    assert_eq!(add64(1 << 63, 1 << 63), 0);
}

#[test]
fn rotr64_known_values() {
    assert_eq!(rotr64(1, 1), 1 << 63);
    assert_eq!(rotr64(0x0123_4567_89AB_CDEF, 32), 0x89AB_CDEF_0123_4567);
    assert_eq!(rotr64(0x8000_0000_0000_0001, 63), 0x0000_0000_0000_0003);
}

proptest! {
    #[test]
    fn rotr64_is_inverted_by_complementary_rotation(x in any::<u64>(), n in 1u32..64) {
        prop_assert_eq!(rotr64(rotr64(x, n), 64 - n), x);
    }

    #[test]
    fn add64_matches_modular_arithmetic(a in any::<u64>(), b in any::<u64>()) {
        let wide = (u128::from(a) + u128::from(b)) % (1u128 << 64);
        prop_assert_eq!(u128::from(add64(a, b)), wide);
    }
}

// -------------------------------------------------------
// 2. STATE AND PERMUTATION
// -------------------------------------------------------

#[test]
fn initial_state_is_zero_rate_and_iv_capacity() {
    let state = initial_state();
    assert_eq!(state[..8], [0u64; 8]);
    assert_eq!(state[8..], BLAKE2B_IV);
}

#[test]
fn reduced_permutation_vector() {
    let mut sponge = Sponge::new();
    sponge.permute_reduced();

    let expected: [u64; STATE_LEN_INT64] = [
        0xd11c2568289a5ce3,
        0xadf896b5d4e84d75,
        0x99542821cbc51a74,
        0xfa07bf703990162e,
        0xb6e9fa05e2c01f66,
        0xff193426d19486c9,
        0x693a7bde29cd1e72,
        0xa5b6739e3959379b,
        0x3f4d0d70d56d732c,
        0x30d7fb7104e85893,
        0xc21863fc34430cc9,
        0xbae777f3afa46511,
        0x6711b19b549fa0ad,
        0x122730ae24adadeb,
        0x4d42d55caf4db041,
        0x9ae136ccbda8c5be,
    ];
    assert_eq!(sponge.state(), &expected);
}

#[test]
fn full_permutation_vector() {
    let mut sponge = Sponge::new();
    sponge.permute_full();

    let expected: [u64; STATE_LEN_INT64] = [
        0xe69f10665547562d,
        0xfe66e82e6d2aaf27,
        0xe5a7bf12ac331c68,
        0x0cc2cf054a6a175a,
        0xa274ed3e0898cb5f,
        0x8a217b06a3bb2d8a,
        0x1d52c8c75b21387b,
        0x0938e0f156012bfe,
        0xaba040064c560cea,
        0xd1c49b133af6a59f,
        0x34467e0033b74a7b,
        0x69c4d2cc828315f6,
        0x282885114ed22391,
        0xb7bfc27407b2fae2,
        0x7c8b0a9a324bd87e,
        0xe71689c7eba1c037,
    ];
    assert_eq!(sponge.state(), &expected);
}

#[test]
fn full_permutation_is_twelve_reduced_rounds() {
    let mut full = initial_state();
    permute_full(&mut full);

    let mut reduced = initial_state();
    for _ in 0..12 {
        permute_reduced(&mut reduced);
    }

    assert_eq!(full, reduced);
}

// -------------------------------------------------------
// 3. ABSORB AND SQUEEZE
// -------------------------------------------------------

#[test]
fn absorb_safe_block_vector() {
    let mut sponge = Sponge::new();
    sponge.absorb_safe_block(&[1, 2, 3, 4, 5, 6, 7, 8]);

    assert_eq!(sponge.state()[0], 0x32f50c0c643741c0);
    assert_eq!(sponge.state()[15], 0x66baa3de13aec7cc);
}

#[test]
fn absorb_block_vector() {
    let block: [u64; W] = core::array::from_fn(|i| 0x0101_0101_0101_0101 * (i as u64 + 1));

    let mut sponge = Sponge::new();
    sponge.absorb_block(&block);

    assert_eq!(sponge.state()[0], 0x6c084b465a2c5fac);
    assert_eq!(sponge.state()[11], 0xe4ba1d754e2cc3df);
}

#[test]
fn absorb_block_touches_twelve_rate_words() {
    let mut block = [0u64; W];
    block[11] = 1;

    let mut touched = Sponge::new();
    touched.absorb_block(&block);

    let mut untouched = Sponge::new();
    untouched.absorb_block(&[0u64; W]);

    assert_ne!(touched.state(), untouched.state());
}

fn le_bytes(words: &[u64]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

#[test]
fn squeeze_emits_rate_then_permutes_per_full_chunk() {
    let mut first = initial_state();
    let chunk0 = le_bytes(&first[..W]);
    permute_full(&mut first);
    let chunk1 = le_bytes(&first[..W]);
    permute_full(&mut first);
    let chunk2 = le_bytes(&first[..W]);

    let mut sponge = Sponge::new();
    let mut out = vec![0u8; 200];
    sponge.squeeze(&mut out);

    assert_eq!(out[..96], chunk0[..]);
    assert_eq!(out[96..192], chunk1[..]);
    assert_eq!(out[192..], chunk2[..8]);

    // Two full chunks: two permutations, the partial chunk adds none.
    assert_eq!(sponge.state(), &first);
}

#[test]
fn squeeze_partial_chunk_does_not_permute() {
    let mut sponge = Sponge::new();
    let mut out = [0u8; 13];
    sponge.squeeze(&mut out);

    assert_eq!(sponge.state(), &initial_state());
    assert_eq!(out[..13], le_bytes(&initial_state()[..2])[..13]);
}

#[test]
fn squeeze_exact_chunk_permutes_once() {
    let mut expected = initial_state();
    permute_full(&mut expected);

    let mut sponge = Sponge::new();
    let mut out = [0u8; 96];
    sponge.squeeze(&mut out);
    assert_eq!(sponge.state(), &expected);

    let mut sponge = Sponge::new();
    sponge.squeeze(&mut []);
    assert_eq!(sponge.state(), &initial_state());
}

// -------------------------------------------------------
// 4. ROW OPERATIONS
// -------------------------------------------------------

/// Word-by-word model of the row operations, indexing the buffer directly
/// so that coinciding rows see earlier writes within the same column.
mod model {
    use super::W;
    use lyra2::sponge::round::permute_reduced;

    pub fn squeeze_row0(s: &mut [u64; 16], m: &mut [u64], out: usize, cols: usize) {
        for col in 0..cols {
            let o = out + (cols - 1 - col) * W;
            m[o..o + W].copy_from_slice(&s[..W]);
            permute_reduced(s);
        }
    }

    pub fn duplex_row1(s: &mut [u64; 16], m: &mut [u64], input: usize, out: usize, cols: usize) {
        for col in 0..cols {
            let i = input + col * W;
            let o = out + (cols - 1 - col) * W;
            for p in 0..W {
                s[p] ^= m[i + p];
            }
            permute_reduced(s);
            for p in 0..W {
                m[o + p] = m[i + p] ^ s[p];
            }
        }
    }

    pub fn duplex_row_setup(
        s: &mut [u64; 16],
        m: &mut [u64],
        input: usize,
        in_out: usize,
        out: usize,
        cols: usize,
    ) {
        for col in 0..cols {
            let i = input + col * W;
            let a = in_out + col * W;
            let o = out + (cols - 1 - col) * W;
            for p in 0..W {
                s[p] ^= m[i + p].wrapping_add(m[a + p]);
            }
            permute_reduced(s);
            for p in 0..W {
                m[o + p] = m[i + p] ^ s[p];
            }
            for p in 0..W {
                m[a + p] ^= s[(11 + p) % 12];
            }
        }
    }

    pub fn duplex_row(
        s: &mut [u64; 16],
        m: &mut [u64],
        input: usize,
        in_out: usize,
        out: usize,
        cols: usize,
    ) {
        for col in 0..cols {
            let i = input + col * W;
            let a = in_out + col * W;
            let o = out + col * W;
            for p in 0..W {
                s[p] ^= m[i + p].wrapping_add(m[a + p]);
            }
            permute_reduced(s);
            for p in 0..W {
                m[o + p] ^= s[p];
            }
            for p in 0..W {
                m[a + p] ^= s[(11 + p) % 12];
            }
        }
    }
}

fn random_memory(rng: &mut StdRng, rows: usize, cols: usize) -> Vec<u64> {
    (0..rows * cols * W).map(|_| rng.random()).collect()
}

fn primed_sponge(rng: &mut StdRng) -> Sponge {
    let mut sponge = Sponge::new();
    sponge.absorb_safe_block(&core::array::from_fn(|_| rng.random()));
    sponge
}

#[test]
fn squeeze_row0_fills_from_last_column() {
    let cols = 3;
    let mut memory = vec![0u64; cols * W];
    let mut sponge = Sponge::new();
    sponge.reduced_squeeze_row0(&mut memory, 0, cols);

    let mut expected = initial_state();
    assert_eq!(memory[2 * W..3 * W], expected[..W]);
    permute_reduced(&mut expected);
    assert_eq!(memory[W..2 * W], expected[..W]);
    permute_reduced(&mut expected);
    assert_eq!(memory[..W], expected[..W]);
    permute_reduced(&mut expected);
    assert_eq!(sponge.state(), &expected);
}

#[test]
fn row_operations_match_word_model() {
    let mut rng = StdRng::seed_from_u64(7);
    let rows = 5;

    for cols in [1, 2, 5] {
        let row = |r: usize| r * cols * W;

        // Row 0 squeeze and row 1 duplex.
        let mut memory = random_memory(&mut rng, rows, cols);
        let mut sponge = primed_sponge(&mut rng);
        let mut model_memory = memory.clone();
        let mut model_state = *sponge.state();

        sponge.reduced_squeeze_row0(&mut memory, row(0), cols);
        sponge.reduced_duplex_row1(&mut memory, row(0), row(1), cols);
        model::squeeze_row0(&mut model_state, &mut model_memory, row(0), cols);
        model::duplex_row1(&mut model_state, &mut model_memory, row(0), row(1), cols);

        assert_eq!(memory, model_memory);
        assert_eq!(sponge.state(), &model_state);

        // Setup duplex with distinct rows, as used by the setup phase.
        for (prev, rowa, out) in [(1, 0, 2), (2, 1, 3), (3, 0, 4), (4, 3, 2)] {
            sponge.reduced_duplex_row_setup(&mut memory, row(prev), row(rowa), row(out), cols);
            model::duplex_row_setup(
                &mut model_state,
                &mut model_memory,
                row(prev),
                row(rowa),
                row(out),
                cols,
            );
            assert_eq!(memory, model_memory);
            assert_eq!(sponge.state(), &model_state);
        }

        // Wandering duplex, including every way the three rows can coincide.
        for (prev, rowa, out) in [(4, 2, 0), (0, 0, 3), (3, 1, 1), (1, 1, 1), (2, 4, 2)] {
            sponge.reduced_duplex_row(&mut memory, row(prev), row(rowa), row(out), cols);
            model::duplex_row(
                &mut model_state,
                &mut model_memory,
                row(prev),
                row(rowa),
                row(out),
                cols,
            );
            assert_eq!(memory, model_memory);
            assert_eq!(sponge.state(), &model_state);
        }
    }
}

#[test]
fn setup_duplex_writes_output_backwards() {
    let mut rng = StdRng::seed_from_u64(11);
    let cols = 4;
    let mut memory = random_memory(&mut rng, 3, cols);
    let original = memory.clone();
    let mut sponge = primed_sponge(&mut rng);
    let mut state = *sponge.state();

    sponge.reduced_duplex_row_setup(&mut memory, 0, cols * W, 2 * cols * W, cols);

    // Column 0 of the inputs lands in the last column of the output.
    for p in 0..W {
        state[p] ^= original[p].wrapping_add(original[cols * W + p]);
    }
    permute_reduced(&mut state);
    let last = 2 * cols * W + (cols - 1) * W;
    for p in 0..W {
        assert_eq!(memory[last + p], original[p] ^ state[p]);
        assert_eq!(memory[cols * W + p], original[cols * W + p] ^ state[(p + 11) % 12]);
    }
}

#[test]
#[should_panic]
fn row_offsets_past_the_buffer_panic() {
    let mut memory = vec![0u64; 2 * W];
    let mut sponge = Sponge::new();
    sponge.reduced_duplex_row(&mut memory, 0, W, 2 * W, 1);
}
