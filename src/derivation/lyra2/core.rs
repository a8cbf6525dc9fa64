use tracing::{debug, debug_span, warn};

use super::memory::{AllocationError, MemoryMatrix};
use super::padding::write_padded_message;
use super::params::{Lyra2ParamError, Lyra2Params};
use super::schedule::{SetupSchedule, next_wandering_row, random_row, wandering_step};
use crate::sponge::{BLOCK_LEN_BLAKE2_SAFE_INT64, Sponge};

/// Errors that can occur during Lyra2 computation.
#[derive(Debug, thiserror::Error)]
pub enum Lyra2Error {
    /// Invalid parameter values.
    #[error("invalid Lyra2 parameters: {0}")]
    InvalidParams(#[from] Lyra2ParamError),
    /// The memory matrix could not be allocated.
    #[error("cannot allocate the memory matrix ({})", describe_size(.bytes))]
    AllocationFailure {
        /// Requested size in bytes, `None` if it overflows `usize`.
        bytes: Option<usize>,
    },
}

fn describe_size(bytes: &Option<usize>) -> String {
    match bytes {
        Some(bytes) => format!("{bytes} bytes"),
        None => "size overflows usize".to_string(),
    }
}

impl From<AllocationError> for Lyra2Error {
    fn from(err: AllocationError) -> Self {
        Lyra2Error::AllocationFailure { bytes: err.bytes }
    }
}

/// Computes a Lyra2 key of `params.key_len` bytes.
///
/// # Arguments
///
/// * `password` - The password to hash
/// * `salt` - The salt
/// * `params` - Lyra2 parameters (time cost, matrix shape, key length)
///
/// # Returns
///
/// The derived key as a byte vector, or an error if the parameters are
/// invalid or the memory matrix cannot be allocated.
///
/// # Example
///
/// ```rust
/// use lyra2::{Lyra2Params, lyra2};
///
/// let params = Lyra2Params {
///     time_cost: 1,
///     rows: 4,
///     columns: 4,
///     key_len: 32,
/// };
///
/// let key = lyra2(b"password", b"salt", &params).unwrap();
/// assert_eq!(key.len(), 32);
/// ```
pub fn lyra2(password: &[u8], salt: &[u8], params: &Lyra2Params) -> Result<Vec<u8>, Lyra2Error> {
    let mut key = vec![0u8; params.key_len];
    run(&mut key, password, salt, params)?;
    Ok(key)
}

/// Fills `output` with a Lyra2 key derived from `password` and `salt`.
///
/// The key length is `output.len()`. Parameters are checked before any
/// memory is allocated; on error `output` is left untouched and must not be
/// used as a key.
///
/// Each call owns its matrix and sponge, so independent calls may run
/// concurrently on different threads.
pub fn derive_key(
    output: &mut [u8],
    password: &[u8],
    salt: &[u8],
    time_cost: u64,
    rows: usize,
    columns: usize,
) -> Result<(), Lyra2Error> {
    let params = Lyra2Params {
        time_cost,
        rows,
        columns,
        key_len: output.len(),
    };
    run(output, password, salt, &params)
}

fn run(
    output: &mut [u8],
    password: &[u8],
    salt: &[u8],
    params: &Lyra2Params,
) -> Result<(), Lyra2Error> {
    let span = debug_span!(
        "lyra2",
        time_cost = params.time_cost,
        rows = params.rows,
        columns = params.columns,
        key_len = output.len(),
    );
    let _enter = span.enter();

    params.validate()?;
    params.validate_input(password.len(), salt.len())?;

    let mut matrix = MemoryMatrix::allocate(params.rows, params.columns).inspect_err(|err| {
        warn!(bytes = ?err.bytes, "memory matrix allocation failed");
    })?;

    let mut sponge = absorb_input(&mut matrix, output.len(), password, salt, params);
    setup(&mut sponge, &mut matrix);
    let rowa = wander(&mut sponge, &mut matrix, params.time_cost);

    // Wrap-up: absorb the first block of the last visited row*.
    sponge.absorb_block(&matrix.block(rowa, 0));
    sponge.squeeze(output);
    debug!("key squeezed");

    Ok(())
}

/// Writes the padded input into the matrix and absorbs it.
fn absorb_input(
    matrix: &mut MemoryMatrix,
    key_len: usize,
    password: &[u8],
    salt: &[u8],
    params: &Lyra2Params,
) -> Sponge {
    let blocks = write_padded_message(
        matrix.words_mut(),
        key_len,
        params.time_cost,
        password,
        salt,
        params.rows,
        params.columns,
    );

    let mut sponge = Sponge::new();
    for block in matrix.words()[..blocks * BLOCK_LEN_BLAKE2_SAFE_INT64]
        .chunks_exact(BLOCK_LEN_BLAKE2_SAFE_INT64)
    {
        sponge.absorb_safe_block(&core::array::from_fn(|i| block[i]));
    }
    debug!(blocks, "absorbed password, salt and basil");

    sponge
}

/// Setup phase: fills every row of the matrix.
///
/// Row 0 is squeezed (overwriting the padded input), row 1 is duplexed from
/// row 0, and each later row is duplexed from the previous row and a
/// revisited row `row*`, which is updated in turn.
fn setup(sponge: &mut Sponge, matrix: &mut MemoryMatrix) {
    let rows = matrix.rows();
    let columns = matrix.columns();
    let row0 = matrix.row_offset(0);
    let row1 = matrix.row_offset(1);

    sponge.reduced_squeeze_row0(matrix.words_mut(), row0, columns);
    sponge.reduced_duplex_row1(matrix.words_mut(), row0, row1, columns);

    let mut schedule = SetupSchedule::new();
    let mut prev = 1;

    for row in 2..rows {
        let (row_in, row_in_out, row_out) = (
            matrix.row_offset(prev),
            matrix.row_offset(schedule.rowa),
            matrix.row_offset(row),
        );
        sponge.reduced_duplex_row_setup(matrix.words_mut(), row_in, row_in_out, row_out, columns);

        schedule.advance();
        prev = row;
    }

    debug!(window = schedule.window, "setup phase done");
}

/// Wandering phase: `time_cost` passes over the matrix.
///
/// Each pass visits rows with a fixed stride until it returns to row 0,
/// mixing every visited row with a `row*` chosen from the sponge state.
/// Returns the last `row*`.
fn wander(sponge: &mut Sponge, matrix: &mut MemoryMatrix, time_cost: u64) -> usize {
    let rows = matrix.rows();
    let columns = matrix.columns();

    let mut prev = rows - 1;
    let mut row = 0;
    let mut rowa = 0;

    for tau in 1..=time_cost {
        let step = wandering_step(tau, rows);

        loop {
            rowa = random_row(sponge.state()[0], rows);

            let (row_in, row_in_out, row_out) = (
                matrix.row_offset(prev),
                matrix.row_offset(rowa),
                matrix.row_offset(row),
            );
            sponge.reduced_duplex_row(matrix.words_mut(), row_in, row_in_out, row_out, columns);

            prev = row;
            row = next_wandering_row(row, step, rows);

            if row == 0 {
                break;
            }
        }
    }

    debug!(passes = time_cost, "wandering phase done");
    rowa
}
