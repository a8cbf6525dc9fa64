//! Lyra2 password hashing / key derivation function.
//!
//! Lyra2 is a memory-hard key derivation function built on a sponge. It
//! fills a matrix of sponge-sized blocks and revisits it in an order that
//! depends on the sponge state, so computing a key needs the whole matrix
//! in memory (or a large amount of recomputation).
//!
//! # Security Properties
//!
//! - **Memory hardness**: the `rows × columns` matrix must be kept in
//!   memory; trading memory for time costs a large amount of recomputation.
//! - **Time hardness**: `time_cost` sets the number of wandering passes.
//! - **Parameter binding**: the key length and every cost parameter are
//!   absorbed together with the password and salt.
//!
//! # Algorithm Overview
//!
//! 1. **Absorb**: `pad(password || salt || basil)` is written into the
//!    start of the matrix and absorbed in 64-byte blocks with the full
//!    permutation.
//! 2. **Setup**: row 0 is squeezed (last column first), row 1 is duplexed
//!    from row 0, and every further row is duplexed from the previous row
//!    and a deterministically revisited earlier row `row*`.
//! 3. **Wandering**: `time_cost` passes in which each visited row is mixed
//!    with the previous row and a `row*` drawn from the sponge state.
//! 4. **Wrap-up**: the first block of the last `row*` is absorbed and the
//!    key is squeezed.
//!
//! The row-level operations use the reduced (1-round) permutation; the
//! full (12-round) permutation is used while absorbing the input and while
//! producing the key.
//!
//! This variant is single-lane: every phase depends on the previous sponge
//! state, so a single derivation is strictly sequential.

pub mod core;
pub(crate) mod memory;
pub mod padding;
pub mod params;
pub(crate) mod schedule;

pub use self::core::{Lyra2Error, derive_key, lyra2};
pub use self::padding::build_padded_message;
pub use self::params::{Lyra2ParamError, Lyra2Params, MIN_ROWS};
