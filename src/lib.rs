//! Lyra2 key derivation
//!
//! This crate implements Lyra2, a memory-hard password hashing and key
//! derivation function, on top of a sponge built from the Blake2b round
//! function.
//!
//! The focus is on **clarity, predictability, and auditability**: every
//! step of the algorithm is explicit, all arithmetic is native 64-bit
//! wrapping arithmetic, and byte order is fixed to little-endian so keys
//! are reproducible across platforms.
//!
//! # Module overview
//!
//! - `sponge`
//!   The Blake2b-based sponge: state initialization, the full (12-round)
//!   and reduced (1-round) permutations, absorb and squeeze, and the
//!   reduced-round row operations Lyra2 runs over its memory matrix. The
//!   sponge knows nothing about passwords or cost parameters.
//!
//! - `derivation`
//!   Key derivation functions. The `lyra2` module owns the memory matrix,
//!   encodes the password, salt and parameters, and drives the sponge
//!   through the setup, wandering and wrap-up phases.
//!
//! # Quick start
//!
//! ```rust
//! let mut key = [0u8; 32];
//! lyra2::derive_key(&mut key, b"password", b"salt", 1, 8, 8).unwrap();
//! ```
//!
//! # Design goals
//!
//! - Output identical to the published Lyra2 algorithm for the same inputs
//! - Typed errors for invalid parameters and failed allocations
//! - Secrets (sponge state, memory matrix) wiped when dropped
//! - One derivation is single-threaded; independent derivations share no
//!   state and may run in parallel
//!
//! Command-line handling, file I/O and output encodings are left to the
//! caller.

pub mod derivation;
pub mod sponge;

pub use derivation::{Lyra2Error, Lyra2ParamError, Lyra2Params, derive_key, lyra2};
