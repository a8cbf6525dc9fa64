//! Key derivation functions exposed by the crate.
//!
//! Currently includes Lyra2 over the Blake2b-based sponge.

pub mod lyra2;

/// Re-export of the Lyra2 entry points.
pub use self::lyra2::{Lyra2Error, Lyra2ParamError, Lyra2Params, derive_key, lyra2};
