//! QR-like bitmap engine and proof-of-work search.
//!
//! The bitmap borrows the look of a QR symbol (finder, alignment and timing
//! patterns, a format word, boustrophedon data placement) but is not meant
//! to be scanned. It exists to give mining a structural predicate on top of
//! the usual hash threshold:
//!
//! - [`BitmapMatrix::build`] turns a payload into a square module grid and
//!   measures its density and noise
//! - [`validate`] accepts a matrix only when both statistics are in range
//!   and the SHA-256 of its modules is at or below a [`Target`]
//! - [`MiningJob`] searches nonces until [`validate`] accepts, under
//!   caller-supplied [`MineLimits`] and a [`CancelToken`]

mod ecc;
mod error;
mod matrix;
mod metrics;
mod miner;
mod patterns;
mod placement;
mod render;
mod target;
mod validate;

#[cfg(test)]
mod miner_tests;
#[cfg(test)]
mod validate_tests;

pub use ecc::EccLevel;
pub use error::QrError;
pub use matrix::{
    BitmapMatrix, ENCODED_HEADER_LEN, MAX_VERSION, MIN_VERSION, capacity_for_version,
    side_for_version, version_for_len,
};
pub use miner::{
    Attempt, CancelToken, MineError, MineEvent, MineLimits, MiningJob, NONCE_LEN,
    PROGRESS_INTERVAL, Solution,
};
pub use target::{TARGET_LEN, Target};
pub use validate::{
    MAX_DENSITY, MAX_NOISE, MIN_DENSITY, Verdict, check_mining_criteria, is_valid, matrix_hash,
    validate,
};
