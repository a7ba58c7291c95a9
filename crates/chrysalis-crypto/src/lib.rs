//! Cryptographic collaborator for the Chrysalis VM.
//!
//! Thin wrappers over RustCrypto implementations. Nothing here is
//! reimplemented; the VM and the proof-of-work validator only see
//! fixed-size digests and opaque key/signature bytes.

mod digest;
mod error;
mod keys;

#[cfg(test)]
mod keys_tests;

pub use digest::{
    HASH160_LEN, RIPEMD160_LEN, SHA256_LEN, hash160, ripemd160, sha256,
};
pub use error::CryptoError;
pub use keys::{KeyPair, verify};
