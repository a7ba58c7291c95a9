//! ECDSA over secp256k1.
//!
//! Messages are hashed with SHA-256 before signing. Signatures travel as
//! DER bytes and public keys as compressed SEC1 points, so both can live in
//! VM memory as plain byte strings.

use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand_core::OsRng;

use crate::digest::sha256;
use crate::error::CryptoError;

/// A secp256k1 signing key together with its public half.
#[derive(Clone, Debug)]
pub struct KeyPair {
    signing: SigningKey,
}

impl KeyPair {
    /// Fresh key from the operating system RNG.
    pub fn generate() -> Self {
        Self {
            signing: SigningKey::random(&mut OsRng),
        }
    }

    /// Deterministic key derived from `sha256(seed)`.
    ///
    /// Fails only in the negligible case where the digest is not a valid
    /// scalar.
    pub fn from_seed(seed: &[u8]) -> Result<Self, CryptoError> {
        let secret = sha256(seed);
        let signing =
            SigningKey::from_slice(&secret).map_err(|_| CryptoError::InvalidSecretKey)?;
        Ok(Self { signing })
    }

    /// Compressed SEC1 public key (33 bytes).
    pub fn public_key(&self) -> Vec<u8> {
        self.signing
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec()
    }

    /// DER-encoded signature over `message`.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let signature: Signature = self.signing.sign(message);
        signature.to_der().as_bytes().to_vec()
    }
}

/// Check a DER signature against a SEC1 public key.
///
/// Malformed keys or signatures are errors; a well-formed signature that
/// does not match is `Ok(false)`.
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
    let key =
        VerifyingKey::from_sec1_bytes(public_key).map_err(|_| CryptoError::InvalidPublicKey)?;
    let signature = Signature::from_der(signature).map_err(|_| CryptoError::InvalidSignature)?;
    Ok(key.verify(message, &signature).is_ok())
}
