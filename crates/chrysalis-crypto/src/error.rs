#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    #[error("invalid secret key")]
    InvalidSecretKey,
    #[error("invalid public key encoding")]
    InvalidPublicKey,
    #[error("invalid DER signature")]
    InvalidSignature,
}
