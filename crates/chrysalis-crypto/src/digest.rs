use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

pub const SHA256_LEN: usize = 32;
pub const RIPEMD160_LEN: usize = 20;
pub const HASH160_LEN: usize = RIPEMD160_LEN;

pub fn sha256(data: &[u8]) -> [u8; SHA256_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(data);

    let mut hash = [0u8; SHA256_LEN];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

pub fn ripemd160(data: &[u8]) -> [u8; RIPEMD160_LEN] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);

    let mut hash = [0u8; RIPEMD160_LEN];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

/// `ripemd160(sha256(data))`.
pub fn hash160(data: &[u8]) -> [u8; HASH160_LEN] {
    ripemd160(&sha256(data))
}
