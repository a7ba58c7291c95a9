use std::fmt;

use crate::error::QrError;

pub const TARGET_LEN: usize = 32;

/// Proof-of-work threshold.
///
/// A hash meets the target when it compares at or below it as a big-endian
/// number, which for equal-length byte strings is plain lexicographic order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target([u8; TARGET_LEN]);

impl Target {
    /// Accepts every hash.
    pub const MAX: Self = Self([0xFF; TARGET_LEN]);
    /// Accepts only the all-zero hash.
    pub const ZERO: Self = Self([0x00; TARGET_LEN]);

    pub const fn new(bytes: [u8; TARGET_LEN]) -> Self {
        Self(bytes)
    }

    /// Exactly [`TARGET_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, QrError> {
        let bytes: [u8; TARGET_LEN] = bytes
            .try_into()
            .map_err(|_| QrError::TargetLength(bytes.len()))?;
        Ok(Self(bytes))
    }

    /// Parse 64 hex digits.
    pub fn from_hex(text: &str) -> Result<Self, QrError> {
        let bytes = hex::decode(text.trim()).map_err(|e| QrError::TargetHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Target with `bits` leading zero bits, the rest set.
    pub fn with_leading_zeros(bits: u32) -> Self {
        let mut bytes = [0xFF; TARGET_LEN];
        let bits = bits.min(TARGET_LEN as u32 * 8) as usize;
        for byte in bytes.iter_mut().take(bits / 8) {
            *byte = 0;
        }
        if bits / 8 < TARGET_LEN && bits % 8 != 0 {
            bytes[bits / 8] = 0xFF >> (bits % 8);
        }
        Self(bytes)
    }

    pub fn accepts(&self, hash: &[u8; TARGET_LEN]) -> bool {
        hash <= &self.0
    }

    pub fn as_bytes(&self) -> &[u8; TARGET_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::MAX
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", self.to_hex())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
