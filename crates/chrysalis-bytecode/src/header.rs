//! Program image header (32 bytes).
//!
//! Layout, all integers little-endian:
//! - 0-3: magic `CHRY`
//! - 4-7: format version
//! - 8-11: CRC32 of everything after the header
//! - 12-15: total image size
//! - 16-19: code length
//! - 20-23: pool length
//! - 24-27: literal count
//! - 28-31: reserved

use crate::constants::{HEADER_SIZE, MAGIC, VERSION};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 4],
    pub version: u32,
    pub checksum: u32,
    pub total_size: u32,
    pub code_len: u32,
    pub pool_len: u32,
    pub literal_count: u32,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            checksum: 0,
            total_size: 0,
            code_len: 0,
            pool_len: 0,
            literal_count: 0,
        }
    }
}

#[inline]
fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

impl Header {
    /// Decode from the first [`HEADER_SIZE`] bytes.
    ///
    /// Callers check the length first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() >= HEADER_SIZE, "header too short");

        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: read_u32_le(bytes, 4),
            checksum: read_u32_le(bytes, 8),
            total_size: read_u32_le(bytes, 12),
            code_len: read_u32_le(bytes, 16),
            pool_len: read_u32_le(bytes, 20),
            literal_count: read_u32_le(bytes, 24),
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.total_size.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.code_len.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.pool_len.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.literal_count.to_le_bytes());
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }
}
