//! Compiled programs and their on-disk image.

use std::io;
use std::path::Path;

use chrysalis_core::{DATA_END, POOL_SIZE, POOL_START};

use crate::constants::{HEADER_SIZE, MAGIC, VERSION};
use crate::header::Header;
use crate::instructions::{DecodeError, Instruction};

#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("invalid magic: expected CHRY")]
    InvalidMagic,
    #[error("unsupported version: {0} (expected {VERSION})")]
    UnsupportedVersion(u32),
    #[error("file too small: {0} bytes (minimum {HEADER_SIZE})")]
    FileTooSmall(usize),
    #[error("size mismatch: header says {header} bytes, got {actual}")]
    SizeMismatch { header: u32, actual: usize },
    #[error("checksum mismatch: header says {header:08x}, computed {actual:08x}")]
    ChecksumMismatch { header: u32, actual: u32 },
    #[error("code is {0} bytes (maximum {DATA_END})")]
    CodeTooLarge(usize),
    #[error("string pool is {0} bytes (maximum {POOL_SIZE})")]
    PoolTooLarge(usize),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Code plus string pool. Immutable once built.
///
/// Pool literals are NUL-terminated and addressed by absolute memory
/// offset: the first literal lives at [`POOL_START`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    code: Vec<u8>,
    pool: Vec<u8>,
    literal_count: u32,
}

impl Program {
    /// Build from parts, checking that both fit their memory regions.
    pub fn new(code: Vec<u8>, pool: Vec<u8>, literal_count: u32) -> Result<Self, ProgramError> {
        if code.len() > DATA_END {
            return Err(ProgramError::CodeTooLarge(code.len()));
        }
        if pool.len() > POOL_SIZE {
            return Err(ProgramError::PoolTooLarge(pool.len()));
        }
        Ok(Self {
            code,
            pool,
            literal_count,
        })
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn pool(&self) -> &[u8] {
        &self.pool
    }

    pub fn literal_count(&self) -> u32 {
        self.literal_count
    }

    /// Decode instructions in order.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            code: &self.code,
            pc: 0,
        }
    }

    /// Pool literals as `(absolute address, bytes without NUL)`.
    pub fn literals(&self) -> impl Iterator<Item = (usize, &[u8])> + '_ {
        let mut offset = 0;
        self.pool
            .split(|&b| b == 0)
            .take(self.literal_count as usize)
            .map(move |bytes| {
                let addr = POOL_START + offset;
                offset += bytes.len() + 1;
                (addr, bytes)
            })
    }

    /// Whether `bytes` starts with the image magic followed by a supported
    /// format version. Text that merely begins with `CHRY` does not qualify.
    pub fn is_image(bytes: &[u8]) -> bool {
        bytes.len() >= 8 && bytes[..4] == MAGIC && bytes[4..8] == VERSION.to_le_bytes()
    }

    /// Serialize to a `.chb` image.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total = HEADER_SIZE + self.code.len() + self.pool.len();
        let mut out = vec![0u8; HEADER_SIZE];
        out.reserve(total - HEADER_SIZE);
        out.extend_from_slice(&self.code);
        out.extend_from_slice(&self.pool);

        let header = Header {
            checksum: crc32fast::hash(&out[HEADER_SIZE..]),
            total_size: total as u32,
            code_len: self.code.len() as u32,
            pool_len: self.pool.len() as u32,
            literal_count: self.literal_count,
            ..Default::default()
        };
        out[..HEADER_SIZE].copy_from_slice(&header.to_bytes());
        out
    }

    /// Load a `.chb` image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProgramError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ProgramError::FileTooSmall(bytes.len()));
        }

        let header = Header::from_bytes(&bytes[..HEADER_SIZE]);
        if !header.validate_magic() {
            return Err(ProgramError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(ProgramError::UnsupportedVersion(header.version));
        }
        let sections = header.code_len as usize + header.pool_len as usize;
        if header.total_size as usize != bytes.len() || HEADER_SIZE + sections != bytes.len() {
            return Err(ProgramError::SizeMismatch {
                header: header.total_size,
                actual: bytes.len(),
            });
        }

        let checksum = crc32fast::hash(&bytes[HEADER_SIZE..]);
        if checksum != header.checksum {
            return Err(ProgramError::ChecksumMismatch {
                header: header.checksum,
                actual: checksum,
            });
        }

        let pool_start = HEADER_SIZE + header.code_len as usize;
        Self::new(
            bytes[HEADER_SIZE..pool_start].to_vec(),
            bytes[pool_start..].to_vec(),
            header.literal_count,
        )
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProgramError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

/// Iterator over `(pc, decoded instruction)`.
///
/// An undecodable byte yields its error and the walk resumes one byte
/// later, mirroring how the VM skips it.
pub struct Instructions<'a> {
    code: &'a [u8],
    pc: usize,
}

impl Iterator for Instructions<'_> {
    type Item = (usize, Result<Instruction, DecodeError>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pc >= self.code.len() {
            return None;
        }
        let pc = self.pc;
        let decoded = Instruction::from_bytes(&self.code[pc..]);
        self.pc += decoded.as_ref().map_or(1, Instruction::size);
        Some((pc, decoded))
    }
}
