//! Square module matrix built from an arbitrary payload.

use crate::ecc::EccLevel;
use crate::error::QrError;
use crate::metrics;
use crate::patterns;
use crate::placement;

pub const MIN_VERSION: u8 = 1;
pub const MAX_VERSION: u8 = 40;

/// Bytes preceding the modules when a matrix is stored in VM memory:
/// version (u8), ecc (u8), side (u16 LE).
pub const ENCODED_HEADER_LEN: usize = 4;

/// Side length for a version, `None` outside `1..=40`.
pub fn side_for_version(version: u8) -> Option<usize> {
    (MIN_VERSION..=MAX_VERSION)
        .contains(&version)
        .then(|| 17 + 4 * version as usize)
}

/// Payload bytes a version can hold: one bit per module.
pub fn capacity_for_version(version: u8) -> usize {
    side_for_version(version).map_or(0, |side| side * side / 8)
}

/// Smallest version whose capacity covers `len` bytes.
pub fn version_for_len(len: usize) -> Option<u8> {
    (MIN_VERSION..=MAX_VERSION).find(|&v| capacity_for_version(v) >= len)
}

/// Mutable grid used while stamping patterns and placing data.
pub(crate) struct Grid {
    side: usize,
    cells: Vec<u8>,
}

impl Grid {
    fn new(side: usize) -> Self {
        Self {
            side,
            cells: vec![0; side * side],
        }
    }

    #[inline]
    pub(crate) fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub(crate) fn is_set(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.side + col] != 0
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, on: bool) {
        self.cells[row * self.side + col] = on as u8;
    }
}

/// An immutable bitmap with its derived statistics.
///
/// Modules are stored row-major, one byte per module (`0` or `1`). The
/// proof-of-work hash is taken over exactly these bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct BitmapMatrix {
    version: u8,
    side: usize,
    ecc: EccLevel,
    modules: Vec<u8>,
    density: f64,
    noise: f64,
}

impl BitmapMatrix {
    /// Build the matrix for `payload`.
    ///
    /// Deterministic: the same payload and class always produce the same
    /// modules.
    pub fn build(payload: &[u8], ecc: EccLevel) -> Result<Self, QrError> {
        let version = version_for_len(payload.len()).ok_or(QrError::CapacityExceeded {
            len: payload.len(),
            max: capacity_for_version(MAX_VERSION),
        })?;
        let side = 17 + 4 * version as usize;

        let mut grid = Grid::new(side);
        patterns::stamp_finders(&mut grid);
        if version > 1 {
            patterns::stamp_alignment(&mut grid);
        }
        patterns::stamp_timing(&mut grid);
        patterns::stamp_format(&mut grid, ecc);
        placement::embed(&mut grid, payload);

        Ok(Self::from_modules(version, ecc, grid.cells))
    }

    fn from_modules(version: u8, ecc: EccLevel, modules: Vec<u8>) -> Self {
        let side = 17 + 4 * version as usize;
        let density = metrics::density(&modules);
        let noise = metrics::noise(&modules, side);
        Self {
            version,
            side,
            ecc,
            modules,
            density,
            noise,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn ecc(&self) -> EccLevel {
        self.ecc
    }

    /// Fraction of set modules.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Fraction of interior modules that disagree with most of their neighbors.
    pub fn noise(&self) -> f64 {
        self.noise
    }

    /// Row-major module bytes.
    pub fn modules(&self) -> &[u8] {
        &self.modules
    }

    /// Module at `(row, col)`. `None` outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        (row < self.side && col < self.side).then(|| self.modules[row * self.side + col] != 0)
    }

    pub fn set_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m != 0).count()
    }

    /// Size of [`to_bytes`](Self::to_bytes) output.
    pub fn encoded_len(&self) -> usize {
        ENCODED_HEADER_LEN + self.modules.len()
    }

    /// Serialize for storage in VM memory.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        bytes.push(self.version);
        bytes.push(self.ecc as u8);
        bytes.extend_from_slice(&(self.side as u16).to_le_bytes());
        bytes.extend_from_slice(&self.modules);
        bytes
    }

    /// Decode bytes written by [`to_bytes`](Self::to_bytes).
    ///
    /// Metrics are recomputed rather than trusted. Trailing bytes are
    /// rejected so a stale or foreign region is not mistaken for a matrix.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, QrError> {
        if bytes.len() < ENCODED_HEADER_LEN {
            return Err(QrError::MalformedMatrix("header truncated"));
        }
        let version = bytes[0];
        let side = side_for_version(version).ok_or(QrError::MalformedMatrix("bad version"))?;
        let ecc = EccLevel::from_u8(bytes[1]).ok_or(QrError::MalformedMatrix("bad ecc"))?;
        if u16::from_le_bytes([bytes[2], bytes[3]]) as usize != side {
            return Err(QrError::MalformedMatrix("side does not match version"));
        }

        let modules = &bytes[ENCODED_HEADER_LEN..];
        if modules.len() != side * side {
            return Err(QrError::MalformedMatrix("module count does not match side"));
        }
        if modules.iter().any(|&m| m > 1) {
            return Err(QrError::MalformedMatrix("module byte is not 0 or 1"));
        }

        Ok(Self::from_modules(version, ecc, modules.to_vec()))
    }
}
