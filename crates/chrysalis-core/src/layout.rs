//! Memory image geometry.
//!
//! One flat 1 MiB image split into three non-overlapping regions:
//!
//! ```text
//! 0x00000 ┌──────────────┐
//!         │ Data         │  STORE/LOAD, read-write
//! 0x10000 ├──────────────┤
//!         │ Pool         │  string literals, written once at load
//! 0x11000 ├──────────────┤
//!         │ Scratch      │  CONCAT / HASH / QR results, allocated
//!         │      ↑       │  downward from the top, never reclaimed
//! 0x100000└──────────────┘
//! ```
//!
//! The compiler places literals by absolute address, so both sides must
//! agree on these numbers.

use std::fmt;
use std::ops::Range;

/// Total size of the memory image in bytes.
pub const MEMORY_SIZE: usize = 1024 * 1024;

/// First byte of the string pool.
pub const POOL_START: usize = 64 * 1024;

/// Size of the string pool in bytes.
pub const POOL_SIZE: usize = 4 * 1024;

/// End of the data region (exclusive). Also the code size limit.
pub const DATA_END: usize = POOL_START;

/// First byte of the scratch region.
pub const SCRATCH_START: usize = POOL_START + POOL_SIZE;

/// Default operand stack capacity.
pub const STACK_SIZE: usize = 1024;

/// Default call stack capacity.
pub const CALL_STACK_SIZE: usize = 1024;

const _: () = assert!(SCRATCH_START < MEMORY_SIZE);

/// A named region of the memory image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Data,
    Pool,
    Scratch,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Data, Region::Pool, Region::Scratch];

    /// Byte range covered by this region.
    pub const fn range(self) -> Range<usize> {
        match self {
            Region::Data => 0..DATA_END,
            Region::Pool => POOL_START..SCRATCH_START,
            Region::Scratch => SCRATCH_START..MEMORY_SIZE,
        }
    }

    /// Region owning `addr`, or `None` past the end of memory.
    pub fn of(addr: usize) -> Option<Region> {
        Self::ALL.into_iter().find(|r| r.range().contains(&addr))
    }

    /// Whether STORE may write here. The pool is frozen after load.
    pub const fn is_writable(self) -> bool {
        !matches!(self, Region::Pool)
    }

    /// Whether `addr..addr + len` lies entirely inside this region.
    pub fn contains_span(self, addr: usize, len: usize) -> bool {
        let range = self.range();
        addr >= range.start && addr.checked_add(len).is_some_and(|end| end <= range.end)
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Data => "data",
            Region::Pool => "pool",
            Region::Scratch => "scratch",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
