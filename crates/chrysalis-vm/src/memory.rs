//! The VM memory image.
//!
//! Every access names an address and a length and must land inside one
//! region. Scratch is handed out downward from the top of memory and is
//! never reclaimed within a run.

use chrysalis_bytecode::Program;
use chrysalis_core::{MEMORY_SIZE, POOL_START, Region, SCRATCH_START};

use crate::fault::Fault;
use crate::value::ByteRef;

pub struct Memory {
    bytes: Vec<u8>,
    /// Lowest address handed out so far; scratch grows down towards
    /// [`SCRATCH_START`].
    scratch_top: usize,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            bytes: vec![0; MEMORY_SIZE],
            scratch_top: MEMORY_SIZE,
        }
    }

    /// Reset the image and copy in the program's code and string pool.
    ///
    /// Code lands at address 0 so LOAD can inspect it. The VM decodes from
    /// the program itself, so a STORE over these bytes does not change
    /// what runs.
    pub fn load(&mut self, program: &Program) {
        self.bytes.fill(0);
        self.scratch_top = MEMORY_SIZE;
        let code = program.code();
        self.bytes[..code.len()].copy_from_slice(code);
        let pool = program.pool();
        self.bytes[POOL_START..POOL_START + pool.len()].copy_from_slice(pool);
    }

    /// `len` bytes at `addr`, which must lie inside a single region.
    pub fn read(&self, addr: usize, len: usize) -> Result<&[u8], Fault> {
        if len == 0 && addr <= MEMORY_SIZE {
            return Ok(&[]);
        }
        match Region::of(addr) {
            Some(region) if region.contains_span(addr, len) => Ok(&self.bytes[addr..addr + len]),
            _ => Err(Fault::OutOfBounds { addr, len }),
        }
    }

    pub fn resolve(&self, r: ByteRef) -> Result<&[u8], Fault> {
        self.read(r.offset(), r.len())
    }

    pub fn read_byte(&self, addr: usize) -> Result<u8, Fault> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or(Fault::AddressOutOfRange(addr as i64))
    }

    /// Write one byte. The pool is read-only.
    pub fn write_byte(&mut self, addr: usize, byte: u8) -> Result<(), Fault> {
        let region = Region::of(addr).ok_or(Fault::AddressOutOfRange(addr as i64))?;
        if !region.is_writable() {
            return Err(Fault::ReadOnly(region));
        }
        self.bytes[addr] = byte;
        Ok(())
    }

    /// Bytes from `addr` up to, not including, the next NUL in the same region.
    pub fn read_cstr(&self, addr: usize) -> Result<&[u8], Fault> {
        let region = Region::of(addr).ok_or(Fault::AddressOutOfRange(addr as i64))?;
        let tail = &self.bytes[addr..region.range().end];
        let len = tail
            .iter()
            .position(|&b| b == 0)
            .ok_or(Fault::Unterminated { addr, region })?;
        Ok(&tail[..len])
    }

    /// Copy `bytes` into fresh scratch space.
    pub fn alloc(&mut self, bytes: &[u8]) -> Result<ByteRef, Fault> {
        let available = self.scratch_available();
        if bytes.len() > available {
            return Err(Fault::ScratchExhausted {
                requested: bytes.len(),
                available,
            });
        }
        self.scratch_top -= bytes.len();
        let start = self.scratch_top;
        self.bytes[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(ByteRef::new(start, bytes.len()))
    }

    pub fn scratch_available(&self) -> usize {
        self.scratch_top - SCRATCH_START
    }

    pub fn scratch_used(&self) -> usize {
        MEMORY_SIZE - self.scratch_top
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
