use chrysalis_bytecode::{Instruction, Program};
use chrysalis_core::{DATA_END, MEMORY_SIZE, POOL_START, Region, SCRATCH_START};

use crate::{ByteRef, Fault, Memory};

fn loaded(pool: &[u8]) -> Memory {
    let code = Instruction::Push(7).to_bytes();
    let program = Program::new(code, pool.to_vec(), 1).unwrap();
    let mut memory = Memory::new();
    memory.load(&program);
    memory
}

#[test]
fn load_places_code_and_pool() {
    let memory = loaded(b"hi\0");

    assert_eq!(memory.read_byte(0).unwrap(), 0x01);
    assert_eq!(memory.read(POOL_START, 3).unwrap(), b"hi\0");
    assert_eq!(memory.scratch_used(), 0);
}

#[test]
fn load_resets_previous_state() {
    let mut memory = loaded(b"hi\0");
    memory.write_byte(100, 9).unwrap();
    memory.alloc(b"junk").unwrap();

    let program = Program::new(Vec::new(), Vec::new(), 0).unwrap();
    memory.load(&program);

    assert_eq!(memory.read_byte(100).unwrap(), 0);
    assert_eq!(memory.read_byte(POOL_START).unwrap(), 0);
    assert_eq!(memory.scratch_used(), 0);
}

#[test]
fn reads_must_stay_inside_one_region() {
    let memory = Memory::new();

    assert_eq!(memory.read(DATA_END - 4, 4).unwrap().len(), 4);
    assert_eq!(
        memory.read(DATA_END - 2, 4),
        Err(Fault::OutOfBounds {
            addr: DATA_END - 2,
            len: 4
        })
    );
    assert_eq!(
        memory.read(SCRATCH_START - 1, 2),
        Err(Fault::OutOfBounds {
            addr: SCRATCH_START - 1,
            len: 2
        })
    );
    assert_eq!(
        memory.read(MEMORY_SIZE - 1, 2),
        Err(Fault::OutOfBounds {
            addr: MEMORY_SIZE - 1,
            len: 2
        })
    );
}

#[test]
fn empty_read_at_end_of_memory() {
    let memory = Memory::new();

    assert_eq!(memory.read(MEMORY_SIZE, 0).unwrap(), b"");
    assert!(memory.read(MEMORY_SIZE, 1).is_err());
}

#[test]
fn pool_is_read_only() {
    let mut memory = loaded(b"hi\0");

    assert_eq!(
        memory.write_byte(POOL_START, b'X'),
        Err(Fault::ReadOnly(Region::Pool))
    );
    assert_eq!(memory.read(POOL_START, 2).unwrap(), b"hi");
}

#[test]
fn data_and_scratch_are_writable() {
    let mut memory = Memory::new();

    memory.write_byte(10, 1).unwrap();
    memory.write_byte(SCRATCH_START, 2).unwrap();
    memory.write_byte(MEMORY_SIZE - 1, 3).unwrap();

    assert_eq!(memory.read_byte(10).unwrap(), 1);
    assert_eq!(memory.read_byte(SCRATCH_START).unwrap(), 2);
    assert_eq!(memory.read_byte(MEMORY_SIZE - 1).unwrap(), 3);
}

#[test]
fn access_past_memory_end() {
    let mut memory = Memory::new();

    assert_eq!(
        memory.read_byte(MEMORY_SIZE),
        Err(Fault::AddressOutOfRange(MEMORY_SIZE as i64))
    );
    assert_eq!(
        memory.write_byte(MEMORY_SIZE, 0),
        Err(Fault::AddressOutOfRange(MEMORY_SIZE as i64))
    );
}

#[test]
fn cstr_stops_at_nul() {
    let memory = loaded(b"abc\0def\0");

    assert_eq!(memory.read_cstr(POOL_START).unwrap(), b"abc");
    assert_eq!(memory.read_cstr(POOL_START + 4).unwrap(), b"def");
    assert_eq!(memory.read_cstr(POOL_START + 3).unwrap(), b"");
}

#[test]
fn cstr_does_not_cross_into_next_region() {
    let mut memory = Memory::new();
    memory.write_byte(DATA_END - 1, b'x').unwrap();

    assert_eq!(
        memory.read_cstr(DATA_END - 1),
        Err(Fault::Unterminated {
            addr: DATA_END - 1,
            region: Region::Data
        })
    );
}

#[test]
fn scratch_grows_downward() {
    let mut memory = Memory::new();

    let first = memory.alloc(b"abc").unwrap();
    let second = memory.alloc(b"de").unwrap();

    assert_eq!(first, ByteRef::new(MEMORY_SIZE - 3, 3));
    assert_eq!(second, ByteRef::new(MEMORY_SIZE - 5, 2));
    assert_eq!(memory.resolve(first).unwrap(), b"abc");
    assert_eq!(memory.resolve(second).unwrap(), b"de");
    assert_eq!(memory.scratch_used(), 5);
}

#[test]
fn empty_alloc_is_valid() {
    let mut memory = Memory::new();

    let r = memory.alloc(b"").unwrap();

    assert!(r.is_empty());
    assert_eq!(memory.resolve(r).unwrap(), b"");
}

#[test]
fn scratch_exhaustion() {
    let mut memory = Memory::new();
    let available = MEMORY_SIZE - SCRATCH_START;

    assert_eq!(
        memory.alloc(&vec![1; available + 1]),
        Err(Fault::ScratchExhausted {
            requested: available + 1,
            available
        })
    );
    assert_eq!(memory.scratch_used(), 0);

    memory.alloc(&vec![1; available]).unwrap();
    assert_eq!(memory.scratch_available(), 0);
    assert!(memory.alloc(b"x").is_err());
}
