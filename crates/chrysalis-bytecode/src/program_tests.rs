use std::io::Write as _;

use chrysalis_core::POOL_START;

use crate::{Builtin, HEADER_SIZE, Instruction, Program, ProgramError};

fn sample() -> Program {
    let mut code = Vec::new();
    Instruction::PushStr {
        offset: POOL_START as u32,
        len: 2,
    }
    .write_to(&mut code);
    Instruction::PushStr {
        offset: POOL_START as u32 + 3,
        len: 0,
    }
    .write_to(&mut code);
    Instruction::Concat.write_to(&mut code);
    Instruction::Call(Builtin::QrGenerate).write_to(&mut code);
    Program::new(code, b"hi\0\0".to_vec(), 2).unwrap()
}

#[test]
fn image_round_trip() {
    let program = sample();
    let bytes = program.to_bytes();

    assert!(Program::is_image(&bytes));
    assert_eq!(bytes.len(), HEADER_SIZE + program.code().len() + program.pool().len());
    assert_eq!(Program::from_bytes(&bytes).unwrap(), program);
}

#[test]
fn text_starting_with_magic_is_not_an_image() {
    assert!(!Program::is_image(b"CHRYSALIS demo\nPUSH 2\nPRINT\n"));
    assert!(!Program::is_image(b"CHRY"));
    assert!(!Program::is_image(b"CHRY\x02\0\0\0"));
    assert!(Program::is_image(b"CHRY\x01\0\0\0"));
}

#[test]
fn image_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&sample().to_bytes()).unwrap();

    assert_eq!(Program::from_path(file.path()).unwrap(), sample());
}

#[test]
fn corrupted_images() {
    let bytes = sample().to_bytes();

    assert!(matches!(
        Program::from_bytes(&bytes[..10]),
        Err(ProgramError::FileTooSmall(10))
    ));

    let mut bad_magic = bytes.clone();
    bad_magic[0] = b'X';
    assert!(matches!(
        Program::from_bytes(&bad_magic),
        Err(ProgramError::InvalidMagic)
    ));

    let mut bad_version = bytes.clone();
    bad_version[4] = 9;
    assert!(matches!(
        Program::from_bytes(&bad_version),
        Err(ProgramError::UnsupportedVersion(9))
    ));

    assert!(matches!(
        Program::from_bytes(&bytes[..bytes.len() - 1]),
        Err(ProgramError::SizeMismatch { .. })
    ));

    let mut flipped = bytes.clone();
    let last = flipped.len() - 1;
    flipped[last] ^= 0x01;
    assert!(matches!(
        Program::from_bytes(&flipped),
        Err(ProgramError::ChecksumMismatch { .. })
    ));
}

#[test]
fn region_limits() {
    assert!(matches!(
        Program::new(vec![0x02; 0x10001], Vec::new(), 0),
        Err(ProgramError::CodeTooLarge(0x10001))
    ));
    assert!(matches!(
        Program::new(Vec::new(), vec![0; 4097], 0),
        Err(ProgramError::PoolTooLarge(4097))
    ));
}

#[test]
fn literals_are_addressed_absolutely() {
    let program = sample();
    let literals: Vec<_> = program.literals().collect();

    assert_eq!(
        literals,
        vec![(POOL_START, &b"hi"[..]), (POOL_START + 3, &b""[..])]
    );
}

#[test]
fn instruction_walk_skips_bad_bytes() {
    let program = Program::new(vec![0x02, 0xEE, 0x01, 0x05], Vec::new(), 0).unwrap();
    let walk: Vec<_> = program
        .instructions()
        .map(|(pc, r)| (pc, r.is_ok()))
        .collect();

    assert_eq!(walk, vec![(0, true), (1, false), (2, false), (3, true)]);
}
