//! Bytecode format for Chrysalis.
//!
//! This crate contains:
//! - Opcodes and instruction encoding ([`Instruction`], [`Builtin`])
//! - The compiled [`Program`] and its `.chb` image ([`Header`])
//! - A human-readable disassembler ([`dump`])

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod constants;
mod dump;
mod header;
mod instructions;
mod program;

#[cfg(test)]
mod program_tests;

pub use constants::{HEADER_SIZE, MAGIC, VERSION};
pub use dump::dump;
pub use header::Header;
pub use instructions::{Builtin, DecodeError, Instruction, Opcode};
pub use program::{Instructions, Program, ProgramError};
