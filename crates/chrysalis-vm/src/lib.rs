//! Stack machine for compiled Chrysalis programs.
//!
//! The VM owns a 1 MiB memory image split into data, pool and scratch
//! regions, a bounded operand stack of tagged [`Value`]s and a call stack
//! used by the built-in mining primitives. Faults inside a run are not
//! fatal: they are reported to the [`Tracer`] and the offending step is
//! skipped. Only output errors and cancellation end a run early.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod error;
mod fault;
mod memory;
mod stack;
mod trace;
mod value;
mod vm;

#[cfg(test)]
mod memory_tests;
#[cfg(test)]
mod trace_tests;

pub use error::RuntimeError;
pub use fault::Fault;
pub use memory::Memory;
pub use stack::{CallStack, Frame, OperandStack};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use value::{ByteRef, Value};
pub use vm::{Vm, VmBuilder};
