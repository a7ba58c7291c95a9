//! Recoverable faults.
//!
//! A fault skips the step that raised it. The run continues and the fault
//! is handed to the tracer.

use chrysalis_bytecode::DecodeError;
use chrysalis_core::Region;
use chrysalis_crypto::CryptoError;
use chrysalis_qr::{MineError, QrError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("invalid instruction: {0}")]
    InvalidInstruction(DecodeError),

    #[error("stack underflow")]
    StackUnderflow,

    #[error("stack overflow, value dropped")]
    StackOverflow,

    #[error("call stack overflow")]
    CallStackOverflow,

    #[error("address {0} is outside memory")]
    AddressOutOfRange(i64),

    #[error("{len} bytes at 0x{addr:05X} do not fit in one region")]
    OutOfBounds { addr: usize, len: usize },

    #[error("{0} region is read-only")]
    ReadOnly(Region),

    #[error("no NUL terminator in the {region} region after 0x{addr:05X}")]
    Unterminated { addr: usize, region: Region },

    #[error("division by zero")]
    DivisionByZero,

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("scratch exhausted: {requested} bytes requested, {available} available")]
    ScratchExhausted { requested: usize, available: usize },

    #[error("target needs 32 bytes, got {0}")]
    ShortTarget(usize),

    #[error(transparent)]
    Qr(#[from] QrError),

    #[error(transparent)]
    Mine(MineError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl Fault {
    pub(crate) fn mismatch(expected: &'static str, found: &crate::Value) -> Self {
        Fault::TypeMismatch {
            expected,
            found: found.type_name(),
        }
    }
}
