//! Chrysalis: a small stack bytecode language whose machine can build
//! QR-like bitmaps and mine them against a proof-of-work target.
//!
//! # Example
//!
//! ```
//! let mut out = Vec::new();
//! chrysalis_lib::run_source("PUSH 2 PUSH 3 ADD PRINT", &mut out).unwrap();
//! assert_eq!(out, b"5\n");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod artifact;


use std::io::{self, Write};
use std::path::PathBuf;

pub use artifact::Artifact;

pub use chrysalis_bytecode::{self as bytecode, Builtin, Instruction, Program, ProgramError};
pub use chrysalis_compiler::{
    CompileError, Compiled, Compiler, DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity,
    compile,
};
pub use chrysalis_core::Colors;
pub use chrysalis_crypto::{self as crypto, KeyPair};
pub use chrysalis_qr::{
    self as qr, BitmapMatrix, CancelToken, EccLevel, MineLimits, MiningJob, Target, Verdict,
};
pub use chrysalis_vm::{
    Fault, NoopTracer, PrintTracer, RuntimeError, Tracer, Value, Verbosity, Vm, VmBuilder,
};

/// Errors surfaced by the facade.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is neither a program image nor UTF-8 text", path.display())]
    NotText { path: PathBuf },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Diagnostics attached to a failed compile.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Compile(e) => e.diagnostics(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Compile `source` and run it on a default VM.
///
/// Warnings do not stop the run.
pub fn run_source(source: &str, out: &mut impl Write) -> Result<()> {
    let compiled = compile(source)?;
    Vm::new().execute(&compiled.program, out)?;
    Ok(())
}
