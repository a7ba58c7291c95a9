//! Chrysalis compiler: assembly text to bytecode.
//!
//! - `lexer` - logos-based tokenizer
//! - `compiler` - single-pass code generation into a [`Program`]
//! - `diagnostics` - warnings and errors with source spans
//!
//! [`Program`]: chrysalis_bytecode::Program

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compiler;
pub mod diagnostics;
pub mod lexer;

#[cfg(test)]
mod compiler_tests;
#[cfg(test)]
mod lexer_tests;

use chrysalis_bytecode::ProgramError;

pub use compiler::{Compiled, Compiler};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("compilation failed with {} errors", .0.error_count())]
    Failed(Diagnostics),

    #[error("compilation produced {} warnings in strict mode", .0.warning_count())]
    Strict(Diagnostics),

    #[error(transparent)]
    Program(#[from] ProgramError),
}

impl CompileError {
    /// Diagnostics behind the failure, if any.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Failed(d) | Self::Strict(d) => Some(d),
            Self::Program(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;

/// Compile `source` with default options.
pub fn compile(source: &str) -> Result<Compiled> {
    Compiler::new(source).compile()
}
