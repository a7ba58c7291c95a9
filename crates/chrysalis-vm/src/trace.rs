//! Execution tracing.
//!
//! The VM is generic over [`Tracer`]. With [`NoopTracer`] every hook is an
//! empty `#[inline(always)]` function and the calls compile away, so the
//! hot loop carries no tracing state of its own.

use std::time::Duration;

use chrysalis_bytecode::{Builtin, Instruction};
use chrysalis_core::Colors;
use chrysalis_core::utils::truncate_text;

use crate::fault::Fault;
use crate::value::Value;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Instructions, faults, calls and mining results.
    #[default]
    Default,
    /// Adds pushed values and program output (-v).
    Verbose,
    /// Adds mining progress (-vv).
    VeryVerbose,
}

/// Hooks called by the VM during a run.
///
/// - `trace_instruction` - before executing a decoded instruction
/// - `trace_push` - after a value lands on the operand stack
/// - `trace_fault` - when a step is skipped
/// - `trace_call` / `trace_return` - around a built-in
/// - `trace_output` - after PRINT or QR_PRINT writes
/// - `trace_mine_progress` / `trace_mine_found` - from the miner
pub trait Tracer {
    fn trace_instruction(&mut self, pc: usize, instr: &Instruction);

    fn trace_push(&mut self, value: &Value);

    fn trace_fault(&mut self, pc: usize, fault: &Fault);

    fn trace_call(&mut self, builtin: Builtin, depth: usize);

    fn trace_return(&mut self, builtin: Builtin, depth: usize);

    fn trace_output(&mut self, bytes: &[u8]);

    fn trace_mine_progress(&mut self, attempts: u64, elapsed: Duration);

    fn trace_mine_found(&mut self, nonce: u64, attempts: u64);
}

/// Tracer that does nothing.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_instruction(&mut self, _pc: usize, _instr: &Instruction) {}

    #[inline(always)]
    fn trace_push(&mut self, _value: &Value) {}

    #[inline(always)]
    fn trace_fault(&mut self, _pc: usize, _fault: &Fault) {}

    #[inline(always)]
    fn trace_call(&mut self, _builtin: Builtin, _depth: usize) {}

    #[inline(always)]
    fn trace_return(&mut self, _builtin: Builtin, _depth: usize) {}

    #[inline(always)]
    fn trace_output(&mut self, _bytes: &[u8]) {}

    #[inline(always)]
    fn trace_mine_progress(&mut self, _attempts: u64, _elapsed: Duration) {}

    #[inline(always)]
    fn trace_mine_found(&mut self, _nonce: u64, _attempts: u64) {}
}

const OUTPUT_PREVIEW: usize = 40;

/// Tracer that collects readable lines.
pub struct PrintTracer {
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
    /// Width of the pc column, from the code length.
    pc_width: usize,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            lines: Vec::new(),
            pc_width: 4,
        }
    }

    /// Size the pc column for a program of `code_len` bytes.
    pub fn pc_width(mut self, code_len: usize) -> Self {
        self.pc_width = format!("{:X}", code_len.max(1)).len().max(4);
        self
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn add_subline(&mut self, symbol: &str, content: &str) {
        let indent = 2 + self.pc_width + 2;
        self.lines.push(format!("{:indent$}{symbol} {content}", ""));
    }
}

impl Tracer for PrintTracer {
    fn trace_instruction(&mut self, pc: usize, instr: &Instruction) {
        let c = self.colors;
        let mnemonic = instr.opcode().mnemonic();
        let text = instr.to_string();
        let operands = text.strip_prefix(mnemonic).unwrap_or("");
        self.lines.push(format!(
            "  {}{:0w$X}{}  {}{}{}{}",
            c.dim,
            pc,
            c.reset,
            c.blue,
            mnemonic,
            c.reset,
            operands,
            w = self.pc_width
        ));
    }

    fn trace_push(&mut self, value: &Value) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let c = self.colors;
        self.add_subline("↳", &format!("{}{}{}", c.dim, value, c.reset));
    }

    fn trace_fault(&mut self, _pc: usize, fault: &Fault) {
        let c = self.colors;
        self.add_subline("✗", &format!("{}{}{}", c.red, fault, c.reset));
    }

    fn trace_call(&mut self, builtin: Builtin, depth: usize) {
        let c = self.colors;
        self.add_subline("→", &format!("{}{}{} [{}]", c.blue, builtin, c.reset, depth));
    }

    fn trace_return(&mut self, builtin: Builtin, depth: usize) {
        let c = self.colors;
        self.add_subline("←", &format!("{}{}{} [{}]", c.blue, builtin, c.reset, depth));
    }

    fn trace_output(&mut self, bytes: &[u8]) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let c = self.colors;
        let text = String::from_utf8_lossy(bytes);
        let first = text.lines().next().unwrap_or("");
        let preview = truncate_text(first, OUTPUT_PREVIEW);
        self.add_subline("»", &format!("{}{}{}", c.green, preview, c.reset));
    }

    fn trace_mine_progress(&mut self, attempts: u64, elapsed: Duration) {
        if self.verbosity < Verbosity::VeryVerbose {
            return;
        }
        let c = self.colors;
        self.add_subline(
            "…",
            &format!("{}{} attempts in {:.1?}{}", c.dim, attempts, elapsed, c.reset),
        );
    }

    fn trace_mine_found(&mut self, nonce: u64, attempts: u64) {
        let c = self.colors;
        self.add_subline(
            "✓",
            &format!(
                "{}nonce {} after {} attempts{}",
                c.green, nonce, attempts, c.reset
            ),
        );
    }
}
