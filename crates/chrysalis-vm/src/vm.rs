//! Instruction dispatch.

use std::io::{self, Write};
use std::time::Duration;

use chrysalis_bytecode::{Builtin, Instruction, Program};
use chrysalis_core::{CALL_STACK_SIZE, MEMORY_SIZE, STACK_SIZE};
use chrysalis_crypto::{hash160, sha256};
use chrysalis_qr::{
    BitmapMatrix, CancelToken, EccLevel, MineError, MineEvent, MineLimits, MiningJob, TARGET_LEN,
    Target, is_valid,
};

use crate::error::RuntimeError;
use crate::fault::Fault;
use crate::memory::Memory;
use crate::stack::{CallStack, OperandStack};
use crate::trace::{NoopTracer, Tracer};
use crate::value::{ByteRef, Value};

/// Why a step stopped early.
enum Trap {
    /// Skip the step and keep running.
    Fault(Fault),
    /// End the run.
    Error(RuntimeError),
}

impl From<Fault> for Trap {
    fn from(fault: Fault) -> Self {
        Trap::Fault(fault)
    }
}

impl From<RuntimeError> for Trap {
    fn from(err: RuntimeError) -> Self {
        Trap::Error(err)
    }
}

impl From<io::Error> for Trap {
    fn from(err: io::Error) -> Self {
        Trap::Error(RuntimeError::Output(err))
    }
}

/// Builder for [`Vm`] instances.
#[derive(Clone, Debug)]
pub struct VmBuilder {
    stack_capacity: usize,
    call_stack_capacity: usize,
    limits: MineLimits,
    cancel: CancelToken,
}

impl VmBuilder {
    pub fn new() -> Self {
        Self {
            stack_capacity: STACK_SIZE,
            call_stack_capacity: CALL_STACK_SIZE,
            limits: MineLimits::default(),
            cancel: CancelToken::new(),
        }
    }

    /// Set the operand stack capacity (default 1024).
    pub fn stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = capacity;
        self
    }

    /// Set the call stack capacity (default 1024).
    pub fn call_stack_capacity(mut self, capacity: usize) -> Self {
        self.call_stack_capacity = capacity;
        self
    }

    /// Set the limits applied to every `qr_mine` call.
    pub fn mine_limits(mut self, limits: MineLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn max_attempts(mut self, attempts: u64) -> Self {
        self.limits = self.limits.max_attempts(attempts);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.limits = self.limits.timeout(timeout);
        self
    }

    /// Share a cancellation token with another thread.
    pub fn cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn build(self) -> Vm {
        Vm {
            memory: Memory::new(),
            stack: OperandStack::new(self.stack_capacity),
            calls: CallStack::new(self.call_stack_capacity),
            limits: self.limits,
            cancel: self.cancel,
        }
    }
}

impl Default for VmBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Stack machine state.
pub struct Vm {
    memory: Memory,
    stack: OperandStack,
    calls: CallStack,
    limits: MineLimits,
    cancel: CancelToken,
}

impl Vm {
    pub fn builder() -> VmBuilder {
        VmBuilder::new()
    }

    pub fn new() -> Self {
        VmBuilder::new().build()
    }

    /// Load and run `program`, writing its output to `out`.
    ///
    /// Uses `NoopTracer`, so faults are silent.
    pub fn execute<W: Write>(&mut self, program: &Program, out: &mut W) -> Result<(), RuntimeError> {
        self.execute_with(program, out, &mut NoopTracer)
    }

    /// Load and run `program`, reporting every step to `tracer`.
    pub fn execute_with<W: Write, T: Tracer>(
        &mut self,
        program: &Program,
        out: &mut W,
        tracer: &mut T,
    ) -> Result<(), RuntimeError> {
        self.load(program);
        self.run_with(program, out, tracer)
    }

    /// Reset memory and both stacks, then copy in the program image.
    ///
    /// Hosts that want to seed the stack or scratch before running call
    /// this, prepare state through [`memory_mut`](Self::memory_mut) and
    /// [`push_value`](Self::push_value), then call [`run`](Self::run).
    pub fn load(&mut self, program: &Program) {
        self.memory.load(program);
        self.stack.clear();
        self.calls.clear();
    }

    /// Run `program` against the current state without reloading it.
    pub fn run<W: Write>(&mut self, program: &Program, out: &mut W) -> Result<(), RuntimeError> {
        self.run_with(program, out, &mut NoopTracer)
    }

    pub fn run_with<W: Write, T: Tracer>(
        &mut self,
        program: &Program,
        out: &mut W,
        tracer: &mut T,
    ) -> Result<(), RuntimeError> {
        for (pc, decoded) in program.instructions() {
            if self.cancel.is_cancelled() {
                return Err(RuntimeError::Cancelled);
            }

            let result = match decoded {
                Ok(instr) => {
                    tracer.trace_instruction(pc, &instr);
                    self.step(pc + instr.size(), instr, out, tracer)
                }
                Err(err) => Err(Trap::Fault(Fault::InvalidInstruction(err))),
            };

            match result {
                Ok(()) => {}
                Err(Trap::Fault(fault)) => tracer.trace_fault(pc, &fault),
                Err(Trap::Error(err)) => return Err(err),
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn stack(&self) -> &[Value] {
        self.stack.as_slice()
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn push_value(&mut self, value: Value) -> Result<(), Fault> {
        self.stack.push(value)
    }

    pub fn call_depth(&self) -> usize {
        self.calls.depth()
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn limits(&self) -> &MineLimits {
        &self.limits
    }

    /// Bytes of a string operand.
    ///
    /// A `Str` names its bytes exactly. An `Int` is an address whose string
    /// runs to the next NUL in the same region.
    pub fn string_bytes(&self, value: &Value) -> Result<&[u8], Fault> {
        match value {
            Value::Str(r) => self.memory.resolve(*r),
            Value::Int(n) => self.memory.read_cstr(address(*n)?),
            Value::Matrix(_) => Err(Fault::mismatch("string", value)),
        }
    }

    /// Decode a materialized matrix.
    pub fn matrix(&self, value: &Value) -> Result<BitmapMatrix, Fault> {
        match value {
            Value::Matrix(r) => Ok(BitmapMatrix::from_bytes(self.memory.resolve(*r)?)?),
            _ => Err(Fault::mismatch("matrix", value)),
        }
    }

    fn target(&self, value: &Value) -> Result<Target, Fault> {
        let bytes = match value {
            Value::Str(r) => {
                let bytes = self.memory.resolve(*r)?;
                bytes
                    .get(..TARGET_LEN)
                    .ok_or(Fault::ShortTarget(bytes.len()))?
            }
            Value::Int(n) => self.memory.read(address(*n)?, TARGET_LEN)?,
            Value::Matrix(_) => return Err(Fault::mismatch("target", value)),
        };
        Ok(Target::from_slice(bytes)?)
    }

    fn push<T: Tracer>(&mut self, value: Value, tracer: &mut T) -> Result<(), Trap> {
        self.stack.push(value)?;
        tracer.trace_push(&value);
        Ok(())
    }

    /// Push a built-in's integer result, or `Int(0)` when it faulted.
    fn push_outcome<T: Tracer>(
        &mut self,
        outcome: Result<i64, Trap>,
        tracer: &mut T,
    ) -> Result<(), Trap> {
        match outcome {
            Ok(n) => self.push(Value::Int(n), tracer),
            Err(Trap::Fault(fault)) => {
                self.push(Value::Int(0), tracer)?;
                Err(Trap::Fault(fault))
            }
            Err(err) => Err(err),
        }
    }

    fn write_output<W: Write, T: Tracer>(
        &mut self,
        bytes: &[u8],
        out: &mut W,
        tracer: &mut T,
    ) -> Result<(), Trap> {
        out.write_all(bytes)?;
        tracer.trace_output(bytes);
        Ok(())
    }

    fn step<W: Write, T: Tracer>(
        &mut self,
        next_pc: usize,
        instr: Instruction,
        out: &mut W,
        tracer: &mut T,
    ) -> Result<(), Trap> {
        match instr {
            Instruction::Push(n) => self.push(Value::Int(n), tracer),
            Instruction::PushStr { offset, len } => {
                self.push(Value::Str(ByteRef { offset, len }), tracer)
            }
            Instruction::Pop => {
                let _ = self.stack.pop();
                Ok(())
            }
            Instruction::Add | Instruction::Sub | Instruction::Mul | Instruction::Div => {
                self.exec_arith(instr, tracer)
            }
            Instruction::Store => self.exec_store(),
            Instruction::Load => {
                let [addr] = self.stack.pop_n()?;
                let byte = self.memory.read_byte(address(int(&addr)?)?)?;
                self.push(Value::Int(byte as i64), tracer)
            }
            Instruction::Concat => {
                let [a, b] = self.stack.pop_n()?;
                let mut joined = self.string_bytes(&a)?.to_vec();
                joined.extend_from_slice(self.string_bytes(&b)?);
                let r = self.memory.alloc(&joined)?;
                self.push(Value::Str(r), tracer)
            }
            Instruction::Dup => match self.stack.peek().copied() {
                Some(top) => self.push(top, tracer),
                None => Ok(()),
            },
            Instruction::Swap => {
                self.stack.swap_top();
                Ok(())
            }
            Instruction::Print => self.exec_print(out, tracer),
            Instruction::Hash => {
                let [value] = self.stack.pop_n()?;
                let digest = sha256(self.string_bytes(&value)?);
                let r = self.memory.alloc(&digest)?;
                self.push(Value::Str(r), tracer)
            }
            Instruction::Hash160 => {
                let [value] = self.stack.pop_n()?;
                let digest = hash160(self.string_bytes(&value)?);
                let r = self.memory.alloc(&digest)?;
                self.push(Value::Str(r), tracer)
            }
            Instruction::Verify => {
                let [message, key, signature] = self.stack.pop_n()?;
                let outcome = self
                    .verify_signature(&message, &key, &signature)
                    .map_err(Trap::from);
                self.push_outcome(outcome, tracer)
            }
            Instruction::Call(builtin) => self.exec_call(next_pc, builtin, out, tracer),
        }
    }

    fn exec_arith<T: Tracer>(&mut self, instr: Instruction, tracer: &mut T) -> Result<(), Trap> {
        let [a, b] = self.stack.pop_n()?;
        let (a, b) = (int(&a)?, int(&b)?);
        let result = match instr {
            Instruction::Add => a.wrapping_add(b),
            Instruction::Sub => a.wrapping_sub(b),
            Instruction::Mul => a.wrapping_mul(b),
            _ => {
                if b == 0 {
                    return Err(Fault::DivisionByZero.into());
                }
                a.wrapping_div(b)
            }
        };
        self.push(Value::Int(result), tracer)
    }

    fn exec_store(&mut self) -> Result<(), Trap> {
        let [addr, value] = self.stack.pop_n()?;
        let addr = address(int(&addr)?)?;
        let byte = int(&value)? as u8;
        self.memory.write_byte(addr, byte)?;
        Ok(())
    }

    fn exec_print<W: Write, T: Tracer>(&mut self, out: &mut W, tracer: &mut T) -> Result<(), Trap> {
        let [value] = self.stack.pop_n()?;
        let line = match value {
            Value::Int(n) => format!("{n}\n"),
            Value::Str(r) => {
                let bytes = self.memory.resolve(r)?;
                format!("{}\n", String::from_utf8_lossy(bytes))
            }
            Value::Matrix(_) => {
                let m = self.matrix(&value)?;
                format!(
                    "matrix v{} {}x{} ecc {} density {:.4} noise {:.4}\n",
                    m.version(),
                    m.side(),
                    m.side(),
                    m.ecc(),
                    m.density(),
                    m.noise()
                )
            }
        };
        self.write_output(line.as_bytes(), out, tracer)
    }

    fn exec_call<W: Write, T: Tracer>(
        &mut self,
        return_addr: usize,
        builtin: Builtin,
        out: &mut W,
        tracer: &mut T,
    ) -> Result<(), Trap> {
        self.calls.push(return_addr, builtin)?;
        let depth = self.calls.depth();
        tracer.trace_call(builtin, depth);

        let result = match builtin {
            Builtin::QrMine => self.builtin_mine(tracer),
            Builtin::QrGenerate => self.builtin_generate(tracer),
            Builtin::QrPrint => self.builtin_print(out, tracer),
            Builtin::QrVerify => self.builtin_verify(tracer),
        };

        self.calls.pop();
        tracer.trace_return(builtin, depth);
        result
    }

    fn builtin_mine<T: Tracer>(&mut self, tracer: &mut T) -> Result<(), Trap> {
        let [header, target] = self.stack.pop_n()?;
        let outcome = self.mine(&header, &target, tracer);
        self.push_outcome(outcome, tracer)
    }

    /// Search for a nonce and return its low 32 bits as a signed value.
    fn mine<T: Tracer>(&self, header: &Value, target: &Value, tracer: &mut T) -> Result<i64, Trap> {
        let target = self.target(target)?;
        let header = self.string_bytes(header)?.to_vec();
        let mut job = MiningJob::new(header, target);

        let found = job.run(&self.limits, &self.cancel, |event| match event {
            MineEvent::Progress { attempts, elapsed } => {
                tracer.trace_mine_progress(attempts, elapsed)
            }
            MineEvent::Found { nonce, attempts } => tracer.trace_mine_found(nonce, attempts),
        });

        match found {
            Ok(solution) => Ok(solution.nonce as u32 as i32 as i64),
            Err(MineError::Cancelled { .. }) => Err(RuntimeError::Cancelled.into()),
            Err(err) => Err(Fault::Mine(err).into()),
        }
    }

    fn builtin_generate<T: Tracer>(&mut self, tracer: &mut T) -> Result<(), Trap> {
        let [data] = self.stack.pop_n()?;
        match self.generate(&data) {
            Ok(r) => self.push(Value::Matrix(r), tracer),
            Err(fault) => {
                self.push(Value::Int(0), tracer)?;
                Err(fault.into())
            }
        }
    }

    fn generate(&mut self, data: &Value) -> Result<ByteRef, Fault> {
        let matrix = BitmapMatrix::build(self.string_bytes(data)?, EccLevel::H)?;
        self.memory.alloc(&matrix.to_bytes())
    }

    fn builtin_print<W: Write, T: Tracer>(
        &mut self,
        out: &mut W,
        tracer: &mut T,
    ) -> Result<(), Trap> {
        let [value] = self.stack.pop_n()?;
        let rendered = self.matrix(&value)?.render();
        self.write_output(rendered.as_bytes(), out, tracer)
    }

    fn builtin_verify<T: Tracer>(&mut self, tracer: &mut T) -> Result<(), Trap> {
        let [target, matrix] = self.stack.pop_n()?;
        let outcome = self.verify_matrix(&matrix, &target).map_err(Trap::from);
        self.push_outcome(outcome, tracer)
    }

    fn verify_matrix(&self, matrix: &Value, target: &Value) -> Result<i64, Fault> {
        let matrix = self.matrix(matrix)?;
        let target = self.target(target)?;
        Ok(is_valid(&matrix, &target) as i64)
    }

    fn verify_signature(
        &self,
        message: &Value,
        key: &Value,
        signature: &Value,
    ) -> Result<i64, Fault> {
        let message = self.string_bytes(message)?;
        let key = self.string_bytes(key)?;
        let signature = self.string_bytes(signature)?;
        Ok(chrysalis_crypto::verify(key, message, signature)? as i64)
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

fn int(value: &Value) -> Result<i64, Fault> {
    value.as_int().ok_or_else(|| Fault::mismatch("int", value))
}

fn address(n: i64) -> Result<usize, Fault> {
    usize::try_from(n)
        .ok()
        .filter(|&addr| addr < MEMORY_SIZE)
        .ok_or(Fault::AddressOutOfRange(n))
}
