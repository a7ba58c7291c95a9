//! Operand and call stacks.

use chrysalis_bytecode::Builtin;

use crate::fault::Fault;
use crate::value::Value;

/// Bounded stack of tagged values.
///
/// A push onto a full stack drops the value; a pop from an empty one
/// yields nothing. Both report a fault and leave the stack untouched.
#[derive(Debug)]
pub struct OperandStack {
    values: Vec<Value>,
    capacity: usize,
}

impl OperandStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    pub fn push(&mut self, value: Value) -> Result<(), Fault> {
        if self.values.len() >= self.capacity {
            return Err(Fault::StackOverflow);
        }
        self.values.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Value, Fault> {
        self.values.pop().ok_or(Fault::StackUnderflow)
    }

    /// Pop the top `N` values, deepest first.
    ///
    /// Fails without popping anything when fewer than `N` are present.
    pub fn pop_n<const N: usize>(&mut self) -> Result<[Value; N], Fault> {
        let Some(start) = self.values.len().checked_sub(N) else {
            return Err(Fault::StackUnderflow);
        };
        let mut popped = [Value::Int(0); N];
        popped.copy_from_slice(&self.values[start..]);
        self.values.truncate(start);
        Ok(popped)
    }

    pub fn peek(&self) -> Option<&Value> {
        self.values.last()
    }

    /// Exchange the top two slots. Returns false when fewer than two exist.
    pub fn swap_top(&mut self) -> bool {
        let n = self.values.len();
        if n < 2 {
            return false;
        }
        self.values.swap(n - 1, n - 2);
        true
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Call frame for a built-in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Address of the instruction after the CALL.
    pub return_addr: usize,
    pub builtin: Builtin,
}

/// Bounded stack of return addresses.
#[derive(Debug)]
pub struct CallStack {
    frames: Vec<Frame>,
    capacity: usize,
}

impl CallStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: Vec::new(),
            capacity,
        }
    }

    pub fn push(&mut self, return_addr: usize, builtin: Builtin) -> Result<(), Fault> {
        if self.frames.len() >= self.capacity {
            return Err(Fault::CallStackOverflow);
        }
        self.frames.push(Frame {
            return_addr,
            builtin,
        });
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
