use std::fmt;

/// A span of bytes in VM memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ByteRef {
    pub offset: u32,
    pub len: u32,
}

impl ByteRef {
    pub fn new(offset: usize, len: usize) -> Self {
        Self {
            offset: offset as u32,
            len: len as u32,
        }
    }

    pub fn offset(self) -> usize {
        self.offset as usize
    }

    pub fn len(self) -> usize {
        self.len as usize
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Operand stack slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    /// Exact bytes, no terminator implied.
    Str(ByteRef),
    /// A materialized bitmap matrix.
    Matrix(ByteRef),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::Matrix(_) => "matrix",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(r) => write!(f, "str@0x{:05X}+{}", r.offset, r.len),
            Value::Matrix(r) => write!(f, "matrix@0x{:05X}+{}", r.offset, r.len),
        }
    }
}
