//! Instruction set and its byte encoding.
//!
//! Every instruction starts with a one-byte opcode. Operands follow inline:
//! - `PUSH`: i64 LE
//! - `PUSH_STR`: u32 LE absolute offset, u32 LE length
//! - `CALL`: one builtin byte
//!
//! All other instructions are a single byte.

use std::fmt;

/// Opcode bytes.
///
/// `RET`, `JMP` and `JZ` are reserved: they have assigned bytes but no
/// instruction decodes to them. The builtin bytes (`0x10..=0x13`) only
/// appear as the operand of `CALL`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Opcode {
    Push = 0x01,
    Pop = 0x02,
    Add = 0x03,
    Sub = 0x04,
    Mul = 0x05,
    Div = 0x06,
    Store = 0x07,
    Load = 0x08,
    Call = 0x09,
    Ret = 0x0A,
    Jmp = 0x0B,
    Jz = 0x0C,
    Print = 0x0D,
    Hash = 0x0E,
    Verify = 0x0F,
    Concat = 0x14,
    Dup = 0x15,
    Swap = 0x16,
    PushStr = 0x17,
    Hash160 = 0x18,
}

impl Opcode {
    pub fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0x01 => Self::Push,
            0x02 => Self::Pop,
            0x03 => Self::Add,
            0x04 => Self::Sub,
            0x05 => Self::Mul,
            0x06 => Self::Div,
            0x07 => Self::Store,
            0x08 => Self::Load,
            0x09 => Self::Call,
            0x0A => Self::Ret,
            0x0B => Self::Jmp,
            0x0C => Self::Jz,
            0x0D => Self::Print,
            0x0E => Self::Hash,
            0x0F => Self::Verify,
            0x14 => Self::Concat,
            0x15 => Self::Dup,
            0x16 => Self::Swap,
            0x17 => Self::PushStr,
            0x18 => Self::Hash160,
            _ => return None,
        })
    }

    /// Encoded size including operands.
    pub fn size(self) -> usize {
        match self {
            Self::Push | Self::PushStr => 9,
            Self::Call => 2,
            _ => 1,
        }
    }

    pub fn is_reserved(self) -> bool {
        matches!(self, Self::Ret | Self::Jmp | Self::Jz)
    }

    /// Source-level spelling.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Store => "STORE",
            Self::Load => "LOAD",
            Self::Call => "CALL",
            Self::Ret => "RET",
            Self::Jmp => "JMP",
            Self::Jz => "JZ",
            Self::Print => "PRINT",
            Self::Hash => "HASH",
            Self::Verify => "VERIFY",
            Self::Concat => "CONCAT",
            Self::Dup => "DUP",
            Self::Swap => "SWAP",
            Self::PushStr => "PUSH_STR",
            Self::Hash160 => "HASH160",
        }
    }
}

/// Built-in routines reachable through `CALL`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Builtin {
    QrMine = 0x10,
    QrGenerate = 0x11,
    QrPrint = 0x12,
    QrVerify = 0x13,
}

impl Builtin {
    pub const ALL: [Builtin; 4] = [
        Builtin::QrMine,
        Builtin::QrGenerate,
        Builtin::QrPrint,
        Builtin::QrVerify,
    ];

    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|b| *b as u8 == v)
    }

    /// Name used after `CALL` in source.
    pub fn name(self) -> &'static str {
        match self {
            Self::QrMine => "qr_mine",
            Self::QrGenerate => "qr_generate",
            Self::QrPrint => "qr_print",
            Self::QrVerify => "qr_verify",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown opcode 0x{0:02X}")]
    UnknownOpcode(u8),
    #[error("reserved opcode {}", .0.mnemonic())]
    Reserved(Opcode),
    #[error("{} operand truncated", .0.mnemonic())]
    Truncated(Opcode),
    #[error("unknown builtin 0x{0:02X}")]
    UnknownBuiltin(u8),
    #[error("end of code")]
    Empty,
}

/// A decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Push(i64),
    PushStr { offset: u32, len: u32 },
    Pop,
    Add,
    Sub,
    Mul,
    Div,
    Store,
    Load,
    Call(Builtin),
    Print,
    Hash,
    Hash160,
    Verify,
    Concat,
    Dup,
    Swap,
}

impl Instruction {
    /// Decode the instruction at the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let &first = bytes.first().ok_or(DecodeError::Empty)?;
        let opcode = Opcode::from_u8(first).ok_or(DecodeError::UnknownOpcode(first))?;
        if opcode.is_reserved() {
            return Err(DecodeError::Reserved(opcode));
        }
        let operand = bytes
            .get(1..opcode.size())
            .ok_or(DecodeError::Truncated(opcode))?;

        Ok(match opcode {
            Opcode::Push => {
                let arr: [u8; 8] = operand.try_into().map_err(|_| DecodeError::Truncated(opcode))?;
                Self::Push(i64::from_le_bytes(arr))
            }
            Opcode::PushStr => Self::PushStr {
                offset: u32::from_le_bytes([operand[0], operand[1], operand[2], operand[3]]),
                len: u32::from_le_bytes([operand[4], operand[5], operand[6], operand[7]]),
            },
            Opcode::Call => {
                let b = operand[0];
                Self::Call(Builtin::from_u8(b).ok_or(DecodeError::UnknownBuiltin(b))?)
            }
            Opcode::Pop => Self::Pop,
            Opcode::Add => Self::Add,
            Opcode::Sub => Self::Sub,
            Opcode::Mul => Self::Mul,
            Opcode::Div => Self::Div,
            Opcode::Store => Self::Store,
            Opcode::Load => Self::Load,
            Opcode::Print => Self::Print,
            Opcode::Hash => Self::Hash,
            Opcode::Hash160 => Self::Hash160,
            Opcode::Verify => Self::Verify,
            Opcode::Concat => Self::Concat,
            Opcode::Dup => Self::Dup,
            Opcode::Swap => Self::Swap,
            Opcode::Ret | Opcode::Jmp | Opcode::Jz => return Err(DecodeError::Reserved(opcode)),
        })
    }

    /// Append the encoding to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.opcode() as u8);
        match *self {
            Self::Push(n) => out.extend_from_slice(&n.to_le_bytes()),
            Self::PushStr { offset, len } => {
                out.extend_from_slice(&offset.to_le_bytes());
                out.extend_from_slice(&len.to_le_bytes());
            }
            Self::Call(builtin) => out.push(builtin as u8),
            _ => {}
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        self.write_to(&mut out);
        out
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Self::Push(_) => Opcode::Push,
            Self::PushStr { .. } => Opcode::PushStr,
            Self::Pop => Opcode::Pop,
            Self::Add => Opcode::Add,
            Self::Sub => Opcode::Sub,
            Self::Mul => Opcode::Mul,
            Self::Div => Opcode::Div,
            Self::Store => Opcode::Store,
            Self::Load => Opcode::Load,
            Self::Call(_) => Opcode::Call,
            Self::Print => Opcode::Print,
            Self::Hash => Opcode::Hash,
            Self::Hash160 => Opcode::Hash160,
            Self::Verify => Opcode::Verify,
            Self::Concat => Opcode::Concat,
            Self::Dup => Opcode::Dup,
            Self::Swap => Opcode::Swap,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.opcode().size()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.opcode().mnemonic();
        match self {
            Self::Push(n) => write!(f, "{mnemonic} {n}"),
            Self::PushStr { offset, len } => write!(f, "{mnemonic} 0x{offset:05X} {len}"),
            Self::Call(builtin) => write!(f, "{mnemonic} {builtin}"),
            _ => f.write_str(mnemonic),
        }
    }
}
