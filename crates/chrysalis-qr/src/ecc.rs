use std::fmt;
use std::str::FromStr;

use crate::error::QrError;

/// Error correction class. Only recorded in the format word; no actual
/// redundancy is added to the payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EccLevel {
    /// ~7% recovery.
    L = 0,
    /// ~15% recovery.
    M = 1,
    /// ~25% recovery.
    Q = 2,
    /// ~30% recovery. Used by the VM and the miner.
    #[default]
    H = 3,
}

impl EccLevel {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::L),
            1 => Some(Self::M),
            2 => Some(Self::Q),
            3 => Some(Self::H),
            _ => None,
        }
    }

    /// 15-bit format word: the class in the two high bits.
    pub fn format_word(self) -> u16 {
        (self as u16) << 13
    }
}

impl FromStr for EccLevel {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(QrError::UnknownEcc(s.to_string())),
        }
    }
}

impl fmt::Display for EccLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        f.write_str(name)
    }
}
