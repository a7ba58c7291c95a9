#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QrError {
    #[error("payload of {len} bytes exceeds the largest bitmap capacity ({max} bytes)")]
    CapacityExceeded { len: usize, max: usize },
    #[error("malformed matrix: {0}")]
    MalformedMatrix(&'static str),
    #[error("unknown error correction level '{0}' (expected L, M, Q or H)")]
    UnknownEcc(String),
    #[error("target must be 32 bytes, got {0}")]
    TargetLength(usize),
    #[error("invalid target hex: {0}")]
    TargetHex(String),
}
