use std::fmt;
use std::ops::Range;

/// Diagnostic kinds, grouped by default severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Program cannot be built
    PoolOverflow,
    CodeOverflow,

    // Skipped input; compiled output is unaffected
    IntegerOutOfRange,
    UnknownMnemonic,
    MissingPushOperand,
    UnterminatedString,
    StrayString,
    MissingCallTarget,
    UnknownCallTarget,
    UnrecognizedInput,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::PoolOverflow | Self::CodeOverflow => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Base message for this kind.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::IntegerOutOfRange => "integer literal does not fit in 64 bits",
            Self::PoolOverflow => "string pool is full",
            Self::CodeOverflow => "program does not fit in the data region",
            Self::UnknownMnemonic => "unknown mnemonic",
            Self::MissingPushOperand => "`PUSH` expects an integer or a string literal",
            Self::UnterminatedString => "unterminated string literal",
            Self::StrayString => "string literal outside `PUSH`",
            Self::MissingCallTarget => "`CALL` expects a builtin name",
            Self::UnknownCallTarget => "unknown call target",
            Self::UnrecognizedInput => "unrecognized input",
        }
    }

    /// Message with optional detail appended.
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            Some(detail) => format!("{}: {}", self.fallback_message(), detail),
            None => self.fallback_message().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    pub(crate) range: Range<usize>,
    pub(crate) message: String,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: Range<usize>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            range,
            message: kind.message(None),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity, self.range.start, self.range.end, self.message
        )
    }
}
