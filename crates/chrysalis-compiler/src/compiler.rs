//! Single-pass code generation.
//!
//! The compiler walks the non-trivia tokens once, appending instructions to
//! the code buffer and literals to the string pool. All state, including
//! the pool write cursor, lives on [`Compiler`], so independent
//! compilations never share anything.

use std::ops::Range;

use chrysalis_bytecode::{Builtin, Instruction, Program};
use chrysalis_core::{DATA_END, POOL_SIZE, POOL_START};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lexer::{Token, TokenKind, lex};
use crate::{CompileError, Result};

/// A successfully compiled program plus any warnings.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub program: Program,
    pub diagnostics: Diagnostics,
}

pub struct Compiler<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    code: Vec<u8>,
    pool: Vec<u8>,
    literal_count: u32,
    code_full: bool,
    strict: bool,
    diagnostics: Diagnostics,
}

impl<'s> Compiler<'s> {
    pub fn new(source: &'s str) -> Self {
        let tokens = lex(source)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        Self {
            source,
            tokens,
            pos: 0,
            code: Vec::new(),
            pool: Vec::new(),
            literal_count: 0,
            code_full: false,
            strict: false,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Fail the compilation on warnings too.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn compile(mut self) -> Result<Compiled> {
        while let Some(token) = self.bump() {
            match token.kind {
                TokenKind::Word => self.word(token),
                TokenKind::StringLiteral => self
                    .diagnostics
                    .report(DiagnosticKind::StrayString, token.span)
                    .emit(),
                TokenKind::Garbage => self
                    .diagnostics
                    .report(DiagnosticKind::UnrecognizedInput, token.span)
                    .emit(),
                TokenKind::Whitespace | TokenKind::Comment => {}
            }
        }

        if self.diagnostics.has_errors() {
            return Err(CompileError::Failed(self.diagnostics));
        }
        if self.strict && self.diagnostics.has_warnings() {
            return Err(CompileError::Strict(self.diagnostics));
        }

        let program = Program::new(self.code, self.pool, self.literal_count)?;
        Ok(Compiled {
            program,
            diagnostics: self.diagnostics,
        })
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn text(&self, token: &Token) -> &'s str {
        token.text(self.source)
    }

    fn word(&mut self, token: Token) {
        let text = self.text(&token);
        match text {
            "PUSH" => self.push(token),
            "CALL" => self.call(token),
            _ => match simple_instruction(text) {
                Some(instr) => self.emit(instr, token.span),
                None => self
                    .diagnostics
                    .report(DiagnosticKind::UnknownMnemonic, token.span)
                    .message(format!("`{text}`"))
                    .emit(),
            },
        }
    }

    /// `PUSH <int>` or `PUSH "text"`. Anything else is left for the main
    /// loop to process.
    fn push(&mut self, push: Token) {
        let Some(operand) = self.peek().cloned() else {
            self.diagnostics
                .report(DiagnosticKind::MissingPushOperand, push.span)
                .emit();
            return;
        };

        match operand.kind {
            TokenKind::StringLiteral => {
                self.pos += 1;
                self.string_literal(push.span.start, operand);
            }
            TokenKind::Word if is_integer_literal(self.text(&operand)) => {
                self.pos += 1;
                let span = push.span.start..operand.span.end;
                match self.text(&operand).parse::<i64>() {
                    Ok(n) => self.emit(Instruction::Push(n), span),
                    Err(_) => self
                        .diagnostics
                        .report(DiagnosticKind::IntegerOutOfRange, operand.span)
                        .emit(),
                }
            }
            _ => self
                .diagnostics
                .report(DiagnosticKind::MissingPushOperand, push.span)
                .emit(),
        }
    }

    fn string_literal(&mut self, push_start: usize, literal: Token) {
        let text = self.text(&literal);
        let body = &text[1..];
        let body = match body.strip_suffix('"') {
            Some(closed) => closed,
            None => {
                self.diagnostics
                    .report(DiagnosticKind::UnterminatedString, literal.span.clone())
                    .emit();
                body
            }
        };

        let bytes = body.as_bytes();
        let needed = bytes.len() + 1;
        let remaining = POOL_SIZE - self.pool.len();
        if needed > remaining {
            self.diagnostics
                .report(DiagnosticKind::PoolOverflow, literal.span)
                .message(format!("{needed} bytes needed, {remaining} left"))
                .emit();
            return;
        }

        let offset = (POOL_START + self.pool.len()) as u32;
        self.pool.extend_from_slice(bytes);
        self.pool.push(0);
        self.literal_count += 1;

        let instr = Instruction::PushStr {
            offset,
            len: bytes.len() as u32,
        };
        self.emit(instr, push_start..literal.span.end);
    }

    fn call(&mut self, call: Token) {
        let source = self.source;
        let target = self
            .peek()
            .filter(|t| t.kind == TokenKind::Word && !is_mnemonic(t.text(source)))
            .cloned();
        let Some(target) = target else {
            self.diagnostics
                .report(DiagnosticKind::MissingCallTarget, call.span)
                .emit();
            return;
        };
        self.pos += 1;

        let name = self.text(&target);
        match Builtin::from_name(name) {
            Some(builtin) => self.emit(Instruction::Call(builtin), call.span.start..target.span.end),
            None => self
                .diagnostics
                .report(DiagnosticKind::UnknownCallTarget, target.span)
                .message(format!("`{name}`"))
                .emit(),
        }
    }

    fn emit(&mut self, instr: Instruction, span: Range<usize>) {
        if self.code_full {
            return;
        }
        if self.code.len() + instr.size() > DATA_END {
            self.code_full = true;
            self.diagnostics
                .report(DiagnosticKind::CodeOverflow, span)
                .message(format!("code is limited to {DATA_END} bytes"))
                .emit();
            return;
        }
        instr.write_to(&mut self.code);
    }
}

fn simple_instruction(text: &str) -> Option<Instruction> {
    Some(match text {
        "POP" => Instruction::Pop,
        "ADD" => Instruction::Add,
        "SUB" => Instruction::Sub,
        "MUL" => Instruction::Mul,
        "DIV" => Instruction::Div,
        "STORE" => Instruction::Store,
        "LOAD" => Instruction::Load,
        "CONCAT" => Instruction::Concat,
        "DUP" => Instruction::Dup,
        "SWAP" => Instruction::Swap,
        "PRINT" => Instruction::Print,
        "HASH" => Instruction::Hash,
        "HASH160" => Instruction::Hash160,
        "VERIFY" => Instruction::Verify,
        _ => return None,
    })
}

fn is_mnemonic(text: &str) -> bool {
    matches!(text, "PUSH" | "CALL") || simple_instruction(text).is_some()
}

/// Optional `-` followed by at least one ASCII digit.
fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
