//! Lexer for Chrysalis assembly.
//!
//! Produces span-based tokens; text is sliced from source only when needed.
//! Whitespace and `#` comments are kept as trivia tokens so spans stay
//! contiguous; the compiler filters them out.

use std::ops::Range;

use logos::Logos;

/// Longest word the lexer produces. Longer runs are split.
pub const MAX_WORD_LEN: usize = 255;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,

    /// Runs to the closing quote, or to end of input when unterminated.
    #[regex(r#""[^"]*"?"#, allow_greedy = true)]
    StringLiteral,

    #[regex(r#"[^ \t\r\n#"][^ \t\r\n#]*"#, allow_greedy = true)]
    Word,

    /// Coalesced run of input the lexer could not classify.
    Garbage,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }
}

/// Zero-copy token: kind + span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Source text of this token.
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.clone()]
    }
}

/// Tokenize `source`, trivia included.
///
/// Post-processes the Logos output:
/// - coalesces consecutive lexer errors into single `Garbage` tokens
/// - splits words longer than [`MAX_WORD_LEN`] bytes
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(TokenKind::Garbage, start..lexer.span().start));
                }

                let span = lexer.span();
                if kind == TokenKind::Word && span.len() > MAX_WORD_LEN {
                    split_word(source, span, &mut tokens);
                } else {
                    tokens.push(Token::new(kind, span));
                }
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(TokenKind::Garbage, start..source.len()));
                }
                break;
            }
        }
    }

    tokens
}

/// Split an overlong word into pieces of at most [`MAX_WORD_LEN`] bytes,
/// cutting on character boundaries.
fn split_word(source: &str, span: Range<usize>, tokens: &mut Vec<Token>) {
    let mut start = span.start;
    while start < span.end {
        let mut end = (start + MAX_WORD_LEN).min(span.end);
        while !source.is_char_boundary(end) {
            end -= 1;
        }
        tokens.push(Token::new(TokenKind::Word, start..end));
        start = end;
    }
}
