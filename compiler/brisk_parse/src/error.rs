//! Parse error types.

use std::fmt;

use brisk_ir::{Position, Span, TokenKind};
use brisk_lexer::LexError;

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ParseErrorKind {
    /// The current token cannot continue the construct being parsed.
    UnexpectedToken {
        expected: String,
        found: TokenKind,
    },
    /// A numeric literal that does not fit its value type.
    InvalidLiteral { text: String },
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
    pub span: Span,
}

impl ParseError {
    pub fn unexpected(
        expected: impl Into<String>,
        found: TokenKind,
        position: Position,
        span: Span,
    ) -> Self {
        ParseError {
            kind: ParseErrorKind::UnexpectedToken {
                expected: expected.into(),
                found,
            },
            position,
            span,
        }
    }

    pub fn invalid_literal(text: impl Into<String>, position: Position, span: Span) -> Self {
        ParseError {
            kind: ParseErrorKind::InvalidLiteral { text: text.into() },
            position,
            span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => write!(
                f,
                "expected {expected}, found {found} at {}",
                self.position
            ),
            ParseErrorKind::InvalidLiteral { text } => {
                write!(f, "invalid numeric literal `{text}` at {}", self.position)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Anything that stops a unit from parsing.
///
/// Tokens are pulled lazily, so a lexing failure surfaces in the middle of
/// parsing and travels through the same channel.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SyntaxError {
    Lex(LexError),
    Parse(ParseError),
}

impl SyntaxError {
    pub fn position(&self) -> Position {
        match self {
            SyntaxError::Lex(e) => e.position,
            SyntaxError::Parse(e) => e.position,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(e) => e.span,
            SyntaxError::Parse(e) => e.span,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::Lex(e) => e.fmt(f),
            SyntaxError::Parse(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for SyntaxError {}

impl From<LexError> for SyntaxError {
    fn from(e: LexError) -> Self {
        SyntaxError::Lex(e)
    }
}

impl From<ParseError> for SyntaxError {
    fn from(e: ParseError) -> Self {
        SyntaxError::Parse(e)
    }
}
