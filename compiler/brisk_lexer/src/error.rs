//! Lexer errors.

use std::fmt;

use brisk_ir::{Position, Span};

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum LexErrorKind {
    /// A character that starts no token.
    InvalidCharacter(char),
    /// A string literal with no closing quote.
    UnterminatedLiteral,
}

/// A fatal lexing failure; aborts the current unit.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
    pub span: Span,
}

impl LexError {
    pub fn invalid_character(c: char, position: Position, span: Span) -> Self {
        LexError {
            kind: LexErrorKind::InvalidCharacter(c),
            position,
            span,
        }
    }

    pub fn unterminated_literal(position: Position, span: Span) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedLiteral,
            position,
            span,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::InvalidCharacter(c) => {
                write!(f, "invalid character {c:?} at {}", self.position)
            }
            LexErrorKind::UnterminatedLiteral => {
                write!(f, "unterminated string literal starting at {}", self.position)
            }
        }
    }
}

impl std::error::Error for LexError {}
