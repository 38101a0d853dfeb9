//! Recursive-descent parser for Brisk.
//!
//! [`parse`] turns a whole unit (a file or an evaluated snippet) into a
//! [`NodeKind::Block`] of statements. Statement dispatch is on the leading
//! token; expressions use one function per precedence level.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind, SyntaxError};

use brisk_ir::{Node, NodeKind, Span};

pub(crate) type PResult<T> = Result<T, SyntaxError>;

/// Parser state.
pub struct Parser<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Result<Self, SyntaxError> {
        Ok(Parser {
            cursor: Cursor::new(source)?,
        })
    }

    /// Parse statements until end of input.
    pub fn parse_unit(&mut self) -> PResult<Node> {
        let start = self.cursor.peek().span;
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        let span = start.merge(self.cursor.previous_span());
        Ok(Node::new(NodeKind::Block(statements), span))
    }

    /// Span from `start` through the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }
}

/// Parse a complete unit of source text.
pub fn parse(source: &str) -> Result<Node, SyntaxError> {
    Parser::new(source)?.parse_unit()
}

#[cfg(test)]
mod tests;
