//! One-token lookahead over the lazy lexer.

use brisk_ir::{Span, Token, TokenKind};
use brisk_lexer::Lexer;

use crate::{ParseError, SyntaxError};

/// Cursor for navigating tokens.
///
/// Holds exactly one lexed-but-unconsumed token. Consuming it pulls the next
/// one from the lexer, so lex errors show up at `advance` time.
pub struct Cursor<'src> {
    lexer: Lexer<'src>,
    current: Token,
    previous_span: Span,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Result<Self, SyntaxError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Cursor {
            lexer,
            current,
            previous_span: Span::DUMMY,
        })
    }

    #[inline]
    pub fn peek(&self) -> &Token {
        &self.current
    }

    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.current.kind
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Span of the last consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        self.previous_span
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> Result<Token, SyntaxError> {
        let next = self.lexer.next_token()?;
        let token = std::mem::replace(&mut self.current, next);
        self.previous_span = token.span;
        Ok(token)
    }

    /// Consume the current token if it has the given kind.
    pub fn try_eat(&mut self, kind: TokenKind) -> Result<bool, SyntaxError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume a token of the given kind or fail.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(kind.display_name()))
        }
    }

    pub fn expect_ident(&mut self) -> Result<String, SyntaxError> {
        Ok(self.expect(TokenKind::Ident)?.text)
    }

    /// Error for the current token, naming what would have been accepted.
    pub fn unexpected(&self, expected: &str) -> SyntaxError {
        ParseError::unexpected(
            expected,
            self.current.kind,
            self.current.position,
            self.current.span,
        )
        .into()
    }
}
