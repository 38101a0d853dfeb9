use brisk_ir::{keyword, Position, Span, Token, TokenKind};

use crate::cursor::Cursor;
use crate::operators;
use crate::LexError;

/// Lazy token source over a borrowed string.
///
/// After the first [`TokenKind::Eof`] every further call yields `Eof` again.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
        }
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();

        let start = self.cursor.pos();
        let position = self.cursor.position();
        let Some(c) = self.cursor.current() else {
            return Ok(Token::new(
                TokenKind::Eof,
                "",
                Span::from_range(start..start),
                position,
            ));
        };

        if c.is_alphabetic() || c == '_' || c == '@' {
            return Ok(self.identifier(start, position));
        }
        if c.is_ascii_digit() {
            return Ok(self.number(start, position));
        }
        if c == '"' || c == '\'' {
            return self.string(c, start, position);
        }
        self.operator(c, start, position)
    }

    /// Whitespace and `//` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current() {
                Some(c) if c.is_whitespace() => {
                    self.cursor.bump();
                }
                Some('/') if self.cursor.peek() == Some('/') => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                _ => return,
            }
        }
    }

    fn identifier(&mut self, start: usize, position: Position) -> Token {
        self.cursor.bump();
        self.cursor.eat_while(|c| c.is_alphanumeric() || c == '_');
        let text = self.cursor.slice(start);
        let kind = keyword(text).unwrap_or(TokenKind::Ident);
        Token::new(kind, text, self.span_from(start), position)
    }

    fn number(&mut self, start: usize, position: Position) -> Token {
        let mut kind = TokenKind::Int;
        self.cursor.eat_while(|c| c.is_ascii_digit());

        if self.cursor.current() == Some('.') && self.next_is_digit(1) {
            kind = TokenKind::Float;
            self.cursor.bump();
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        // the marker always belongs to the literal; `2e` is a malformed
        // float for the parser to reject, not `2` followed by `e`
        if matches!(self.cursor.current(), Some('e' | 'E')) {
            kind = TokenKind::Float;
            self.cursor.bump();
            if matches!(self.cursor.current(), Some('+' | '-')) {
                self.cursor.bump();
            }
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        if matches!(self.cursor.current(), Some('f' | 'F')) {
            kind = TokenKind::Float;
            self.cursor.bump();
        }

        Token::new(kind, self.cursor.slice(start), self.span_from(start), position)
    }

    fn next_is_digit(&self, n: usize) -> bool {
        self.cursor.nth(n).is_some_and(|c| c.is_ascii_digit())
    }

    /// String literal without escapes; the text excludes the quotes.
    fn string(&mut self, quote: char, start: usize, position: Position) -> Result<Token, LexError> {
        self.cursor.bump();
        let body_start = self.cursor.pos();
        self.cursor.eat_while(|c| c != quote);
        if self.cursor.is_eof() {
            return Err(LexError::unterminated_literal(
                position,
                self.span_from(start),
            ));
        }
        let text = self.cursor.slice(body_start);
        self.cursor.bump();
        Ok(Token::new(TokenKind::Str, text, self.span_from(start), position))
    }

    fn operator(&mut self, c: char, start: usize, position: Position) -> Result<Token, LexError> {
        if let Some(kind) = self
            .cursor
            .peek()
            .and_then(|next| operators::double(c, next))
        {
            self.cursor.bump();
            self.cursor.bump();
            return Ok(self.token_from(kind, start, position));
        }
        if let Some(kind) = operators::single(c) {
            self.cursor.bump();
            return Ok(self.token_from(kind, start, position));
        }
        self.cursor.bump();
        Err(LexError::invalid_character(c, position, self.span_from(start)))
    }

    fn token_from(&self, kind: TokenKind, start: usize, position: Position) -> Token {
        Token::new(kind, self.cursor.slice(start), self.span_from(start), position)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::from_range(start..self.cursor.pos())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    /// Yields tokens up to but not including `Eof`.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) if token.is(TokenKind::Eof) => None,
            other => Some(other),
        }
    }
}

/// Lex the whole source, ending with an `Eof` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.is(TokenKind::Eof);
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
