//! Character cursor with line/column tracking.
//!
//! Columns count characters, not bytes. A newline bumps the line and resets
//! the column to 1.

use brisk_ir::Position;

pub(crate) struct Cursor<'src> {
    source: &'src str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Cursor {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Byte offset of the current character.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Character `n` places after the current one.
    #[inline]
    pub(crate) fn nth(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.nth(1)
    }

    /// Consume the current character.
    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume characters while `pred` holds.
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.current() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }

    #[inline]
    pub(crate) fn slice(&self, start: usize) -> &'src str {
        &self.source[start..self.pos]
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}
