//! Operator tables.
//!
//! Two-phase matching: a pair wins only when the specific (first, second)
//! combination is listed in [`double`]; otherwise [`single`] decides.

use brisk_ir::TokenKind;

pub(crate) fn single(c: char) -> Option<TokenKind> {
    let kind = match c {
        '!' => TokenKind::Bang,
        '%' => TokenKind::Percent,
        '&' => TokenKind::Amp,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '*' => TokenKind::Star,
        '+' => TokenKind::Plus,
        '^' => TokenKind::Caret,
        ',' => TokenKind::Comma,
        '-' => TokenKind::Minus,
        '.' => TokenKind::Dot,
        '/' => TokenKind::Slash,
        ':' => TokenKind::Colon,
        '~' => TokenKind::Tilde,
        '<' => TokenKind::Lt,
        '=' => TokenKind::Eq,
        '>' => TokenKind::Gt,
        '?' => TokenKind::Question,
        ';' => TokenKind::Semicolon,
        '|' => TokenKind::Bar,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        _ => return None,
    };
    Some(kind)
}

pub(crate) fn double(first: char, second: char) -> Option<TokenKind> {
    let kind = match (first, second) {
        ('!', '=') | ('<', '>') => TokenKind::BangEq,
        ('&', '&') => TokenKind::AmpAmp,
        ('|', '|') => TokenKind::BarBar,
        ('*', '*') => TokenKind::Caret,
        ('^', '^') => TokenKind::CaretCaret,
        ('<', '=') => TokenKind::LtEq,
        ('<', '<') => TokenKind::Shl,
        ('=', '=') => TokenKind::EqEq,
        ('>', '=') => TokenKind::GtEq,
        ('>', '>') => TokenKind::Shr,
        _ => return None,
    };
    Some(kind)
}
