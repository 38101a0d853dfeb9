//! Token types produced by the lexer.

use std::fmt;

use crate::{Position, Span};

/// A lexed token.
///
/// Carries the literal source text so the parser can build literals and
/// identifiers without going back to the source buffer.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
            position,
        }
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Token kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals and names
    Ident,
    Int,
    Float,
    Str,

    // Keywords
    If,
    Then,
    Else,
    ElseIf,
    /// `end` or `endif`
    End,
    Var,
    /// `function` or `defun`
    Function,
    Lambda,
    Return,
    Break,
    Loop,
    Import,
    As,
    New,
    True,
    False,

    // Single-character operators
    Bang,
    Percent,
    Amp,
    LParen,
    RParen,
    Star,
    Plus,
    /// `^` or `**`
    Caret,
    Comma,
    Minus,
    Dot,
    Slash,
    Colon,
    Tilde,
    Lt,
    Eq,
    Gt,
    Question,
    Semicolon,
    Bar,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Two-character operators
    /// `!=` or `<>`
    BangEq,
    /// `&&` or `and`
    AmpAmp,
    /// `||` or `or`
    BarBar,
    /// `==` or `eq`
    EqEq,
    LtEq,
    GtEq,
    Shl,
    Shr,
    CaretCaret,

    Eof,
}

impl TokenKind {
    /// Human-readable name used in parse errors.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Ident => "identifier",
            Self::Int => "integer literal",
            Self::Float => "float literal",
            Self::Str => "string literal",
            Self::If => "`if`",
            Self::Then => "`then`",
            Self::Else => "`else`",
            Self::ElseIf => "`elseif`",
            Self::End => "`end`",
            Self::Var => "`var`",
            Self::Function => "`function`",
            Self::Lambda => "`lambda`",
            Self::Return => "`return`",
            Self::Break => "`break`",
            Self::Loop => "`loop`",
            Self::Import => "`import`",
            Self::As => "`as`",
            Self::New => "`new`",
            Self::True => "`true`",
            Self::False => "`false`",
            Self::Bang => "`!`",
            Self::Percent => "`%`",
            Self::Amp => "`&`",
            Self::LParen => "`(`",
            Self::RParen => "`)`",
            Self::Star => "`*`",
            Self::Plus => "`+`",
            Self::Caret => "`^`",
            Self::Comma => "`,`",
            Self::Minus => "`-`",
            Self::Dot => "`.`",
            Self::Slash => "`/`",
            Self::Colon => "`:`",
            Self::Tilde => "`~`",
            Self::Lt => "`<`",
            Self::Eq => "`=`",
            Self::Gt => "`>`",
            Self::Question => "`?`",
            Self::Semicolon => "`;`",
            Self::Bar => "`|`",
            Self::LBrace => "`{`",
            Self::RBrace => "`}`",
            Self::LBracket => "`[`",
            Self::RBracket => "`]`",
            Self::BangEq => "`!=`",
            Self::AmpAmp => "`&&`",
            Self::BarBar => "`||`",
            Self::EqEq => "`==`",
            Self::LtEq => "`<=`",
            Self::GtEq => "`>=`",
            Self::Shl => "`<<`",
            Self::Shr => "`>>`",
            Self::CaretCaret => "`^^`",
            Self::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Look up a keyword by its exact spelling.
///
/// Matching is case-sensitive: `If` is an identifier.
pub fn keyword(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "if" => TokenKind::If,
        "then" => TokenKind::Then,
        "else" => TokenKind::Else,
        "elseif" => TokenKind::ElseIf,
        "end" | "endif" => TokenKind::End,
        "var" => TokenKind::Var,
        "function" | "defun" => TokenKind::Function,
        "lambda" => TokenKind::Lambda,
        "return" => TokenKind::Return,
        "break" => TokenKind::Break,
        "loop" => TokenKind::Loop,
        "import" => TokenKind::Import,
        "as" => TokenKind::As,
        "new" => TokenKind::New,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "and" => TokenKind::AmpAmp,
        "or" => TokenKind::BarBar,
        "eq" => TokenKind::EqEq,
        _ => return None,
    };
    Some(kind)
}
