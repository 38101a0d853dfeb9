//! Token stream shape.

use brisk::{tokenize, LexErrorKind, Position, TokenKind};
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn a_statement_lexes_with_positions() {
    let tokens = tokenize("var total = price * 2\ntotal").unwrap();
    let summary: Vec<(TokenKind, &str, Position)> = tokens
        .iter()
        .map(|t| (t.kind, t.text.as_str(), t.position))
        .collect();
    assert_eq!(
        summary,
        vec![
            (TokenKind::Var, "var", Position::new(1, 1)),
            (TokenKind::Ident, "total", Position::new(1, 5)),
            (TokenKind::Eq, "=", Position::new(1, 11)),
            (TokenKind::Ident, "price", Position::new(1, 13)),
            (TokenKind::Star, "*", Position::new(1, 19)),
            (TokenKind::Int, "2", Position::new(1, 21)),
            (TokenKind::Ident, "total", Position::new(2, 1)),
            (TokenKind::Eof, "", Position::new(2, 6)),
        ]
    );
}

#[test]
fn keyword_aliases_share_token_kinds() {
    assert_eq!(
        kinds("defun function end endif and && or || eq =="),
        vec![
            TokenKind::Function,
            TokenKind::Function,
            TokenKind::End,
            TokenKind::End,
            TokenKind::AmpAmp,
            TokenKind::AmpAmp,
            TokenKind::BarBar,
            TokenKind::BarBar,
            TokenKind::EqEq,
            TokenKind::EqEq,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("a ** b ^ c"),
        vec![
            TokenKind::Ident,
            TokenKind::Caret,
            TokenKind::Ident,
            TokenKind::Caret,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn numbers_become_floats_only_with_a_fraction_exponent_or_suffix() {
    assert_eq!(kinds("12")[0], TokenKind::Int);
    assert_eq!(kinds("12.5")[0], TokenKind::Float);
    assert_eq!(kinds("1e3")[0], TokenKind::Float);
    assert_eq!(kinds("2f")[0], TokenKind::Float);
    // a trailing dot is member access, not a fraction
    assert_eq!(
        kinds("1.x"),
        vec![TokenKind::Int, TokenKind::Dot, TokenKind::Ident, TokenKind::Eof]
    );
}

#[test]
fn reserved_operators_still_lex() {
    assert_eq!(
        kinds("~ ? : | & ^^ << >> <>"),
        vec![
            TokenKind::Tilde,
            TokenKind::Question,
            TokenKind::Colon,
            TokenKind::Bar,
            TokenKind::Amp,
            TokenKind::CaretCaret,
            TokenKind::Shl,
            TokenKind::Shr,
            TokenKind::BangEq,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_and_both_quote_styles() {
    let tokens = tokenize("// header\n'it''s' \"say 'hi'\"").unwrap();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["it", "s", "say 'hi'", ""]);
}

#[test]
fn lex_errors_carry_positions() {
    let err = tokenize("a = 1\nb = #").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidCharacter('#'));
    assert_eq!(err.position, Position::new(2, 5));

    let err = tokenize("x = 'open").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedLiteral);
    assert_eq!(err.position, Position::new(1, 5));
}
