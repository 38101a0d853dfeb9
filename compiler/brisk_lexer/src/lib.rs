//! Lexer for Brisk source text.
//!
//! Tokens are produced lazily, one per [`Lexer::next_token`] call, so the
//! parser never materializes the full token stream. [`tokenize`] collects
//! them for tooling and tests.

mod cursor;
mod error;
mod lexer;
mod operators;

pub use error::{LexError, LexErrorKind};
pub use lexer::{tokenize, Lexer};
