//! Shared intermediate representation for the Brisk pipeline.
//!
//! Everything the lexer, parser and evaluator pass to each other lives here:
//! source locations, tokens, operators and the syntax tree. The crate has no
//! dependencies so the front end stays cheap to build.

pub mod ast;
mod span;
mod token;

pub use ast::{BinaryOp, IfBranch, Literal, MemberKind, Node, NodeKind, UnaryOp};
pub use span::{LineIndex, Position, Span};
pub use token::{keyword, Token, TokenKind};
