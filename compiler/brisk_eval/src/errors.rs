//! Lowering errors and the error type returned by the runtime facade.

use std::fmt;

use brisk_ir::{Position, Span};
use brisk_lexer::LexError;
use brisk_parse::{ParseError, SyntaxError};
use brisk_value::EvalError;

/// Structural mistakes detected while lowering, before anything runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LowerErrorKind {
    ReturnOutsideFunction,
    BreakOutsideLoop,
    /// A function definition anywhere but directly in a module.
    NotNested { name: String },
    NotAssignable,
    ImportOutsideModule,
}

impl fmt::Display for LowerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReturnOutsideFunction => write!(f, "`return` outside of a function"),
            Self::BreakOutsideLoop => write!(f, "`break` outside of a loop"),
            Self::NotNested { name } => {
                write!(f, "function `{name}` must be defined at module level")
            }
            Self::NotAssignable => write!(f, "invalid assignment target"),
            Self::ImportOutsideModule => write!(f, "`import` is only allowed at module level"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LowerError {
    pub kind: LowerErrorKind,
    pub position: Position,
    pub span: Span,
}

impl LowerError {
    pub fn new(kind: LowerErrorKind, position: Position, span: Span) -> Self {
        LowerError {
            kind,
            position,
            span,
        }
    }
}

impl fmt::Display for LowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.position)
    }
}

impl std::error::Error for LowerError {}

/// Any failure surfaced by [`Runtime`](crate::Runtime).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ScriptError {
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Lower(#[from] LowerError),
    #[error("{0}")]
    Eval(#[from] EvalError),
}

impl ScriptError {
    pub fn position(&self) -> Option<Position> {
        match self {
            ScriptError::Lex(e) => Some(e.position),
            ScriptError::Parse(e) => Some(e.position),
            ScriptError::Lower(e) => Some(e.position),
            ScriptError::Eval(e) => e.position,
        }
    }

    /// Source range, for errors found before execution.
    pub fn span(&self) -> Option<Span> {
        match self {
            ScriptError::Lex(e) => Some(e.span),
            ScriptError::Parse(e) => Some(e.span),
            ScriptError::Lower(e) => Some(e.span),
            ScriptError::Eval(_) => None,
        }
    }

    /// The runtime error an `import` raises when loading a file fails.
    pub(crate) fn into_eval(self) -> EvalError {
        match self {
            ScriptError::Eval(e) => e,
            other => brisk_value::host_error(other.to_string()),
        }
    }
}

impl From<SyntaxError> for ScriptError {
    fn from(err: SyntaxError) -> Self {
        match err {
            SyntaxError::Lex(e) => ScriptError::Lex(e),
            SyntaxError::Parse(e) => ScriptError::Parse(e),
        }
    }
}
