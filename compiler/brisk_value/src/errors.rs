//! Runtime error types.
//!
//! `EvalErrorKind` carries the structured category; factory functions build
//! the error with its message so call sites stay one-liners.

use std::fmt;

use brisk_ir::Position;

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Late binding
    MissingMember {
        name: String,
        type_name: String,
    },
    NoMatchingOverload {
        name: String,
        type_name: String,
        arity: usize,
    },
    NoMatchingConstructor {
        type_name: String,
        arity: usize,
    },
    WrongArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },
    ReadOnlyMember {
        name: String,
        type_name: String,
    },

    // Operators
    OperatorTypeMismatch {
        op: &'static str,
        left: String,
        right: String,
    },
    InvalidOperand {
        op: &'static str,
        type_name: String,
    },
    DivisionByZero,

    // Value shape
    NotCallable {
        type_name: String,
    },
    NotAType {
        type_name: String,
    },
    NotIndexable {
        type_name: String,
    },
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },

    // Loading
    ImportNotFound {
        name: String,
        path: String,
    },
    Io {
        path: String,
        message: String,
    },

    /// Raised by a host callback.
    Host {
        message: String,
    },
    /// A script function was called after its runtime was dropped.
    RuntimeDropped,
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMember { name, type_name } => {
                write!(f, "no member `{name}` on {type_name}")
            }
            Self::NoMatchingOverload {
                name,
                type_name,
                arity,
            } => write!(
                f,
                "no overload of `{name}` on {type_name} accepts these {arity} argument(s)"
            ),
            Self::NoMatchingConstructor { type_name, arity } => write!(
                f,
                "no constructor of {type_name} accepts these {arity} argument(s)"
            ),
            Self::WrongArgumentCount {
                name,
                expected,
                got,
            } => write!(f, "`{name}` expects {expected} argument(s), got {got}"),
            Self::ReadOnlyMember { name, type_name } => {
                write!(f, "member `{name}` on {type_name} cannot be assigned")
            }
            Self::OperatorTypeMismatch { op, left, right } => {
                write!(f, "operator `{op}` cannot be applied to {left} and {right}")
            }
            Self::InvalidOperand { op, type_name } => {
                write!(f, "operator `{op}` cannot be applied to {type_name}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::NotAType { type_name } => {
                write!(f, "`new` needs a type, found {type_name}")
            }
            Self::NotIndexable { type_name } => write!(f, "{type_name} cannot be indexed"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::ImportNotFound { name, path } => {
                write!(f, "cannot import `{name}`: no global and no file {path}")
            }
            Self::Io { path, message } => write!(f, "{path}: {message}"),
            Self::Host { message } => f.write_str(message),
            Self::RuntimeDropped => write!(f, "function called after its runtime was dropped"),
        }
    }
}

/// A runtime failure; aborts the current run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()` for factory errors.
    pub message: String,
    /// Where the failing operation was written, if known.
    pub position: Option<Position>,
}

impl EvalError {
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            message: kind.to_string(),
            kind,
            position: None,
        }
    }

    /// Attach a source position unless one is already set.
    ///
    /// Errors bubble through nested call sites; the innermost site wins.
    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        if self.position.is_none() {
            self.position = Some(position);
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} at {position}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for EvalError {}

// Factory functions

pub fn missing_member(name: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingMember {
        name: name.to_string(),
        type_name: type_name.to_string(),
    })
}

pub fn no_matching_overload(name: &str, type_name: &str, arity: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMatchingOverload {
        name: name.to_string(),
        type_name: type_name.to_string(),
        arity,
    })
}

pub fn no_matching_constructor(type_name: &str, arity: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMatchingConstructor {
        type_name: type_name.to_string(),
        arity,
    })
}

pub fn wrong_argument_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgumentCount {
        name: name.to_string(),
        expected,
        got,
    })
}

pub fn read_only_member(name: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReadOnlyMember {
        name: name.to_string(),
        type_name: type_name.to_string(),
    })
}

pub fn operator_type_mismatch(op: &'static str, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OperatorTypeMismatch {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

pub fn invalid_operand(op: &'static str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperand {
        op,
        type_name: type_name.to_string(),
    })
}

pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

pub fn not_a_type(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAType {
        type_name: type_name.to_string(),
    })
}

pub fn not_indexable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIndexable {
        type_name: type_name.to_string(),
    })
}

pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

pub fn import_not_found(name: &str, path: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImportNotFound {
        name: name.to_string(),
        path: path.to_string(),
    })
}

pub fn io_error(path: &str, err: &std::io::Error) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Io {
        path: path.to_string(),
        message: err.to_string(),
    })
}

pub fn host_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Host {
        message: message.into(),
    })
}

pub fn runtime_dropped() -> EvalError {
    EvalError::from_kind(EvalErrorKind::RuntimeDropped)
}
