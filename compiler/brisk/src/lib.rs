//! Brisk: an embeddable, dynamically typed scripting language.
//!
//! Scripts are lexed, parsed, lowered to closures and run against a host
//! surface the embedding application registers explicitly. Member access,
//! calls, operators and construction are resolved the first time each call
//! shape runs and cached from then on.
//!
//! ```no_run
//! use brisk::{corelib, Runtime};
//!
//! let runtime = Runtime::new([corelib::library()]);
//! let module = runtime.create_namespace();
//! let value = runtime.execute_expr("System.Math.Max(2, 40) + 2", &module);
//! ```
//!
//! Host types are described with [`HostType::builder`] and grouped into
//! [`TypeLibrary`] units; live objects are exposed through
//! [`Runtime::with_instances`], which makes every method of each instance
//! callable by bare name.

pub mod commands;
pub mod corelib;
mod diagnostics;
mod tracing_setup;

pub use brisk_eval::{
    CacheStats, LowerError, LowerErrorKind, OpKind, Runtime, RuntimeBuilder, ScriptError,
    Signature, TableStats, DEFAULT_SCRIPT_EXTENSION,
};
pub use brisk_ir::{Node, NodeKind, Position, Token, TokenKind};
pub use brisk_lexer::{tokenize, LexError, LexErrorKind};
pub use brisk_parse::{parse, ParseError, ParseErrorKind, SyntaxError};
pub use brisk_value::{
    host_error, EvalError, EvalErrorKind, EvalResult, FunctionValue, HostObject, HostType,
    HostTypeBuilder, HostUnit, List, Namespace, Param, ParamType, PrimitiveKind, TypeLibrary,
    Value,
};
pub use diagnostics::render_error;
pub use tracing_setup::init_tracing;
