//! The `System` host library.
//!
//! A small standard library scripts can rely on when the embedder loads it:
//! math, string members, a string builder, list members, conversions and
//! console output. Everything is registered through the same
//! [`HostType`] table an embedding application would use.

mod collections;
mod console;
mod convert;
mod math;
mod string;
mod text;

use brisk_value::{host_error, EvalError, TypeLibrary, Value};

pub use text::StringBuilder;

/// Name of the unit [`library`] returns.
pub const LIBRARY_NAME: &str = "System";

/// Every `System` type, ready for [`Runtime::new`](crate::Runtime::new).
pub fn library() -> TypeLibrary {
    TypeLibrary::new(LIBRARY_NAME)
        .with(math::math_type())
        .with(string::string_type())
        .with(text::string_builder_type())
        .with(collections::list_type())
        .with(convert::convert_type())
        .with(console::console_type())
}

// Argument accessors. Dispatch has already matched and coerced the
// arguments, so a mismatch here means a registration bug.

fn arg<'a>(args: &'a [Value], index: usize, member: &str) -> Result<&'a Value, EvalError> {
    args.get(index)
        .ok_or_else(|| host_error(format!("`{member}` is missing argument {index}")))
}

fn int_arg(args: &[Value], index: usize, member: &str) -> Result<i64, EvalError> {
    arg(args, index, member)?
        .as_int()
        .ok_or_else(|| host_error(format!("`{member}` expects an int argument")))
}

fn float_arg(args: &[Value], index: usize, member: &str) -> Result<f64, EvalError> {
    arg(args, index, member)?
        .as_float()
        .ok_or_else(|| host_error(format!("`{member}` expects a number argument")))
}

fn str_arg<'a>(args: &'a [Value], index: usize, member: &str) -> Result<&'a str, EvalError> {
    arg(args, index, member)?
        .as_str()
        .ok_or_else(|| host_error(format!("`{member}` expects a string argument")))
}

fn receiver_str<'a>(receiver: &'a Value, member: &str) -> Result<&'a str, EvalError> {
    receiver
        .as_str()
        .ok_or_else(|| host_error(format!("`{member}` needs a string receiver")))
}

/// Character count as a script int.
fn char_len(s: &str) -> Value {
    Value::Int(i64::try_from(s.chars().count()).unwrap_or(i64::MAX))
}
