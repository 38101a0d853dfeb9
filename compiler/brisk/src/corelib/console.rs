//! `System.Console`.

use std::io::Write as _;
use std::sync::Arc;

use brisk_value::{host_error, HostType, ParamType, Value};

fn write(text: &str, newline: bool) -> Result<Value, brisk_value::EvalError> {
    let mut out = std::io::stdout().lock();
    let written = if newline {
        writeln!(out, "{text}")
    } else {
        write!(out, "{text}").and_then(|()| out.flush())
    };
    written
        .map(|()| Value::Null)
        .map_err(|e| host_error(format!("console write failed: {e}")))
}

pub(super) fn console_type() -> Arc<HostType> {
    HostType::builder("System.Console")
        .static_method("WriteLine", [ParamType::Any], |args| {
            write(&args.first().map(Value::to_string).unwrap_or_default(), true)
        })
        .static_method("WriteLine", Vec::<ParamType>::new(), |_| write("", true))
        .static_method("Write", [ParamType::Any], |args| {
            write(&args.first().map(Value::to_string).unwrap_or_default(), false)
        })
        .build()
}
