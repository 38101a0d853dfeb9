//! `System.Convert`.

use std::sync::Arc;

use brisk_value::{host_error, EvalError, EvalResult, HostType, ParamType, Value};

use super::arg;

fn unconvertible(value: &Value, target: &str) -> EvalError {
    host_error(format!("cannot convert {} `{value}` to {target}", value.type_name()))
}

fn to_int(args: &[Value]) -> EvalResult {
    let value = arg(args, 0, "ToInt32")?;
    let n = match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Int(n) => *n,
        Value::Float(x) => {
            let rounded = x.round_ties_even();
            if !rounded.is_finite() {
                return Err(unconvertible(value, "int"));
            }
            #[allow(
                clippy::cast_possible_truncation,
                reason = "saturating conversion of a finite float"
            )]
            let n = rounded as i64;
            n
        }
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| unconvertible(value, "int"))?,
        _ => return Err(unconvertible(value, "int")),
    };
    Ok(Value::Int(n))
}

fn to_float(args: &[Value]) -> EvalResult {
    let value = arg(args, 0, "ToDouble")?;
    let x = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Int(_) | Value::Float(_) => value.as_float().unwrap_or_default(),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| unconvertible(value, "float"))?,
        _ => return Err(unconvertible(value, "float")),
    };
    Ok(Value::Float(x))
}

fn to_bool(args: &[Value]) -> EvalResult {
    let value = arg(args, 0, "ToBoolean")?;
    let b = match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(n) => *n != 0,
        Value::Float(x) => *x != 0.0,
        Value::Str(s) if s.trim().eq_ignore_ascii_case("true") => true,
        Value::Str(s) if s.trim().eq_ignore_ascii_case("false") => false,
        _ => return Err(unconvertible(value, "bool")),
    };
    Ok(Value::Bool(b))
}

pub(super) fn convert_type() -> Arc<HostType> {
    HostType::builder("System.Convert")
        .static_method("ToInt32", [ParamType::Any], to_int)
        .static_method("ToDouble", [ParamType::Any], to_float)
        .static_method("ToString", [ParamType::Any], |args| {
            Ok(Value::string(arg(args, 0, "ToString")?.to_string()))
        })
        .static_method("ToBoolean", [ParamType::Any], to_bool)
        .build()
}
