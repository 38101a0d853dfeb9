//! `System.String`, the members of every string value.

use std::sync::Arc;

use brisk_value::{
    host_error, EvalError, EvalResult, HostType, ParamType, PrimitiveKind, Value,
};

use super::{char_len, int_arg, receiver_str, str_arg};

fn predicate(
    name: &'static str,
    test: fn(&str, &str) -> bool,
) -> impl Fn(&Value, &[Value]) -> EvalResult + Send + Sync + 'static {
    move |recv, args| Ok(Value::Bool(test(receiver_str(recv, name)?, str_arg(args, 0, name)?)))
}

fn transform(
    name: &'static str,
    f: fn(&str) -> String,
) -> impl Fn(&Value, &[Value]) -> EvalResult + Send + Sync + 'static {
    move |recv, _| Ok(Value::string(f(receiver_str(recv, name)?)))
}

fn char_index(n: i64, name: &str) -> Result<usize, EvalError> {
    usize::try_from(n).map_err(|_| host_error(format!("`{name}` expects a non-negative int")))
}

fn substring(recv: &Value, args: &[Value]) -> EvalResult {
    let text = receiver_str(recv, "Substring")?;
    let start = char_index(int_arg(args, 0, "Substring")?, "Substring")?;
    let len = char_index(int_arg(args, 1, "Substring")?, "Substring")?;
    let total = text.chars().count();
    if start.saturating_add(len) > total {
        return Err(host_error(format!(
            "Substring({start}, {len}) is out of range for a string of length {total}"
        )));
    }
    Ok(Value::string(
        text.chars().skip(start).take(len).collect::<String>(),
    ))
}

fn index_of(recv: &Value, args: &[Value]) -> EvalResult {
    let text = receiver_str(recv, "IndexOf")?;
    let needle = str_arg(args, 0, "IndexOf")?;
    let found = text
        .find(needle)
        .map(|byte| text[..byte].chars().count())
        .and_then(|chars| i64::try_from(chars).ok());
    Ok(Value::Int(found.unwrap_or(-1)))
}

pub(super) fn string_type() -> Arc<HostType> {
    HostType::builder("System.String")
        .bind(PrimitiveKind::Str)
        .property("Length", |recv| Ok(char_len(receiver_str(recv, "Length")?)))
        .method("ToUpper", Vec::<ParamType>::new(), transform("ToUpper", str::to_uppercase))
        .method("ToLower", Vec::<ParamType>::new(), transform("ToLower", str::to_lowercase))
        .method(
            "Trim",
            Vec::<ParamType>::new(),
            transform("Trim", |s| s.trim().to_string()),
        )
        .method("Contains", [ParamType::Str], predicate("Contains", |s, p| s.contains(p)))
        .method(
            "StartsWith",
            [ParamType::Str],
            predicate("StartsWith", |s, p| s.starts_with(p)),
        )
        .method(
            "EndsWith",
            [ParamType::Str],
            predicate("EndsWith", |s, p| s.ends_with(p)),
        )
        .method("IndexOf", [ParamType::Str], index_of)
        .method("Substring", [ParamType::Int, ParamType::Int], substring)
        .method("Replace", [ParamType::Str, ParamType::Str], |recv, args| {
            let text = receiver_str(recv, "Replace")?;
            let from = str_arg(args, 0, "Replace")?;
            if from.is_empty() {
                return Err(host_error("Replace needs a non-empty pattern"));
            }
            Ok(Value::string(text.replace(from, str_arg(args, 1, "Replace")?)))
        })
        .build()
}
