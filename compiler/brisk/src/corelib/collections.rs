//! `System.Collections.List`, the members of every list value.

use std::sync::Arc;

use brisk_value::{
    host_error, index_out_of_bounds, EvalError, HostType, List, ParamType, PrimitiveKind, Value,
};

fn list<'a>(recv: &'a Value, member: &str) -> Result<&'a List, EvalError> {
    recv.as_list()
        .ok_or_else(|| host_error(format!("`{member}` needs a list receiver")))
}

/// Resolve an index value to a position inside `list`.
fn position(list: &List, index: &Value) -> Result<usize, EvalError> {
    let n = match index {
        Value::Int(n) => *n,
        Value::Float(x) if x.fract() == 0.0 => {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "integral floats index like ints; out of range is caught below"
            )]
            let n = *x as i64;
            n
        }
        other => {
            return Err(host_error(format!(
                "list index must be an int, found {}",
                other.type_name()
            )))
        }
    };
    usize::try_from(n)
        .ok()
        .filter(|&i| i < list.len())
        .ok_or_else(|| index_out_of_bounds(n, list.len()))
}

pub(super) fn list_type() -> Arc<HostType> {
    HostType::builder("System.Collections.List")
        .bind(PrimitiveKind::List)
        .constructor(Vec::<ParamType>::new(), |_| Ok(Value::List(List::new())))
        .method("Add", [ParamType::Any], |recv, args| {
            let list = list(recv, "Add")?;
            list.push(args.first().cloned().unwrap_or(Value::Null));
            Ok(Value::Null)
        })
        .property("Count", |recv| {
            Ok(Value::Int(
                i64::try_from(list(recv, "Count")?.len()).unwrap_or(i64::MAX),
            ))
        })
        .method("Clear", Vec::<ParamType>::new(), |recv, _| {
            list(recv, "Clear")?.clear();
            Ok(Value::Null)
        })
        .method("Contains", [ParamType::Any], |recv, args| {
            let needle = args.first().unwrap_or(&Value::Null);
            Ok(Value::Bool(list(recv, "Contains")?.contains(needle)))
        })
        .indexer(
            |recv, index| {
                let list = list(recv, "indexer")?;
                let at = position(list, index)?;
                Ok(list.get(at).unwrap_or(Value::Null))
            },
            Some(Box::new(|recv: &Value, index: &Value, value: Value| {
                let list = list(recv, "indexer")?;
                let at = position(list, index)?;
                list.set(at, value.clone());
                Ok(value)
            })),
        )
        .build()
}
