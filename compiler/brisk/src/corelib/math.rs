//! `System.Math`.

use std::sync::Arc;

use brisk_value::{EvalResult, HostType, ParamType, Value};

use super::{float_arg, int_arg};

const INT2: [ParamType; 2] = [ParamType::Int, ParamType::Int];
const FLOAT2: [ParamType; 2] = [ParamType::Float, ParamType::Float];

fn float_fn(
    name: &'static str,
    f: fn(f64) -> f64,
) -> impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static {
    move |args| Ok(Value::Float(f(float_arg(args, 0, name)?)))
}

/// Int overloads come first so `Math.Max(2, 3)` stays an int.
pub(super) fn math_type() -> Arc<HostType> {
    HostType::builder("System.Math")
        .static_method("Abs", [ParamType::Int], |args| {
            Ok(Value::Int(int_arg(args, 0, "Abs")?.wrapping_abs()))
        })
        .static_method("Abs", [ParamType::Float], float_fn("Abs", f64::abs))
        .static_method("Max", INT2, |args| {
            Ok(Value::Int(int_arg(args, 0, "Max")?.max(int_arg(args, 1, "Max")?)))
        })
        .static_method("Max", FLOAT2, |args| {
            Ok(Value::Float(
                float_arg(args, 0, "Max")?.max(float_arg(args, 1, "Max")?),
            ))
        })
        .static_method("Min", INT2, |args| {
            Ok(Value::Int(int_arg(args, 0, "Min")?.min(int_arg(args, 1, "Min")?)))
        })
        .static_method("Min", FLOAT2, |args| {
            Ok(Value::Float(
                float_arg(args, 0, "Min")?.min(float_arg(args, 1, "Min")?),
            ))
        })
        .static_method("Pow", FLOAT2, |args| {
            Ok(Value::Float(
                float_arg(args, 0, "Pow")?.powf(float_arg(args, 1, "Pow")?),
            ))
        })
        .static_method("Sqrt", [ParamType::Float], float_fn("Sqrt", f64::sqrt))
        .static_method("Floor", [ParamType::Float], float_fn("Floor", f64::floor))
        .static_method("Ceiling", [ParamType::Float], float_fn("Ceiling", f64::ceil))
        // ties go to the even neighbour
        .static_method(
            "Round",
            [ParamType::Float],
            float_fn("Round", f64::round_ties_even),
        )
        .static_property("PI", || Ok(Value::Float(std::f64::consts::PI)))
        .build()
}
