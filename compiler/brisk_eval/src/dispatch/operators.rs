//! Native operator semantics and the implicit conversions applied before
//! them.
//!
//! Resolution picks a [`Conversion`] from the operand shapes once per
//! guarded branch; execution applies it and then the native operator.

use std::borrow::Cow;
use std::cmp::Ordering;

use brisk_ir::{BinaryOp, UnaryOp};
use brisk_value::{
    division_by_zero, invalid_operand, operator_type_mismatch, EvalError, EvalResult, Shape,
    Value,
};

/// Type an operand is implicitly converted to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Widen {
    Float,
    Str,
}

/// Which operand, if any, converts to the other's type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Conversion {
    None,
    Left(Widen),
    Right(Widen),
}

fn implicit(from: Shape, to: Shape) -> Option<Widen> {
    match (from, to) {
        (Shape::Int, Shape::Float) => Some(Widen::Float),
        (Shape::Int | Shape::Float | Shape::Bool, Shape::Str) => Some(Widen::Str),
        _ => None,
    }
}

/// Prefer converting the left operand to the right's type, else the right
/// to the left's.
pub(crate) fn conversion(left: Shape, right: Shape) -> Conversion {
    if left == right {
        return Conversion::None;
    }
    if let Some(widen) = implicit(left, right) {
        Conversion::Left(widen)
    } else if let Some(widen) = implicit(right, left) {
        Conversion::Right(widen)
    } else {
        Conversion::None
    }
}

fn widen(value: &Value, to: Widen) -> Cow<'_, Value> {
    match to {
        Widen::Float => value
            .as_float()
            .map_or(Cow::Borrowed(value), |x| Cow::Owned(Value::Float(x))),
        Widen::Str => Cow::Owned(Value::string(value.to_string())),
    }
}

pub(crate) fn apply_binary(
    op: BinaryOp,
    conversion: Conversion,
    left: &Value,
    right: &Value,
) -> EvalResult {
    let (left, right) = match conversion {
        Conversion::None => (Cow::Borrowed(left), Cow::Borrowed(right)),
        Conversion::Left(to) => (widen(left, to), Cow::Borrowed(right)),
        Conversion::Right(to) => (Cow::Borrowed(left), widen(right, to)),
    };
    evaluate_binary(op, &left, &right)
}

/// Apply `op` to operands of matching types. Mixed types only support
/// equality.
pub(crate) fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => float_binary(*a, *b, op),
        (Value::Bool(a), Value::Bool(b)) => bool_binary(*a, *b, op),
        (Value::Str(a), Value::Str(b)) => str_binary(a, b, op),
        _ => match op {
            BinaryOp::Eq => Ok(Value::Bool(left == right)),
            BinaryOp::NotEq => Ok(Value::Bool(left != right)),
            _ => Err(mismatch(op, left, right)),
        },
    }
}

#[cold]
fn mismatch(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    operator_type_mismatch(op.as_symbol(), &left.type_name(), &right.type_name())
}

fn compare(ordering: Ordering, op: BinaryOp) -> Option<bool> {
    match op {
        BinaryOp::Eq => Some(ordering == Ordering::Equal),
        BinaryOp::NotEq => Some(ordering != Ordering::Equal),
        BinaryOp::Lt => Some(ordering == Ordering::Less),
        BinaryOp::LtEq => Some(ordering != Ordering::Greater),
        BinaryOp::Gt => Some(ordering == Ordering::Greater),
        BinaryOp::GtEq => Some(ordering != Ordering::Less),
        _ => None,
    }
}

/// Integer arithmetic wraps on overflow; division truncates.
fn int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    let value = match op {
        BinaryOp::Add => Value::Int(a.wrapping_add(b)),
        BinaryOp::Sub => Value::Int(a.wrapping_sub(b)),
        BinaryOp::Mul => Value::Int(a.wrapping_mul(b)),
        BinaryOp::Div if b == 0 => return Err(division_by_zero()),
        BinaryOp::Div => Value::Int(a.wrapping_div(b)),
        BinaryOp::Mod if b == 0 => return Err(division_by_zero()),
        BinaryOp::Mod => Value::Int(a.wrapping_rem(b)),
        BinaryOp::And => Value::Int(a & b),
        BinaryOp::Or => Value::Int(a | b),
        BinaryOp::Pow => return Err(mismatch(op, &Value::Int(a), &Value::Int(b))),
        _ => return compare(a.cmp(&b), op).map(Value::Bool).ok_or_else(|| {
            mismatch(op, &Value::Int(a), &Value::Int(b))
        }),
    };
    Ok(value)
}

fn float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    #[allow(clippy::float_cmp, reason = "script equality is exact")]
    let value = match op {
        BinaryOp::Add => Value::Float(a + b),
        BinaryOp::Sub => Value::Float(a - b),
        BinaryOp::Mul => Value::Float(a * b),
        BinaryOp::Div => Value::Float(a / b),
        BinaryOp::Mod => Value::Float(a % b),
        BinaryOp::Pow => Value::Float(a.powf(b)),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::NotEq => Value::Bool(a != b),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::LtEq => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::GtEq => Value::Bool(a >= b),
        BinaryOp::And | BinaryOp::Or => {
            return Err(mismatch(op, &Value::Float(a), &Value::Float(b)))
        }
    };
    Ok(value)
}

fn bool_binary(a: bool, b: bool, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::And => Ok(Value::Bool(a & b)),
        BinaryOp::Or => Ok(Value::Bool(a | b)),
        _ => Err(mismatch(op, &Value::Bool(a), &Value::Bool(b))),
    }
}

/// Strings concatenate and compare lexicographically.
fn str_binary(a: &str, b: &str, op: BinaryOp) -> EvalResult {
    if op == BinaryOp::Add {
        let mut joined = String::with_capacity(a.len() + b.len());
        joined.push_str(a);
        joined.push_str(b);
        return Ok(Value::from(joined));
    }
    compare(a.cmp(b), op)
        .map(Value::Bool)
        .ok_or_else(|| mismatch(op, &Value::string(a), &Value::string(b)))
}

pub(crate) fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Not, Value::Int(n)) => Ok(Value::Int(!n)),
        _ => Err(invalid_operand(op.as_symbol(), &operand.type_name())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn binary(op: BinaryOp, left: Value, right: Value) -> EvalResult {
        apply_binary(op, conversion(left.shape(), right.shape()), &left, &right)
    }

    #[test]
    fn int_division_truncates() {
        assert_eq!(binary(BinaryOp::Div, Value::Int(7), Value::Int(2)), Ok(Value::Int(3)));
        assert_eq!(binary(BinaryOp::Mod, Value::Int(5), Value::Int(2)), Ok(Value::Int(1)));
    }

    #[test]
    fn division_by_zero_fails() {
        let err = binary(BinaryOp::Div, Value::Int(1), Value::Int(0)).unwrap_err();
        assert_eq!(err, division_by_zero());
        assert!(binary(BinaryOp::Div, Value::Float(1.0), Value::Float(0.0)).is_ok());
    }

    #[test]
    fn int_widens_to_float() {
        assert_eq!(conversion(Shape::Int, Shape::Float), Conversion::Left(Widen::Float));
        assert_eq!(conversion(Shape::Float, Shape::Int), Conversion::Right(Widen::Float));
        assert_eq!(
            binary(BinaryOp::Add, Value::Int(1), Value::Float(0.5)),
            Ok(Value::Float(1.5))
        );
    }

    #[test]
    fn numbers_widen_to_string() {
        assert_eq!(
            binary(BinaryOp::Add, Value::string("n="), Value::Int(4)),
            Ok(Value::string("n=4"))
        );
        assert_eq!(
            binary(BinaryOp::Add, Value::Bool(true), Value::string("!")),
            Ok(Value::string("true!"))
        );
    }

    #[test]
    fn pow_needs_floats() {
        assert_eq!(
            binary(BinaryOp::Pow, Value::Float(2.0), Value::Float(2.0)),
            Ok(Value::Float(4.0))
        );
        assert!(binary(BinaryOp::Pow, Value::Int(2), Value::Int(2)).is_err());
        assert_eq!(
            binary(BinaryOp::Pow, Value::Int(2), Value::Float(3.0)),
            Ok(Value::Float(8.0))
        );
    }

    #[test]
    fn logical_and_bitwise() {
        assert_eq!(
            binary(BinaryOp::And, Value::Bool(true), Value::Bool(false)),
            Ok(Value::Bool(false))
        );
        assert_eq!(binary(BinaryOp::Or, Value::Int(4), Value::Int(1)), Ok(Value::Int(5)));
        assert!(binary(BinaryOp::And, Value::Float(1.0), Value::Float(1.0)).is_err());
    }

    #[test]
    fn strings_compare_by_content() {
        assert_eq!(
            binary(BinaryOp::Eq, Value::string("A"), Value::string("A")),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            binary(BinaryOp::Lt, Value::string("abc"), Value::string("abd")),
            Ok(Value::Bool(true))
        );
        assert!(binary(BinaryOp::Sub, Value::string("a"), Value::string("b")).is_err());
    }

    #[test]
    fn mixed_types_only_compare_for_equality() {
        assert_eq!(
            binary(BinaryOp::Eq, Value::Null, Value::Int(0)),
            Ok(Value::Bool(false))
        );
        assert_eq!(
            binary(BinaryOp::NotEq, Value::Null, Value::Null),
            Ok(Value::Bool(false))
        );
        let err = binary(BinaryOp::Lt, Value::Null, Value::Int(1)).unwrap_err();
        assert_eq!(err.message, "operator `<` cannot be applied to null and int");
    }

    #[test]
    fn unary_operators() {
        assert_eq!(evaluate_unary(UnaryOp::Neg, &Value::Int(3)), Ok(Value::Int(-3)));
        assert_eq!(evaluate_unary(UnaryOp::Not, &Value::Bool(true)), Ok(Value::Bool(false)));
        assert_eq!(evaluate_unary(UnaryOp::Not, &Value::Int(0)), Ok(Value::Int(-1)));
        assert!(evaluate_unary(UnaryOp::Neg, &Value::string("x")).is_err());
    }
}
