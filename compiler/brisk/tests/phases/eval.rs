//! Whole programs through lowering and evaluation.

use brisk::{EvalErrorKind, Value};
use pretty_assertions::assert_eq;

use crate::common::{eval, eval_err, eval_in, runtime};

#[test]
fn section_of_arithmetic() {
    let rt = runtime();
    assert_eq!(eval(&rt, "100 + 2"), Value::Int(102));
    assert_eq!(eval(&rt, "100.1 + 100.2"), Value::Float(200.3));
    assert_eq!(eval(&rt, "1 + 13 * (18 * 16 / 4)"), Value::Int(937));
    assert_eq!(eval(&rt, "1 + 2 * (4 * 16 / 8) * 2 + 1"), Value::Int(34));
    assert_eq!(eval(&rt, "5 / 5"), Value::Int(1));
    assert_eq!(eval(&rt, "5 % 2"), Value::Int(1));
    assert_eq!(eval(&rt, "2.0 ^ 2.0"), Value::Float(4.0));
    assert_eq!(eval(&rt, "2.0 ** 3.0"), Value::Float(8.0));
    assert_eq!(eval(&rt, "-(2 + 3)"), Value::Int(-5));
}

#[test]
fn comparisons_and_equality() {
    let rt = runtime();
    assert_eq!(eval(&rt, "5 == 5"), Value::Bool(true));
    assert_eq!(eval(&rt, "5 eq 5"), Value::Bool(true));
    assert_eq!(eval(&rt, "3 > 4"), Value::Bool(false));
    assert_eq!(eval(&rt, "3 < 4"), Value::Bool(true));
    assert_eq!(eval(&rt, "3 <> 4"), Value::Bool(true));
    assert_eq!(eval(&rt, "'A' == 'A'"), Value::Bool(true));
    assert_eq!(eval(&rt, "'A' == 'a'"), Value::Bool(false));
    // mixed kinds only compare for (in)equality
    assert_eq!(eval(&rt, "'1' == true"), Value::Bool(false));
    assert_eq!(eval(&rt, "1 == 1.0"), Value::Bool(true));
}

#[test]
fn logical_keywords_evaluate_both_sides() {
    let rt = runtime();
    assert_eq!(
        eval(&rt, "1 == 1 and 2 > 1 and ((300 - 200) == 100)"),
        Value::Bool(true)
    );
    assert_eq!(eval(&rt, "1 == 2 or !(1 == 2)"), Value::Bool(true));
    assert_eq!(eval(&rt, "6 && 3"), Value::Int(2));
    assert_eq!(eval(&rt, "6 || 3"), Value::Int(7));
    // no short circuit: the right side still runs
    assert_eq!(
        eval(&rt, "var hits = 0; function hit() { hits = hits + 1; return true } false and hit(); hits"),
        Value::Int(1)
    );
}

#[test]
fn strings_absorb_other_scalars() {
    let rt = runtime();
    assert_eq!(eval(&rt, "'n=' + 1"), Value::string("n=1"));
    assert_eq!(eval(&rt, "1.5 + 'x'"), Value::string("1.5x"));
    assert_eq!(eval(&rt, "'ok? ' + true"), Value::string("ok? true"));
    assert!(matches!(
        eval_err(&rt, "'a' - 1"),
        EvalErrorKind::OperatorTypeMismatch { op: "-", .. }
    ));
}

#[test]
fn division_by_zero_is_an_error() {
    let rt = runtime();
    assert_eq!(eval_err(&rt, "1 / 0"), EvalErrorKind::DivisionByZero);
    assert_eq!(eval_err(&rt, "1 % 0"), EvalErrorKind::DivisionByZero);
}

#[test]
fn list_program_with_functions_and_lambdas() {
    let source = "
        import System.Console as console
        import System.Collections as collections

        // Prints output
        defun print(str) {
            console.WriteLine(str)
        }

        defun array() {
            new collections.List()
        }

        var x = array()
        x.add('xxx')
        x.add(2)
        x.add('abc')
        print(x[0])
        x[0] = 'yyy'

        var add2 = lambda(x, y) {
            return x + y
        }
        var sum = add2(3, 4)

        defun map(fn, a) {
            var i = 0
            loop {
                a[i] = fn(a[i])
                i = i + 1
                if (i == a.count) {
                    break
                }
            }
        }

        var a = array();
        a.add(1)
        a.add(2)
        a.add(3)
        map(lambda(x) { return x * 2 }, a);

        x[0] + ':' + sum + ':' + (a[0] + a[1] + a[2])
    ";
    assert_eq!(eval(&runtime(), source), Value::string("yyy:7:12"));
}

#[test]
fn break_value_leaves_the_loop() {
    let source = "
        defun find_first(a, wanted) {
            i = 0
            loop {
                if (a[i] == wanted) {
                    break(i)
                }
                i = i + 1
                if (i == a.Count) {
                    break(-1)
                }
            }
        }
        var a = new System.Collections.List()
        a.Add('x'); a.Add('y'); a.Add('z')
        find_first(a, 'z') * 10 + find_first(a, 'q')
    ";
    assert_eq!(eval(&runtime(), source), Value::Int(19));
}

#[test]
fn rerunning_a_loop_from_the_same_state_is_idempotent() {
    let rt = runtime();
    let module = rt.create_namespace();
    let source = "
        var n = 0
        loop {
            n = n + 3
            if (n >= 10) { break }
        }
        n
    ";
    assert_eq!(eval_in(&rt, source, &module), Value::Int(12));
    assert_eq!(eval_in(&rt, source, &module), Value::Int(12));
}

#[test]
fn functions_persist_in_the_module_namespace() {
    let rt = runtime();
    let module = rt.create_namespace();
    eval_in(&rt, "function twice(x) { x * 2 }", &module);
    assert!(module.contains("twice"));
    assert_eq!(eval_in(&rt, "twice(21)", &module), Value::Int(42));
    assert_eq!(eval_in(&rt, "TWICE(1)", &module), Value::Int(2));
}

#[test]
fn deep_recursion_grows_the_stack() {
    let source = "
        function sum(n) {
            if (n == 0) { return 0 }
            return n + sum(n - 1)
        }
        sum(2000)
    ";
    assert_eq!(eval(&runtime(), source), Value::Int(2_001_000));
}
