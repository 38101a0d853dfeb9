#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::sync::Arc;

use brisk_value::{EvalErrorKind, HostType, ParamType, TypeLibrary};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::OpKind;

fn empty() -> Runtime {
    Runtime::new(Vec::<TypeLibrary>::new())
}

fn eval(rt: &Runtime, source: &str) -> Value {
    rt.execute_expr(source, &rt.create_namespace()).unwrap()
}

fn math_library() -> TypeLibrary {
    TypeLibrary::new("math").with(
        HostType::builder("System.Math")
            .static_method("Max", [ParamType::Int, ParamType::Int], |args| {
                Ok(Value::Int(
                    args[0].as_int().unwrap_or(0).max(args[1].as_int().unwrap_or(0)),
                ))
            })
            .build(),
    )
}

#[test]
fn arithmetic_follows_precedence() {
    let rt = empty();
    assert_eq!(eval(&rt, "100 + 2"), Value::Int(102));
    assert_eq!(eval(&rt, "100.1 + 100.2"), Value::Float(200.3));
    assert_eq!(eval(&rt, "1 + 13 * (18 * 16 / 4)"), Value::Int(937));
    assert_eq!(eval(&rt, "1 + 2 * (4 * 16 / 8) * 2 + 1"), Value::Int(34));
    assert_eq!(eval(&rt, "(1 + 1) + (3 * 5)"), Value::Int(17));
    assert_eq!(eval(&rt, "5 % 2"), Value::Int(1));
    assert_eq!(eval(&rt, "5 / 5"), Value::Int(1));
    assert_eq!(eval(&rt, "2.0 ^ 2.0"), Value::Float(4.0));
    assert_eq!(eval(&rt, "'A' == 'A'"), Value::Bool(true));
}

#[test]
fn expr_sees_the_supplied_namespace() {
    let rt = empty();
    let ns = rt.create_namespace();
    ns.set("Limit", Value::Int(10));
    assert_eq!(rt.execute_expr("limit * 2", &ns).unwrap(), Value::Int(20));
    rt.execute_expr("function twice(x) { x * 2 }", &ns).unwrap();
    assert_eq!(rt.execute_expr("twice(21)", &ns).unwrap(), Value::Int(42));
}

#[test]
fn host_types_are_reachable_from_globals() {
    let rt = Runtime::new([math_library()]);
    assert_eq!(eval(&rt, "System.Math.Max(3, 9)"), Value::Int(9));
    assert_eq!(eval(&rt, "import System.Math; Math.max(4, 2)"), Value::Int(4));
    assert_eq!(eval(&rt, "import System.Math as M; M.Name"), Value::string("Math"));
}

#[test]
fn runtimes_do_not_share_caches() {
    let a = Runtime::new([math_library()]);
    let b = Runtime::new([math_library()]);
    let source = "System.Math.Max(1, 2) + 1";
    assert_eq!(eval(&a, source), eval(&b, source));
    assert_eq!(eval(&a, source), Value::Int(3));
    assert_eq!(a.cache_stats(), b.cache_stats());
    eval(&a, "1.5 * 2.0");
    assert_ne!(a.cache_stats(), b.cache_stats());
}

#[test]
fn repeated_runs_reuse_rules() {
    let rt = empty();
    eval(&rt, "1 + 2");
    let first = rt.cache_stats();
    for _ in 0..10 {
        eval(&rt, "3 + 4");
    }
    let later = rt.cache_stats();
    assert_eq!(first.table(OpKind::Binary), later.table(OpKind::Binary));
    assert_eq!(later.table(OpKind::Binary).branches, 1);
}

#[test]
fn files_run_as_modules() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prices.brisk");
    fs::write(&path, "var base = 40\nfunction total(n) { base * n }\n").unwrap();

    let rt = empty();
    let module = rt.execute_file(&path).unwrap();
    assert!(module.contains("total"));
    let file = module.get("__file__").unwrap();
    assert!(file.as_str().unwrap().ends_with("prices.brisk"));

    let registered = rt.globals().get("prices").unwrap();
    assert!(registered.as_namespace().unwrap().ptr_eq(&module));
    assert_eq!(eval(&rt, "prices.total(2)"), Value::Int(80));

    rt.execute_file_as(&path, "pricing").unwrap();
    assert!(rt.globals().contains("pricing"));
}

#[test]
fn imports_fall_back_to_sibling_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("helpers.brisk"), "function double(x) { x * 2 }").unwrap();
    let main = dir.path().join("main.brisk");
    fs::write(&main, "import helpers\nresult = helpers.double(21)\n").unwrap();

    let rt = empty();
    let module = rt.create_namespace();
    let value = rt.execute_file_in_scope(&main, &module).unwrap();
    assert_eq!(value, Value::Int(42));
    assert!(module.get("helpers").unwrap().as_namespace().is_some());
    // loaded modules are registered in globals too
    assert!(rt.globals().contains("helpers"));
}

#[test]
fn script_extension_is_configurable() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("util.bk"), "function one() { 1 }").unwrap();
    let main = dir.path().join("main.bk");
    fs::write(&main, "import util as u\nu.one()").unwrap();

    let rt = Runtime::builder().script_extension(".bk").build();
    let value = rt.execute_file_in_scope(&main, &rt.create_namespace()).unwrap();
    assert_eq!(value, Value::Int(1));
}

#[test]
fn missing_imports_fail() {
    let rt = empty();
    let err = rt
        .execute_expr("import nowhere", &rt.create_namespace())
        .unwrap_err();
    match err {
        ScriptError::Eval(err) => {
            assert!(matches!(err.kind, EvalErrorKind::ImportNotFound { .. }));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn nested_load_errors_become_runtime_errors() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.brisk"), "var = ").unwrap();
    let main = dir.path().join("main.brisk");
    fs::write(&main, "import broken").unwrap();
    let rt = empty();
    let err = rt
        .execute_file_in_scope(&main, &rt.create_namespace())
        .unwrap_err();
    match err {
        ScriptError::Eval(err) => assert!(matches!(err.kind, EvalErrorKind::Host { .. })),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn failed_modules_are_not_left_in_globals() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.brisk"), "ready = 1\nundefinedThing()").unwrap();
    let main = dir.path().join("main.brisk");
    fs::write(&main, "import broken").unwrap();

    let rt = empty();
    for _ in 0..2 {
        match rt.execute_file(&main).unwrap_err() {
            ScriptError::Eval(err) => {
                assert!(matches!(err.kind, EvalErrorKind::MissingMember { .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
    assert!(rt.globals().names().is_empty());
}

#[test]
fn a_failed_rerun_restores_the_previous_module() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.brisk");
    fs::write(&path, "function ok() { true }").unwrap();
    let rt = empty();
    let first = rt.execute_file(&path).unwrap();

    fs::write(&path, "1 / 0").unwrap();
    assert!(rt.execute_file(&path).is_err());
    let Some(Value::Namespace(current)) = rt.globals().get("config") else {
        panic!("config was dropped from globals");
    };
    assert!(current.ptr_eq(&first));
}

#[test]
fn unreadable_files_report_io_errors() {
    let rt = empty();
    let err = rt.execute_file("/definitely/not/here.brisk").unwrap_err();
    match err {
        ScriptError::Eval(err) => assert!(matches!(err.kind, EvalErrorKind::Io { .. })),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn functions_outliving_their_runtime_fail_cleanly() {
    let rt = empty();
    let f = eval(&rt, "lambda() { return 1 }");
    let Value::Function(f) = f else {
        panic!("expected a function");
    };
    assert_eq!(f.call(&[]).unwrap(), Value::Int(1));
    drop(rt);
    assert_eq!(f.call(&[]).unwrap_err().kind, EvalErrorKind::RuntimeDropped);
}

#[test]
fn runtimes_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Runtime>();

    let rt = Arc::new(Runtime::new([math_library()]));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rt = Arc::clone(&rt);
            std::thread::spawn(move || {
                let ns = rt.create_namespace();
                rt.execute_expr(&format!("System.Math.Max({i}, 2) * 10"), &ns)
                    .unwrap()
            })
        })
        .collect();
    let results: Vec<Value> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        results,
        vec![Value::Int(20), Value::Int(20), Value::Int(20), Value::Int(30)]
    );
}

proptest! {
    #[test]
    fn multiplication_binds_tighter(a in -1000i64..1000, b in -1000i64..1000, c in -1000i64..1000) {
        let rt = empty();
        let sum = eval(&rt, &format!("{a} + {b} * {c}"));
        prop_assert_eq!(sum, Value::Int(a + b * c));
        let grouped = eval(&rt, &format!("({a} + {b}) * {c}"));
        prop_assert_eq!(grouped, Value::Int((a + b) * c));
    }

    #[test]
    fn comparisons_agree_with_ints(a in any::<i32>(), b in any::<i32>()) {
        let rt = empty();
        let (a, b) = (i64::from(a), i64::from(b));
        prop_assert_eq!(eval(&rt, &format!("{a} < {b}")), Value::Bool(a < b));
        prop_assert_eq!(eval(&rt, &format!("{a} >= {b}")), Value::Bool(a >= b));
        prop_assert_eq!(eval(&rt, &format!("{a} <> {b}")), Value::Bool(a != b));
    }
}
