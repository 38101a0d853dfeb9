//! Files, imports, cache isolation, error rendering and the CLI commands.

use std::fs;
use std::thread;

use brisk::commands::{eval_source, lex_file, parse_file, run_file, FAILURE};
use brisk::{init_tracing, render_error, OpKind, Position, Runtime, ScriptError, Value};
use pretty_assertions::assert_eq;

use crate::common::{eval, metrics_object, runtime, runtime_with, simple_metrics_model};

#[test]
fn a_project_of_files_shares_the_system_library() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("geometry.brisk"),
        "
        import System.Math
        function hypot(a, b) { return Math.Sqrt(a * a + b * b) }
        function area(r) { Math.PI * r * r }
        ",
    )
    .unwrap();
    let main = dir.path().join("main.brisk");
    fs::write(&main, "import geometry\ngeometry.hypot(3.0, 4.0)").unwrap();

    let rt = runtime();
    let module = rt.create_namespace();
    assert_eq!(
        rt.execute_file_in_scope(&main, &module).unwrap(),
        Value::Float(5.0)
    );
    // the imported file was registered under its base name
    let Some(Value::Namespace(geometry)) = rt.globals().get("geometry") else {
        panic!("geometry was not registered in globals");
    };
    assert!(geometry.contains("area"));
    assert!(module.get("__file__").is_some());
}

#[test]
fn execute_file_returns_the_module_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rates.brisk");
    fs::write(&path, "function rate() { 0.25 }").unwrap();

    let rt = runtime();
    let module = rt.execute_file(&path).unwrap();
    assert!(module.contains("rate"));
    assert_eq!(eval(&rt, "rates.rate() * 4"), Value::Float(1.0));
}

#[test]
fn two_runtimes_agree_without_sharing_caches() {
    let source = "
        function score(x) { return x * 3 + GetSales() }
        score(2) > 200
    ";
    let first = runtime_with(metrics_object(simple_metrics_model()));
    let second = runtime_with(metrics_object(simple_metrics_model()));

    assert_eq!(eval(&first, source), Value::Bool(true));
    let after_first = first.cache_stats();
    assert_eq!(second.cache_stats().total_signatures(), 0);

    assert_eq!(eval(&second, source), Value::Bool(true));
    assert_eq!(second.cache_stats(), after_first);
    assert_eq!(after_first.table(OpKind::Call).signatures, 2);
}

#[test]
fn runtimes_can_be_shared_across_threads() {
    let rt = runtime_with(metrics_object(simple_metrics_model()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rt = rt.clone();
            thread::spawn(move || {
                let source = format!("GetVolume() + {i}");
                rt.execute_expr(&source, &rt.create_namespace()).unwrap()
            })
        })
        .collect();
    let mut results: Vec<f64> = handles
        .into_iter()
        .map(|h| h.join().unwrap().as_float().unwrap())
        .collect();
    results.sort_by(f64::total_cmp);
    assert_eq!(results, vec![122.0, 123.0, 124.0, 125.0]);
    assert_eq!(rt.cache_stats().table(OpKind::Call).branches, 1);
}

#[test]
fn rendered_errors_point_into_the_source() {
    let rt = runtime();
    let source = "var x = 1\nx / 0";
    let err = rt.execute_expr(source, &rt.create_namespace()).unwrap_err();
    assert_eq!(err.position(), Some(Position::new(2, 1)));

    let report = render_error("calc.brisk", source, &err);
    assert!(report.contains("runtime error: division by zero"), "{report}");
    assert!(report.contains("calc.brisk"), "{report}");

    let source = "var y = (1 +";
    let err = rt.execute_expr(source, &rt.create_namespace()).unwrap_err();
    assert!(matches!(err, ScriptError::Parse(_)));
    let report = render_error("broken.brisk", source, &err);
    assert!(report.contains("syntax error"), "{report}");
}

#[test]
fn cli_commands_report_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.brisk");
    fs::write(&good, "var total = System.Math.Max(1, 2)\ntotal").unwrap();
    let bad = dir.path().join("bad.brisk");
    fs::write(&bad, "Missing.Thing()").unwrap();
    let good = good.to_str().unwrap();
    let bad = bad.to_str().unwrap();

    assert_eq!(run_file(good), 0);
    assert_eq!(run_file(bad), FAILURE);
    assert_eq!(lex_file(good), 0);
    assert_eq!(parse_file(good), 0);
    assert_eq!(eval_source("1 + 1"), 0);
    assert_eq!(eval_source("1 +"), FAILURE);
    assert_eq!(run_file(dir.path().join("absent.brisk").to_str().unwrap()), FAILURE);
}

#[test]
fn tracing_setup_is_idempotent() {
    init_tracing();
    init_tracing();
    assert_eq!(eval(&Runtime::builder().build(), "2 * 21"), Value::Int(42));
}
