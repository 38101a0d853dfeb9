//! Host objects, injected instances and the `System` library.

use brisk::{corelib, EvalErrorKind, OpKind, Runtime, Value};
use pretty_assertions::assert_eq;

use crate::common::{
    eval, eval_err, metrics_object, product_object, products, runtime, runtime_with,
    simple_metrics_model,
};

fn metrics_runtime() -> Runtime {
    runtime_with(metrics_object(simple_metrics_model()))
}

#[test]
fn injected_model_methods_are_bare_calls() {
    let rt = metrics_runtime();
    assert_eq!(eval(&rt, "GetSales()"), Value::Float(198.0));
    assert_eq!(eval(&rt, "GetVolume()"), Value::Float(122.0));
    assert_eq!(eval(&rt, "getsalesvolume()"), Value::Float(198.0 * 122.0));
}

#[test]
fn injected_model_compares_with_literals() {
    let rt = metrics_runtime();
    assert_eq!(eval(&rt, "MetricsModel.GetVolume() > 1.0"), Value::Bool(true));
    assert_eq!(eval(&rt, "1.0 < GetVolume()"), Value::Bool(true));
}

#[test]
fn bare_calls_convert_int_arguments() {
    let rt = metrics_runtime();
    assert_eq!(eval(&rt, "ProfitEq(31)"), Value::Bool(true));
    assert_eq!(eval(&rt, "ProfitEq(30.5)"), Value::Bool(false));
}

#[test]
fn unknown_bare_calls_fail_when_run() {
    let rt = metrics_runtime();
    assert!(matches!(
        eval_err(&rt, "GetMargin()"),
        EvalErrorKind::MissingMember { .. }
    ));
    assert_eq!(eval(&rt, "if (false) then GetMargin() end"), Value::Bool(false));
}

#[test]
fn repeated_bare_calls_reuse_one_rule() {
    let rt = metrics_runtime();
    let module = rt.create_namespace();
    let source = "var total = 0; var i = 0; loop { total = total + GetSales(); i = i + 1; if (i == 1000) { break } } total";
    assert_eq!(
        rt.execute_expr(source, &module).unwrap(),
        Value::Float(198_000.0)
    );
    let call = rt.cache_stats().table(OpKind::Call);
    assert_eq!(call.signatures, 1);
    assert_eq!(call.branches, 1);
}

#[test]
fn product_instance_methods() {
    let catalog = products();
    let first = &catalog[0];
    let rt = runtime_with(product_object(first));
    assert_eq!(eval(&rt, "LowerCaseName()"), Value::string("item1"));
    assert_eq!(eval(&rt, "Product.LowerCaseName()"), Value::string("item1"));
    assert_eq!(eval(&rt, "Top3Price()"), Value::Bool(false));
    assert_eq!(eval(&rt, "Top3Volume(1, 'volume')"), Value::Bool(false));

    let last = &catalog[9];
    let rt = runtime_with(product_object(last));
    assert_eq!(eval(&rt, "Top3Price()"), Value::Bool(true));
}

#[test]
fn if_then_programs_drive_host_output() {
    let cases = [
        (
            "
            if (2 == 1) then
                AddOutput('Two Equals one.')
            elseif (1 == 1) then
                AddOutput('One Equals one.')
            else
                AddOutput('Should not be hit.')
            endif
            ",
            0,
            "One Equals one.",
        ),
        (
            "
            if (1 == 2) then
                AddOutput('no');
            else
                AddOutput('yes');
            end
            ",
            0,
            "yes",
        ),
        (
            "
            if (1 == 1 and 2 > 1 and ((300 - 200) == 100)) then
                AddOutput('One Equals one.')

                if (2 > 1) then
                    AddOutput('Two is greater than one.')
                endif
            endif
            ",
            0,
            "One Equals one.Two is greater than one.",
        ),
        (
            "
            if (Top3Price()) then
                AddOutput('Top 3 price')

                if (2 > 1) then
                    AddOutput('Two is greater than one.')
                endif

                if (1 > 2) then
                    AddOutput('One is greater than two.')
                endif
            endif
            ",
            9,
            "Top 3 priceTwo is greater than one.",
        ),
        (
            "
            if (2 == 1) then
                AddOutput('One Equals one.')
            endif
            ",
            0,
            "",
        ),
    ];
    for (source, index, expected) in cases {
        let catalog = products();
        let product = &catalog[index];
        let rt = runtime_with(product_object(product));
        rt.execute_expr(source, &rt.create_namespace()).unwrap();
        assert_eq!(product.output(), expected, "script:{source}");
        assert_eq!(eval(&rt, "GetOutput()"), Value::string(expected));
    }
}

#[test]
fn instance_namespaces_list_methods_only() {
    let rt = metrics_runtime();
    let Some(Value::Namespace(ns)) = rt.globals().get("MetricsModel") else {
        panic!("instance namespace missing");
    };
    assert_eq!(
        ns.names(),
        vec![
            "GetProfit",
            "GetSales",
            "GetSalesVolume",
            "GetVolume",
            "ProfitEq",
        ]
    );
    assert!(matches!(
        eval_err(&rt, "MetricsModel.Profit"),
        EvalErrorKind::MissingMember { .. }
    ));
    assert_eq!(eval(&rt, "MetricsModel.profiteq(31.0)"), Value::Bool(true));
    // a bare call widens the int argument, a member call does not
    assert_eq!(eval(&rt, "profiteq(31)"), Value::Bool(true));
    assert!(matches!(
        eval_err(&rt, "MetricsModel.ProfitEq(31)"),
        EvalErrorKind::NoMatchingOverload { .. }
    ));
}

#[test]
fn instance_types_are_not_published_as_types() {
    let rt = metrics_runtime();
    assert!(rt.globals().get("Shop").is_none());
    assert!(rt.globals().get("MetricsModel").is_some());
}

#[test]
fn system_library_through_imports() {
    let rt = runtime();
    let source = "
        import System.Text.StringBuilder as Builder
        import System.Math

        var sb = new Builder('max=')
        sb.Append(Math.Max(3, 9)).Append(', pi>3: ').Append(Math.PI > 3)
        sb.ToString()
    ";
    assert_eq!(eval(&rt, source), Value::string("max=9, pi>3: true"));
}

#[test]
fn type_handles_answer_meta_questions() {
    let rt = Runtime::new([corelib::library()]);
    assert_eq!(
        eval(&rt, "System.Text.StringBuilder.FullName"),
        Value::string("System.Text.StringBuilder")
    );
    assert_eq!(
        eval(&rt, "System.Math.IsAssignableFrom(System.Math)"),
        Value::Bool(true)
    );
}

#[test]
fn constructor_mismatch_reports_the_type() {
    let rt = runtime();
    assert!(matches!(
        eval_err(&rt, "new System.Text.StringBuilder(1, 2)"),
        EvalErrorKind::NoMatchingConstructor { arity: 2, .. }
    ));
    assert!(matches!(
        eval_err(&rt, "var n = 3; new n()"),
        EvalErrorKind::NotAType { .. }
    ));
}
