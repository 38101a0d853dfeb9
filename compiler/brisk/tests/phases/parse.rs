//! Tree shape of whole programs and syntax errors.

use brisk::{parse, NodeKind, ParseErrorKind, Position, ScriptError, SyntaxError, TokenKind};
use pretty_assertions::assert_eq;

use crate::common::{product_object, products, runtime_with};

/// The statement kinds of a unit, by variant name.
fn outline(source: &str) -> Vec<&'static str> {
    let NodeKind::Block(statements) = parse(source).unwrap().kind else {
        panic!("a unit parses to a block");
    };
    statements
        .iter()
        .map(|node| match node.kind {
            NodeKind::Var { .. } => "var",
            NodeKind::FunctionDef { .. } => "function",
            NodeKind::If { .. } => "if",
            NodeKind::Loop { .. } => "loop",
            NodeKind::Import { .. } => "import",
            NodeKind::Return { .. } => "return",
            NodeKind::Break { .. } => "break",
            NodeKind::ExprStmt(_) => "expr",
            NodeKind::Null => "null",
            _ => "other",
        })
        .collect()
}

#[test]
fn a_complete_program_outline() {
    let source = "
        import System.Console as console

        // prints a line
        defun print(str) {
            console.WriteLine(str)
        }

        var total = 0;
        ;
        loop {
            total = total + 1
            if (total > 3) { break }
        }
        if (total == 4) then
            print('done')
        endif
        total
    ";
    assert_eq!(
        outline(source),
        vec!["import", "function", "var", "null", "loop", "if", "expr"]
    );
}

#[test]
fn import_paths_and_aliases() {
    let NodeKind::Block(statements) = parse("import System.Text.StringBuilder as sb").unwrap().kind
    else {
        panic!("a unit parses to a block");
    };
    match &statements[0].kind {
        NodeKind::Import { path, alias } => {
            assert_eq!(path, &["System", "Text", "StringBuilder"]);
            assert_eq!(alias.as_deref(), Some("sb"));
        }
        other => panic!("expected an import, got {other:?}"),
    }
}

#[test]
fn syntax_errors_report_the_offending_token() {
    let err = parse("var x = (1 + 2\nx").unwrap_err();
    let SyntaxError::Parse(err) = err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert_eq!(err.position, Position::new(2, 1));
    assert!(matches!(
        err.kind,
        ParseErrorKind::UnexpectedToken {
            found: TokenKind::Ident,
            ..
        }
    ));
}

#[test]
fn reserved_operators_are_parse_errors() {
    assert!(matches!(parse("a = 1 ? 2 : 3"), Err(SyntaxError::Parse(_))));
    assert!(matches!(parse("a << 2"), Err(SyntaxError::Parse(_))));
}

#[test]
fn out_of_range_integer_literal() {
    let err = parse("99999999999999999999").unwrap_err();
    assert!(matches!(
        err,
        SyntaxError::Parse(ref e) if matches!(e.kind, ParseErrorKind::InvalidLiteral { .. })
    ));
}

#[test]
fn a_syntax_error_anywhere_runs_nothing() {
    let catalog = products();
    let product = &catalog[0];
    let rt = runtime_with(product_object(product));
    let result = rt.execute_expr("AddOutput('ran')\nif (1 == 1) then", &rt.create_namespace());
    assert!(matches!(result, Err(ScriptError::Parse(_))));
    assert_eq!(product.output(), "");
}
