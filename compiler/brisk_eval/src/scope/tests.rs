use pretty_assertions::assert_eq;

use super::*;

fn params(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn names_are_case_insensitive() {
    let module = Scope::module("main");
    let x = module.declare_local("Total");
    assert_eq!(module.lookup("total"), Some(x));
    assert_eq!(module.lookup("TOTAL"), Some(x));
    assert_eq!(module.declare_local("total"), x);
    assert_eq!(module.frame_size(), 1);
}

#[test]
fn params_take_first_slots() {
    let module = Scope::module("main");
    let f = Scope::function(&module, "f", &params(&["a", "B"]));
    assert_eq!(f.lookup("a"), Some(VarRef { depth: 0, index: 0 }));
    assert_eq!(f.lookup("b"), Some(VarRef { depth: 0, index: 1 }));
    assert_eq!(f.declare_local("c"), VarRef { depth: 0, index: 2 });
    assert_eq!(f.frame_size(), 3);
}

#[test]
fn outer_names_are_one_frame_up() {
    let module = Scope::module("main");
    module.declare_local("unused");
    let g = module.declare_local("g");
    let f = Scope::function(&module, "f", &params(&["x"]));
    assert_eq!(f.lookup("g"), Some(VarRef { depth: 1, index: g.index }));
}

#[test]
fn loops_share_the_owner_frame() {
    let module = Scope::module("main");
    module.declare_local("a");
    let body = Scope::loop_body(&module, LabelId(0));
    let b = body.declare_local("b");
    assert_eq!(b, VarRef { depth: 0, index: 1 });
    assert_eq!(module.frame_size(), 2);
    // loop locals are invisible to the enclosing scope
    assert!(module.lookup("b").is_none());
    assert_eq!(body.lookup("a"), Some(VarRef { depth: 0, index: 0 }));
}

#[test]
fn var_shadows_outer_name() {
    let module = Scope::module("main");
    let outer = module.declare_local("x");
    let body = Scope::loop_body(&module, LabelId(0));
    let inner = body.declare_local("x");
    assert_ne!(outer.index, inner.index);
    assert_eq!(body.lookup("x"), Some(inner));
}

#[test]
fn globals_land_on_the_module_root() {
    let module = Scope::module("main");
    let f = Scope::function(&module, "f", &[]);
    let body = Scope::loop_body(&f, LabelId(3));
    let g = body.declare_global("counter");
    assert_eq!(g.depth, 1);
    assert_eq!(module.lookup("counter"), Some(VarRef { depth: 0, index: g.index }));
    assert!(f.lookup("missing").is_none());
}

#[test]
fn break_target_stops_at_functions() {
    let module = Scope::module("main");
    assert_eq!(module.enclosing_loop(), None);
    let outer = Scope::loop_body(&module, LabelId(1));
    let inner = Scope::loop_body(&outer, LabelId(2));
    assert_eq!(inner.enclosing_loop(), Some(LabelId(2)));
    let lambda = Scope::function(&inner, "lambda", &[]);
    assert_eq!(lambda.enclosing_loop(), None);
}

#[test]
fn return_label_is_allocated_once() {
    let module = Scope::module("main");
    assert!(module.enclosing_function().is_none());
    let f = Scope::function(&module, "f", &[]);
    let body = Scope::loop_body(&f, LabelId(0));
    let owner = body.enclosing_function().map(Scope::name);
    assert_eq!(owner, Some("f"));
    assert_eq!(f.return_label(), None);
    assert_eq!(f.return_label_or(|| LabelId(7)), LabelId(7));
    assert_eq!(f.return_label_or(|| LabelId(8)), LabelId(7));
    assert_eq!(f.return_label(), Some(LabelId(7)));
}

#[test]
fn only_the_root_is_a_module() {
    let module = Scope::module("main");
    let body = Scope::loop_body(&module, LabelId(0));
    assert!(module.is_module());
    assert!(!body.is_module());
    assert_eq!(module.name(), "main");
}
