//! Tests for class resolution, member declaration and the entry point

use mocha_checker::{analyze_source, Analysis, CheckerConfig, ErrorKind, ScopeKind, SemanticError};

fn check(source: &str) -> Analysis {
    analyze_source(source, &CheckerConfig::library()).expect("source should parse")
}

fn kinds(analysis: &Analysis) -> Vec<ErrorKind> {
    analysis.diagnostics.iter().map(|e| e.kind()).collect()
}

#[test]
fn test_linear_hierarchy() {
    let source = r#"
        class A { int x; }
        class B extends A { }
        class C extends B { }
    "#;
    let analysis = check(source);
    assert!(!analysis.has_errors(), "unexpected errors: {:?}", analysis.diagnostics);

    let a = analysis.class("A").unwrap();
    let c = analysis.class("C").unwrap();
    assert!(analysis.symbols.inherits(c, a));
    let (a_ty, c_ty) = (analysis.symbols.symbol(a).ty, analysis.symbols.symbol(c).ty);
    assert!(analysis.types.is_subtype(c_ty, a_ty));
    assert!(!analysis.types.is_subtype(a_ty, c_ty));

    // Members of every ancestor are visible through the class scope chain
    assert!(analysis.member("C", "x").is_some());
}

#[test]
fn test_subclass_declared_before_parent() {
    let source = r#"
        class B extends A { int f() { return x; } }
        class A { int x; }
    "#;
    let analysis = check(source);
    assert!(!analysis.has_errors(), "unexpected errors: {:?}", analysis.diagnostics);
    assert_eq!(analysis.display_type(analysis.class("B").unwrap()), "class B");
}

#[test]
fn test_two_class_cycle_reported_once() {
    let source = r#"
        class A extends B { }
        class B extends A { }
    "#;
    let analysis = check(source);
    assert_eq!(kinds(&analysis), vec![ErrorKind::CyclicInheritance]);
    match &analysis.diagnostics.into_vec()[0] {
        SemanticError::CyclicInheritance { name, .. } => assert_eq!(name, "B"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_cycle_stops_member_resolution() {
    let source = r#"
        class A extends A { void f() { int x = true; } }
    "#;
    let analysis = check(source);
    assert_eq!(kinds(&analysis), vec![ErrorKind::CyclicInheritance]);
    assert!(analysis.class("A").is_none());
}

#[test]
fn test_tail_into_cycle_not_reported() {
    let source = r#"
        class D extends A { }
        class A extends B { }
        class B extends A { }
    "#;
    let analysis = check(source);
    assert_eq!(analysis.diagnostics.count(ErrorKind::CyclicInheritance), 1);
}

#[test]
fn test_duplicate_class_keeps_first() {
    let source = r#"
        class A { int x; }
        class A { bool y; }
    "#;
    let analysis = check(source);
    assert_eq!(kinds(&analysis), vec![ErrorKind::DeclarationConflict]);
    assert!(analysis.member("A", "x").is_some());
    assert!(analysis.member("A", "y").is_none());
}

#[test]
fn test_unknown_parent() {
    let analysis = check("class B extends Z { }");
    assert_eq!(kinds(&analysis), vec![ErrorKind::ClassNotFound]);

    let b = analysis.class("B").unwrap();
    assert_eq!(analysis.symbols.symbol(b).as_class().unwrap().parent, None);
}

#[test]
fn test_duplicate_member_keeps_first() {
    let source = r#"
        class A {
            int x;
            bool x;
        }
    "#;
    let analysis = check(source);
    assert_eq!(kinds(&analysis), vec![ErrorKind::DeclarationConflict]);
    let x = analysis.member("A", "x").unwrap();
    assert_eq!(analysis.display_type(x), "int");
}

#[test]
fn test_member_variable_cannot_be_redeclared_in_subclass() {
    let source = r#"
        class A { int x; }
        class B extends A { int x; }
    "#;
    let analysis = check(source);
    assert_eq!(kinds(&analysis), vec![ErrorKind::OverridingVariable]);
}

#[test]
fn test_method_and_variable_share_namespace() {
    let source = r#"
        class A {
            int f;
            int f() { return 1; }
        }
    "#;
    let analysis = check(source);
    assert_eq!(kinds(&analysis), vec![ErrorKind::DeclarationConflict]);
}

#[test]
fn test_override_with_covariant_return_and_contravariant_param() {
    let source = r#"
        class A { }
        class B extends A { }
        class P { class A make(class B b) { return b; } }
        class Q extends P { class B make(class A a) { return null; } }
    "#;
    let analysis = check(source);
    assert!(!analysis.has_errors(), "unexpected errors: {:?}", analysis.diagnostics);

    let make = analysis.member("Q", "make").unwrap();
    assert_eq!(analysis.display_type(make), "(class A) => class B");
}

#[test]
fn test_override_with_unrelated_param() {
    let source = r#"
        class P { int f(int x) { return x; } }
        class Q extends P { int f(bool x) { return 1; } }
    "#;
    let analysis = check(source);
    assert_eq!(kinds(&analysis), vec![ErrorKind::OverrideIncompatible]);
    match &analysis.diagnostics.into_vec()[0] {
        SemanticError::OverrideIncompatible { name, parent, .. } => {
            assert_eq!(name, "f");
            assert_eq!(parent, "P");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_static_method_cannot_override() {
    let source = r#"
        class P { int f() { return 1; } }
        class Q extends P { static int f() { return 2; } }
    "#;
    let analysis = check(source);
    assert_eq!(kinds(&analysis), vec![ErrorKind::DeclarationConflict]);
}

#[test]
fn test_missing_abstract_override() {
    let source = r#"
        abstract class Shape { abstract int area(); abstract int sides(); }
        class Square extends Shape { int sides() { return 4; } }
    "#;
    let analysis = check(source);
    assert_eq!(kinds(&analysis), vec![ErrorKind::MissingAbstractOverride]);
    match &analysis.diagnostics.into_vec()[0] {
        SemanticError::MissingAbstractOverride { class, methods, .. } => {
            assert_eq!(class, "Square");
            assert_eq!(methods, &vec!["area".to_string()]);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_abstract_methods_flow_through_abstract_classes() {
    let source = r#"
        abstract class Shape { abstract int area(); }
        abstract class Polygon extends Shape { }
        class Square extends Polygon { int area() { return 16; } }
    "#;
    let analysis = check(source);
    assert!(!analysis.has_errors(), "unexpected errors: {:?}", analysis.diagnostics);
}

#[test]
fn test_locals_shadow_members_but_not_each_other() {
    let source = r#"
        class A {
            int x;
            void f() {
                int x = 1;
                {
                    int x = 2;
                }
            }
        }
    "#;
    let analysis = check(source);
    assert_eq!(kinds(&analysis), vec![ErrorKind::DeclarationConflict]);
}

#[test]
fn test_parameter_conflict() {
    let analysis = check("class A { void f(int a, bool a) { } }");
    assert_eq!(kinds(&analysis), vec![ErrorKind::DeclarationConflict]);
}

#[test]
fn test_void_variables_rejected() {
    let source = r#"
        class A {
            void v;
            void f(void p) { void local; }
        }
    "#;
    let analysis = check(source);
    assert_eq!(analysis.diagnostics.count(ErrorKind::BadVariableType), 3);
    assert_eq!(analysis.diagnostics.len(), 3);
}

#[test]
fn test_bad_array_and_function_types() {
    let source = r#"
        class A {
            void[] a;
            int(void) f;
        }
    "#;
    let analysis = check(source);
    assert_eq!(
        kinds(&analysis),
        vec![ErrorKind::BadArrayElementType, ErrorKind::BadFunctionTypeArgument]
    );
}

#[test]
fn test_unknown_class_in_type() {
    let analysis = check("class A { class Missing m; }");
    assert_eq!(kinds(&analysis), vec![ErrorKind::ClassNotFound]);
    assert!(analysis.member("A", "m").is_none());
}

#[test]
fn test_entry_point_found() {
    let source = r#"
        class Main { static void main() { } }
    "#;
    let analysis = analyze_source(source, &CheckerConfig::default()).unwrap();
    assert!(!analysis.has_errors(), "unexpected errors: {:?}", analysis.diagnostics);

    let main = analysis.member("Main", "main").unwrap();
    assert_eq!(analysis.model.entry_point(), Some(main));
    assert!(analysis.symbols.symbol(main).as_method().unwrap().is_entry);
    let class = analysis.class("Main").unwrap();
    assert!(analysis.symbols.symbol(class).as_class().unwrap().is_entry);
}

#[test]
fn test_entry_point_signature_must_match() {
    let sources = [
        "class Other { static void main() { } }",
        "class Main { void main() { } }",
        "class Main { static int main() { return 0; } }",
        "class Main { static void main(int argc) { } }",
        "abstract class Main { static void main() { } }",
    ];
    for source in sources {
        let analysis = analyze_source(source, &CheckerConfig::default()).unwrap();
        assert_eq!(kinds(&analysis), vec![ErrorKind::MissingEntryPoint], "source: {}", source);
        assert_eq!(analysis.model.entry_point(), None);
    }
}

#[test]
fn test_dispatch_layout() {
    let source = r#"
        class A { int x; void f() { } void g() { } static void s() { } }
        class B extends A { int y; void g() { } void h() { } }
    "#;
    let analysis = check(source);
    assert!(!analysis.has_errors(), "unexpected errors: {:?}", analysis.diagnostics);

    let b = analysis.class("B").unwrap();
    let layout = analysis.model.layout(b).unwrap();
    let expected_methods = vec![
        analysis.member("A", "f").unwrap(),
        analysis.member("B", "g").unwrap(),
        analysis.member("B", "h").unwrap(),
    ];
    assert_eq!(layout.methods, expected_methods);
    assert_eq!(
        layout.fields,
        vec![analysis.member("A", "x").unwrap(), analysis.member("B", "y").unwrap()]
    );
    assert_eq!(layout.method_slot(&analysis.symbols, "g"), Some(1));
    assert_eq!(layout.method_slot(&analysis.symbols, "s"), None);
}

#[test]
fn test_scope_forest_shape() {
    let source = r#"
        class A {
            void f(int p) {
                int x = p;
                var g = fun (int y) => x + y;
            }
        }
    "#;
    let analysis = check(source);
    assert!(!analysis.has_errors(), "unexpected errors: {:?}", analysis.diagnostics);

    let f = analysis.member("A", "f").unwrap();
    let formal = analysis.symbols.symbol(f).as_method().unwrap().scope;
    let formal_scope = analysis.symbols.scope(formal);
    assert_eq!(formal_scope.kind, ScopeKind::Formal);
    assert_eq!(formal_scope.owner, Some(f));
    assert!(formal_scope.get("this").is_some());
    assert!(formal_scope.get("p").is_some());

    let body = formal_scope.children[0];
    let body_scope = analysis.symbols.scope(body);
    assert_eq!(body_scope.kind, ScopeKind::Local);
    let lambda = body_scope.children[0];
    assert_eq!(analysis.symbols.scope(lambda).kind, ScopeKind::Lambda);

    let closures = analysis.model.closures();
    assert_eq!(closures.len(), 1);
    let closure = analysis.symbols.symbol(closures[0]);
    assert!(closure.name.starts_with("lambda@"));
    assert_eq!(closure.domain, body);
    assert_eq!(closure.as_closure().unwrap().scope, lambda);
}
