use mocha_parser::ast::*;
use mocha_parser::{parse_program, ParseErrorKind, Span};

#[test]
fn test_empty_program() {
    let program = parse_program("").unwrap();
    assert!(program.classes.is_empty());
    assert_eq!(program.node_count, 0);
}

#[test]
fn test_class_with_parent_and_members() {
    let source = r#"
        abstract class Shape extends Base {
            int sides;
            abstract int area();
            static void describe(int x, class Shape s) { }
        }
    "#;
    let program = parse_program(source).unwrap();
    let class = &program.classes[0];
    assert!(class.is_abstract);
    assert_eq!(class.name.name, "Shape");
    assert_eq!(class.parent.as_ref().unwrap().name, "Base");
    assert_eq!(class.members.len(), 3);

    assert!(matches!(class.members[0], Member::Var(_)));
    let Member::Method(area) = &class.members[1] else { panic!("expected method") };
    assert!(area.is_abstract());
    assert!(area.body.is_none());
    let Member::Method(describe) = &class.members[2] else { panic!("expected method") };
    assert!(describe.is_static());
    assert_eq!(describe.params.len(), 2);
    assert!(matches!(describe.params[1].type_ann.kind, TypeKind::Class(_)));
}

#[test]
fn test_node_ids_are_unique() {
    let source = "class A { int x; int f(int y) { return x + y; } } class B extends A { }";
    let program = parse_program(source).unwrap();
    let a = &program.classes[0];
    let b = &program.classes[1];
    assert_ne!(a.id, b.id);
    assert_ne!(a.members[0].id(), a.members[1].id());
    assert!(a.id.0 < program.node_count && b.id.0 < program.node_count);
}

#[test]
fn test_spans_order_by_position() {
    let program = parse_program("class A {}\nclass B {}").unwrap();
    let a: Span = program.classes[0].span;
    let b: Span = program.classes[1].span;
    assert!(a < b);
    assert_eq!(b.line, 2);
    assert_eq!(b.column, 1);
}

#[test]
fn test_static_member_variable_rejected() {
    let errors = parse_program("class A { static int x; }").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, ParseErrorKind::InvalidSyntax { .. }));
}

#[test]
fn test_recovers_at_next_class() {
    let errors = parse_program("class { } class B { }").unwrap_err();
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_lex_errors_surface_as_parse_errors() {
    let errors = parse_program("class A { int x = #; }").unwrap_err();
    assert!(matches!(errors[0].kind, ParseErrorKind::Lex(_)));
}
