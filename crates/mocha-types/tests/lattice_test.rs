//! Algebraic properties of the subtype lattice over a small type universe

use mocha_types::{TypeContext, TypeId};

/// C <- B <- A, C <- D, unrelated X, plus arrays and functions over them
fn universe() -> (TypeContext, Vec<TypeId>) {
    let mut ctx = TypeContext::new();
    let c = ctx.class_type("C", None);
    let b = ctx.class_type("B", Some(c));
    let a = ctx.class_type("A", Some(b));
    let d = ctx.class_type("D", Some(c));
    let x = ctx.class_type("X", None);
    let int_arr = ctx.array_type(TypeId::INT).unwrap();
    let a_arr = ctx.array_type(a).unwrap();
    let f_ca = ctx.function_type(vec![c], a).unwrap();
    let f_ac = ctx.function_type(vec![a], c).unwrap();
    let f_bb = ctx.function_type(vec![b], b).unwrap();
    let thunk = ctx.function_type(vec![], TypeId::INT).unwrap();

    let types = vec![
        TypeId::INT,
        TypeId::BOOL,
        TypeId::STRING,
        TypeId::VOID,
        TypeId::NULL,
        TypeId::ERROR,
        a,
        b,
        c,
        d,
        x,
        int_arr,
        a_arr,
        f_ca,
        f_ac,
        f_bb,
        thunk,
    ];
    (ctx, types)
}

#[test]
fn subtyping_is_reflexive() {
    let (ctx, types) = universe();
    for &t in &types {
        assert!(ctx.is_subtype(t, t), "{} <: {}", ctx.display(t), ctx.display(t));
    }
}

#[test]
fn subtyping_is_transitive() {
    let (ctx, types) = universe();
    let proper: Vec<TypeId> = types.iter().copied().filter(|&t| t != TypeId::ERROR).collect();
    for &t1 in &proper {
        for &t2 in &proper {
            for &t3 in &proper {
                if ctx.is_subtype(t1, t2) && ctx.is_subtype(t2, t3) {
                    assert!(
                        ctx.is_subtype(t1, t3),
                        "{} <: {} <: {}",
                        ctx.display(t1),
                        ctx.display(t2),
                        ctx.display(t3)
                    );
                }
            }
        }
    }
}

#[test]
fn error_is_sub_and_super_of_everything() {
    let (ctx, types) = universe();
    for &t in &types {
        assert!(ctx.is_subtype(TypeId::ERROR, t));
        assert!(ctx.is_subtype(t, TypeId::ERROR));
    }
}

#[test]
fn null_is_subtype_of_every_class() {
    let (ctx, types) = universe();
    for &t in &types {
        if ctx.is_class(t) {
            assert!(ctx.is_subtype(TypeId::NULL, t));
        }
    }
}

#[test]
fn join_and_meet_are_commutative() {
    let (mut ctx, types) = universe();
    for &a in &types {
        for &b in &types {
            if ctx.has_error(a) || ctx.has_error(b) {
                continue;
            }
            let ab = ctx.join(a, b);
            let ba = ctx.join(b, a);
            assert_eq!(ab, ba, "join {} {}", ctx.display(a), ctx.display(b));
            let ab = ctx.meet(a, b);
            let ba = ctx.meet(b, a);
            assert_eq!(ab, ba, "meet {} {}", ctx.display(a), ctx.display(b));
        }
    }
}

#[test]
fn join_is_idempotent_under_absorption() {
    let (mut ctx, types) = universe();
    for &a in &types {
        for &b in &types {
            let ab = ctx.join(a, b);
            if ab == TypeId::CONFLICT {
                continue;
            }
            assert_eq!(ctx.join(a, ab), ab, "join {} {}", ctx.display(a), ctx.display(b));
        }
    }
}

#[test]
fn join_is_an_upper_bound() {
    let (mut ctx, types) = universe();
    for &a in &types {
        for &b in &types {
            let j = ctx.join(a, b);
            if j == TypeId::CONFLICT {
                continue;
            }
            assert!(ctx.is_subtype(a, j));
            assert!(ctx.is_subtype(b, j));
        }
    }
}
#[test]
fn meet_is_a_lower_bound() {
    let (mut ctx, types) = universe();
    for &a in &types {
        for &b in &types {
            let m = ctx.meet(a, b);
            if m == TypeId::CONFLICT {
                continue;
            }
            assert!(ctx.is_subtype(m, a));
            assert!(ctx.is_subtype(m, b));
        }
    }
}
