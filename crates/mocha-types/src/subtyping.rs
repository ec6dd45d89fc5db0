//! Subtyping rules for the Mocha type system
//!
//! Implements the subtyping relation T <: U (T is a subtype of U).

use crate::context::TypeContext;
use crate::ty::{Type, TypeId};

/// Context for checking subtyping relationships
#[derive(Debug, Clone, Copy)]
pub struct SubtypingContext<'a> {
    /// Type context for resolving types
    type_ctx: &'a TypeContext,
}

impl<'a> SubtypingContext<'a> {
    /// Create a new subtyping context
    pub fn new(type_ctx: &'a TypeContext) -> Self {
        SubtypingContext { type_ctx }
    }

    /// Check if `sub` is a subtype of `sup` (sub <: sup)
    ///
    /// Returns true if a value of type `sub` can be used where `sup` is expected.
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        // Reflexivity: T <: T
        if sub == sup {
            return true;
        }

        // Error is absorbing in both directions
        if sub == TypeId::ERROR || sup == TypeId::ERROR {
            return true;
        }

        let (Some(sub_ty), Some(sup_ty)) = (self.type_ctx.get(sub), self.type_ctx.get(sup)) else {
            return false;
        };

        match (sub_ty, sup_ty) {
            // null <: every class
            (Type::Null, Type::Class(_)) => true,

            // Nominal: walk the superclass chain
            (Type::Class(_), Type::Class(_)) => self.inherits_from(sub, sup),

            // Arrays are invariant
            (Type::Array(a), Type::Array(b)) => self.type_ctx.eq(a.element, b.element),

            // (P1..Pn) => R <: (Q1..Qn) => S iff R <: S and Qi <: Pi
            (Type::Function(f1), Type::Function(f2)) => {
                if f1.params.len() != f2.params.len() {
                    return false;
                }

                if !self.is_subtype(f1.return_type, f2.return_type) {
                    return false;
                }

                f1.params
                    .iter()
                    .zip(f2.params.iter())
                    .all(|(&p, &q)| self.is_subtype(q, p))
            }

            _ => false,
        }
    }

    /// True if class `sub` is `sup` or has it as a (transitive) superclass
    fn inherits_from(&self, sub: TypeId, sup: TypeId) -> bool {
        let mut current = Some(sub);
        while let Some(id) = current {
            if id == sup {
                return true;
            }
            current = self.type_ctx.class(id).and_then(|c| c.superclass);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflexivity() {
        let ctx = TypeContext::new();
        let sub = SubtypingContext::new(&ctx);
        assert!(sub.is_subtype(TypeId::INT, TypeId::INT));
        assert!(sub.is_subtype(TypeId::CONFLICT, TypeId::CONFLICT));
        assert!(sub.is_subtype(TypeId::NULL, TypeId::NULL));
    }

    #[test]
    fn test_primitive_subtyping() {
        let ctx = TypeContext::new();
        let sub = SubtypingContext::new(&ctx);
        assert!(!sub.is_subtype(TypeId::INT, TypeId::BOOL));
        assert!(!sub.is_subtype(TypeId::STRING, TypeId::INT));
        assert!(!sub.is_subtype(TypeId::NULL, TypeId::STRING));
    }

    #[test]
    fn test_error_is_top_and_bottom() {
        let mut ctx = TypeContext::new();
        let a = ctx.class_type("A", None);
        let sub = SubtypingContext::new(&ctx);
        for ty in [TypeId::INT, TypeId::VOID, TypeId::NULL, TypeId::CONFLICT, a] {
            assert!(sub.is_subtype(TypeId::ERROR, ty));
            assert!(sub.is_subtype(ty, TypeId::ERROR));
        }
    }

    #[test]
    fn test_class_chain() {
        let mut ctx = TypeContext::new();
        let c = ctx.class_type("C", None);
        let b = ctx.class_type("B", Some(c));
        let a = ctx.class_type("A", Some(b));
        let sub = SubtypingContext::new(&ctx);
        assert!(sub.is_subtype(a, b));
        assert!(sub.is_subtype(a, c));
        assert!(!sub.is_subtype(c, a));
        assert!(sub.is_subtype(TypeId::NULL, a));
        assert!(!sub.is_subtype(a, TypeId::NULL));
    }

    #[test]
    fn test_array_invariance() {
        let mut ctx = TypeContext::new();
        let c = ctx.class_type("C", None);
        let b = ctx.class_type("B", Some(c));
        let b_arr = ctx.array_type(b).unwrap();
        let c_arr = ctx.array_type(c).unwrap();
        let sub = SubtypingContext::new(&ctx);
        assert!(!sub.is_subtype(b_arr, c_arr));
        assert!(!sub.is_subtype(c_arr, b_arr));
    }

    #[test]
    fn test_function_subtyping_contravariance() {
        let mut ctx = TypeContext::new();
        let c = ctx.class_type("C", None);
        let b = ctx.class_type("B", Some(c));
        // (C) => B <: (B) => C
        let narrow = ctx.function_type(vec![c], b).unwrap();
        let wide = ctx.function_type(vec![b], c).unwrap();
        let sub = SubtypingContext::new(&ctx);
        assert!(sub.is_subtype(narrow, wide));
        assert!(!sub.is_subtype(wide, narrow));
    }

    #[test]
    fn test_function_arity_mismatch() {
        let mut ctx = TypeContext::new();
        let one = ctx.function_type(vec![TypeId::INT], TypeId::INT).unwrap();
        let two = ctx.function_type(vec![TypeId::INT, TypeId::INT], TypeId::INT).unwrap();
        let sub = SubtypingContext::new(&ctx);
        assert!(!sub.is_subtype(one, two));
        assert!(!sub.is_subtype(two, one));
    }
}
