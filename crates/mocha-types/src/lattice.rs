//! Join and meet over the subtype lattice
//!
//! Both operations are total: when two types have no common bound the result
//! is [`TypeId::CONFLICT`], which callers report at the point of use.

use crate::context::TypeContext;
use crate::subtyping::SubtypingContext;
use crate::ty::{FunctionType, Type, TypeId};

impl TypeContext {
    /// `sub <: sup`
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        SubtypingContext::new(self).is_subtype(sub, sup)
    }

    /// Least upper bound of two types
    pub fn join(&mut self, a: TypeId, b: TypeId) -> TypeId {
        if self.has_error(a) {
            return b;
        }
        if self.has_error(b) {
            return a;
        }
        if self.is_subtype(a, b) {
            return b;
        }
        if self.is_subtype(b, a) {
            return a;
        }

        if self.is_class(a) && self.is_class(b) {
            let mut current = self.class(b).and_then(|c| c.superclass);
            while let Some(ancestor) = current {
                if self.is_subtype(a, ancestor) {
                    return ancestor;
                }
                current = self.class(ancestor).and_then(|c| c.superclass);
            }
            return TypeId::CONFLICT;
        }

        self.combine_functions(a, b, Bound::Upper)
    }

    /// Greatest lower bound of two types
    pub fn meet(&mut self, a: TypeId, b: TypeId) -> TypeId {
        if self.has_error(a) {
            return b;
        }
        if self.has_error(b) {
            return a;
        }
        if self.is_subtype(a, b) {
            return a;
        }
        if self.is_subtype(b, a) {
            return b;
        }

        self.combine_functions(a, b, Bound::Lower)
    }

    /// Join/meet of two function types: the return type follows `bound`,
    /// the parameters take the dual bound.
    fn combine_functions(&mut self, a: TypeId, b: TypeId, bound: Bound) -> TypeId {
        let (f1, f2) = match (self.function(a), self.function(b)) {
            (Some(f1), Some(f2)) if f1.arity() == f2.arity() => (f1.clone(), f2.clone()),
            _ => return TypeId::CONFLICT,
        };

        let return_type = self.bound(f1.return_type, f2.return_type, bound);
        if return_type == TypeId::CONFLICT {
            return TypeId::CONFLICT;
        }

        let mut params = Vec::with_capacity(f1.arity());
        for (&p, &q) in f1.params.iter().zip(f2.params.iter()) {
            let param = self.bound(p, q, bound.dual());
            if param == TypeId::CONFLICT {
                return TypeId::CONFLICT;
            }
            params.push(param);
        }

        self.intern(Type::Function(FunctionType { params, return_type }))
    }

    fn bound(&mut self, a: TypeId, b: TypeId, bound: Bound) -> TypeId {
        match bound {
            Bound::Upper => self.join(a, b),
            Bound::Lower => self.meet(a, b),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Upper,
    Lower,
}

impl Bound {
    fn dual(self) -> Bound {
        match self {
            Bound::Upper => Bound::Lower,
            Bound::Lower => Bound::Upper,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hierarchy() -> (TypeContext, TypeId, TypeId, TypeId, TypeId) {
        // C <- B <- A, C <- D
        let mut ctx = TypeContext::new();
        let c = ctx.class_type("C", None);
        let b = ctx.class_type("B", Some(c));
        let a = ctx.class_type("A", Some(b));
        let d = ctx.class_type("D", Some(c));
        (ctx, a, b, c, d)
    }

    #[test]
    fn test_join_classes() {
        let (mut ctx, a, b, c, d) = hierarchy();
        assert_eq!(ctx.join(a, b), b);
        assert_eq!(ctx.join(b, a), b);
        assert_eq!(ctx.join(a, d), c);
        assert_eq!(ctx.join(d, a), c);
        assert_eq!(ctx.join(TypeId::NULL, a), a);
    }

    #[test]
    fn test_meet_classes() {
        let (mut ctx, a, b, _, d) = hierarchy();
        assert_eq!(ctx.meet(a, b), a);
        assert_eq!(ctx.meet(a, d), TypeId::CONFLICT);
        assert_eq!(ctx.meet(TypeId::NULL, b), TypeId::NULL);
    }

    #[test]
    fn test_unrelated_roots_conflict() {
        let mut ctx = TypeContext::new();
        let x = ctx.class_type("X", None);
        let y = ctx.class_type("Y", None);
        assert_eq!(ctx.join(x, y), TypeId::CONFLICT);
        assert_eq!(ctx.join(TypeId::INT, TypeId::BOOL), TypeId::CONFLICT);
    }

    #[test]
    fn test_error_yields_other_side() {
        let (mut ctx, a, ..) = hierarchy();
        assert_eq!(ctx.join(TypeId::ERROR, a), a);
        assert_eq!(ctx.meet(a, TypeId::ERROR), a);
        assert_eq!(ctx.join(TypeId::ERROR, TypeId::CONFLICT), TypeId::CONFLICT);
    }

    #[test]
    fn test_join_functions() {
        let (mut ctx, a, b, c, d) = hierarchy();
        // (B) => A  join  (D) => D  ==  (meet(B, D)) => ...  conflict on params
        let f = ctx.function_type(vec![b], a).unwrap();
        let g = ctx.function_type(vec![d], d).unwrap();
        assert_eq!(ctx.join(f, g), TypeId::CONFLICT);

        // (B) => A  join  (A) => D  ==  (A) => C
        let h = ctx.function_type(vec![a], d).unwrap();
        let expected = ctx.function_type(vec![a], c).unwrap();
        assert_eq!(ctx.join(f, h), expected);
        assert_eq!(ctx.join(h, f), expected);
    }

    #[test]
    fn test_meet_functions() {
        let (mut ctx, a, b, c, d) = hierarchy();
        // (A) => B  meet  (D) => A  ==  (C) => A
        let f = ctx.function_type(vec![a], b).unwrap();
        let g = ctx.function_type(vec![d], a).unwrap();
        let expected = ctx.function_type(vec![c], a).unwrap();
        assert_eq!(ctx.meet(f, g), expected);
    }

    #[test]
    fn test_function_arity_conflict() {
        let mut ctx = TypeContext::new();
        let f = ctx.function_type(vec![], TypeId::INT).unwrap();
        let g = ctx.function_type(vec![TypeId::INT], TypeId::INT).unwrap();
        assert_eq!(ctx.join(f, g), TypeId::CONFLICT);
        assert_eq!(ctx.meet(f, g), TypeId::CONFLICT);
    }
}
