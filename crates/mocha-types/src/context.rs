//! Type context for managing types and type interning

use crate::error::TypeError;
use crate::ty::{ArrayType, ClassType, FunctionType, PrimitiveType, Type, TypeId};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Type context that manages all types in a program
///
/// This uses type interning to ensure that identical types have the same TypeId,
/// which enables efficient equality checking and memory usage.
#[derive(Debug, Clone)]
pub struct TypeContext {
    /// Storage for all types, indexed by TypeId
    types: Vec<Arc<Type>>,

    /// Reverse mapping from Type to TypeId for interning
    type_to_id: FxHashMap<Type, TypeId>,
}

impl Default for TypeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeContext {
    /// Create a new type context with the well-known types pre-interned
    pub fn new() -> Self {
        let mut ctx = TypeContext {
            types: Vec::new(),
            type_to_id: FxHashMap::default(),
        };

        // Order must match the TypeId constants
        ctx.intern(Type::Primitive(PrimitiveType::Int));
        ctx.intern(Type::Primitive(PrimitiveType::Bool));
        ctx.intern(Type::Primitive(PrimitiveType::String));
        ctx.intern(Type::Primitive(PrimitiveType::Void));
        ctx.intern(Type::Null);
        ctx.intern(Type::Error);
        ctx.intern(Type::Conflict);

        ctx
    }

    /// Intern a type, returning its TypeId
    ///
    /// If the type already exists, returns the existing TypeId.
    /// Otherwise, allocates a new TypeId and stores the type.
    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.type_to_id.get(&ty) {
            return id;
        }

        let id = TypeId(self.types.len() as u32);
        self.types.push(Arc::new(ty.clone()));
        self.type_to_id.insert(ty, id);
        id
    }

    /// Get a type by its TypeId
    pub fn get(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.0 as usize).map(|arc| arc.as_ref())
    }

    /// Number of interned types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false: the well-known types are interned on construction
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    /// Intern a class type
    pub fn class_type(&mut self, name: impl Into<String>, superclass: Option<TypeId>) -> TypeId {
        self.intern(Type::Class(ClassType {
            name: name.into(),
            superclass,
        }))
    }

    /// Intern an array type, rejecting `void` elements
    pub fn array_type(&mut self, element: TypeId) -> Result<TypeId, TypeError> {
        if element == TypeId::VOID {
            return Err(TypeError::VoidElement);
        }
        Ok(self.intern(Type::Array(ArrayType { element })))
    }

    /// Intern a function type, rejecting `void` parameters
    pub fn function_type(&mut self, params: Vec<TypeId>, return_type: TypeId) -> Result<TypeId, TypeError> {
        if let Some(index) = params.iter().position(|&p| p == TypeId::VOID) {
            return Err(TypeError::VoidParameter { index });
        }
        Ok(self.intern(Type::Function(FunctionType { params, return_type })))
    }

    // ========================================================================
    // Classifiers
    // ========================================================================

    /// `int`, `bool`, `string` or `void`
    pub fn is_base_type(&self, id: TypeId) -> bool {
        self.get(id).is_some_and(Type::is_base)
    }

    /// Check if the type is an array
    pub fn is_array(&self, id: TypeId) -> bool {
        self.get(id).is_some_and(Type::is_array)
    }

    /// Check if the type is a class
    pub fn is_class(&self, id: TypeId) -> bool {
        self.get(id).is_some_and(Type::is_class)
    }

    /// Check if the type is a function
    pub fn is_func(&self, id: TypeId) -> bool {
        self.get(id).is_some_and(Type::is_function)
    }

    /// Check if the type is `void`
    pub fn is_void(&self, id: TypeId) -> bool {
        id == TypeId::VOID
    }

    /// Check if the type is the conflict sentinel
    pub fn is_conflict(&self, id: TypeId) -> bool {
        id == TypeId::CONFLICT
    }

    /// True for `error` and for arrays or functions that contain it anywhere
    pub fn has_error(&self, id: TypeId) -> bool {
        match self.get(id) {
            Some(Type::Error) => true,
            Some(Type::Array(a)) => self.has_error(a.element),
            Some(Type::Function(f)) => {
                self.has_error(f.return_type) || f.params.iter().any(|&p| self.has_error(p))
            }
            _ => false,
        }
    }

    /// Element type of an array
    pub fn element_type(&self, id: TypeId) -> Option<TypeId> {
        self.get(id).and_then(Type::as_array).map(|a| a.element)
    }

    /// Signature of a function type
    pub fn function(&self, id: TypeId) -> Option<&FunctionType> {
        self.get(id).and_then(Type::as_function)
    }

    /// Class name and parent of a class type
    pub fn class(&self, id: TypeId) -> Option<&ClassType> {
        self.get(id).and_then(Type::as_class)
    }

    // ========================================================================
    // Equivalence
    // ========================================================================

    /// Structural equivalence; `error` is equivalent to everything at any depth
    pub fn eq(&self, a: TypeId, b: TypeId) -> bool {
        if a == b || a == TypeId::ERROR || b == TypeId::ERROR {
            return true;
        }
        match (self.get(a), self.get(b)) {
            (Some(Type::Array(x)), Some(Type::Array(y))) => self.eq(x.element, y.element),
            (Some(Type::Function(f)), Some(Type::Function(g))) => {
                f.params.len() == g.params.len()
                    && self.eq(f.return_type, g.return_type)
                    && f.params.iter().zip(&g.params).all(|(&p, &q)| self.eq(p, q))
            }
            // Interned classes with the same name and parent are the same id
            _ => false,
        }
    }

    /// Format a type for display in diagnostics
    pub fn display(&self, id: TypeId) -> String {
        match self.get(id) {
            Some(Type::Primitive(p)) => p.to_string(),
            Some(Type::Null) => "null".to_string(),
            Some(Type::Error) => "error".to_string(),
            Some(Type::Conflict) => "conflict".to_string(),
            Some(Type::Class(c)) => format!("class {}", c.name),
            Some(Type::Array(a)) => format!("{}[]", self.display(a.element)),
            Some(Type::Function(f)) => {
                let params: Vec<String> = f.params.iter().map(|&p| self.display(p)).collect();
                format!("({}) => {}", params.join(", "), self.display(f.return_type))
            }
            None => format!("<invalid {}>", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_ids() {
        let ctx = TypeContext::new();
        assert_eq!(ctx.get(TypeId::INT), Some(&Type::Primitive(PrimitiveType::Int)));
        assert_eq!(ctx.get(TypeId::BOOL), Some(&Type::Primitive(PrimitiveType::Bool)));
        assert_eq!(ctx.get(TypeId::STRING), Some(&Type::Primitive(PrimitiveType::String)));
        assert_eq!(ctx.get(TypeId::VOID), Some(&Type::Primitive(PrimitiveType::Void)));
        assert_eq!(ctx.get(TypeId::NULL), Some(&Type::Null));
        assert_eq!(ctx.get(TypeId::ERROR), Some(&Type::Error));
        assert_eq!(ctx.get(TypeId::CONFLICT), Some(&Type::Conflict));
        assert_eq!(ctx.len(), 7);
    }

    #[test]
    fn test_interning_is_structural() {
        let mut ctx = TypeContext::new();
        let a1 = ctx.array_type(TypeId::INT).unwrap();
        let a2 = ctx.array_type(TypeId::INT).unwrap();
        assert_eq!(a1, a2);

        let f1 = ctx.function_type(vec![TypeId::INT, TypeId::BOOL], TypeId::INT).unwrap();
        let f2 = ctx.function_type(vec![TypeId::INT, TypeId::BOOL], TypeId::INT).unwrap();
        assert_eq!(f1, f2);
    }

    #[test]
    fn test_void_array_rejected() {
        let mut ctx = TypeContext::new();
        assert_eq!(ctx.array_type(TypeId::VOID), Err(TypeError::VoidElement));
        assert_eq!(
            ctx.function_type(vec![TypeId::INT, TypeId::VOID], TypeId::INT),
            Err(TypeError::VoidParameter { index: 1 })
        );
    }

    #[test]
    fn test_has_error() {
        let mut ctx = TypeContext::new();
        let err_arr = ctx.array_type(TypeId::ERROR).unwrap();
        let nested = ctx.array_type(err_arr).unwrap();
        let func = ctx.function_type(vec![TypeId::INT, nested], TypeId::BOOL).unwrap();
        assert!(ctx.has_error(TypeId::ERROR));
        assert!(ctx.has_error(nested));
        assert!(ctx.has_error(func));
        assert!(!ctx.has_error(TypeId::CONFLICT));
        assert!(!ctx.has_error(TypeId::NULL));
    }

    #[test]
    fn test_eq_absorbs_error_at_depth() {
        let mut ctx = TypeContext::new();
        let int_arr = ctx.array_type(TypeId::INT).unwrap();
        let err_arr = ctx.array_type(TypeId::ERROR).unwrap();
        let bool_arr = ctx.array_type(TypeId::BOOL).unwrap();
        assert!(ctx.eq(int_arr, err_arr));
        assert!(!ctx.eq(int_arr, bool_arr));
        assert!(ctx.eq(TypeId::ERROR, TypeId::CONFLICT));
        assert!(!ctx.eq(TypeId::INT, TypeId::CONFLICT));
    }

    #[test]
    fn test_display() {
        let mut ctx = TypeContext::new();
        let a = ctx.class_type("A", None);
        let arr = ctx.array_type(TypeId::INT).unwrap();
        let f = ctx.function_type(vec![TypeId::INT, TypeId::BOOL], TypeId::INT).unwrap();
        let g = ctx.function_type(vec![], a).unwrap();
        assert_eq!(ctx.display(a), "class A");
        assert_eq!(ctx.display(arr), "int[]");
        assert_eq!(ctx.display(f), "(int, bool) => int");
        assert_eq!(ctx.display(g), "() => class A");
        assert_eq!(ctx.display(TypeId::CONFLICT), "conflict");
    }
}
