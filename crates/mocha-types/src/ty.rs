//! Core type definitions for the Mocha type system

use std::fmt;

/// Unique identifier for a type in the type context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// `int`
    pub const INT: TypeId = TypeId(0);
    /// `bool`
    pub const BOOL: TypeId = TypeId(1);
    /// `string`
    pub const STRING: TypeId = TypeId(2);
    /// `void`
    pub const VOID: TypeId = TypeId(3);
    /// The type of the `null` literal
    pub const NULL: TypeId = TypeId(4);
    /// Poison type produced after a reported error
    pub const ERROR: TypeId = TypeId(5);
    /// Failed join/meet
    pub const CONFLICT: TypeId = TypeId(6);

    /// Raw index into the type context
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Primitive (base) types in Mocha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// The `int` type
    Int,
    /// The `bool` type
    Bool,
    /// The `string` type
    String,
    /// The `void` type (methods and closures with no value)
    Void,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Int => write!(f, "int"),
            PrimitiveType::Bool => write!(f, "bool"),
            PrimitiveType::String => write!(f, "string"),
            PrimitiveType::Void => write!(f, "void"),
        }
    }
}

/// Class type (nominal typing)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    /// Class name
    pub name: String,
    /// Parent class type, if the class extends one
    pub superclass: Option<TypeId>,
}

/// Array type: T[]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayType {
    /// Element type, never `void`
    pub element: TypeId,
}

/// Function type: (T1, T2, ..., Tn) => R
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    /// Parameter types
    pub params: Vec<TypeId>,
    /// Return type
    pub return_type: TypeId,
}

impl FunctionType {
    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// The core type representation in Mocha
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Primitive type (int, bool, string, void)
    Primitive(PrimitiveType),

    /// The type of the `null` literal
    Null,

    /// Poison type. Compatible with everything so one mistake is reported once.
    Error,

    /// Result of a join or meet that has no answer
    Conflict,

    /// Class type (nominal)
    Class(ClassType),

    /// Array type: T[]
    Array(ArrayType),

    /// Function type: (params) => return
    Function(FunctionType),
}

impl Type {
    /// Check if this is a base type (`int`, `bool`, `string`, `void`)
    pub fn is_base(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    /// Check if this type is the void type
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Primitive(PrimitiveType::Void))
    }

    /// Check if this type is a class type
    pub fn is_class(&self) -> bool {
        matches!(self, Type::Class(_))
    }

    /// Check if this type is an array type
    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    /// Check if this type is a function type
    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function(_))
    }

    /// Get the primitive type if this is a primitive
    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            Type::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Get the class type if this is a class
    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            Type::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Get the array type if this is an array
    pub fn as_array(&self) -> Option<&ArrayType> {
        match self {
            Type::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get the function type if this is a function
    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(f) => Some(f),
            _ => None,
        }
    }
}
