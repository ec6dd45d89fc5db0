//! Mocha Type System
//!
//! Type representation and the subtype lattice for Mocha: primitive, class,
//! array and function types plus the `null`, `error` and `conflict` sentinels.

#![warn(missing_docs)]

pub mod ty;
pub mod context;
pub mod error;
pub mod subtyping;
pub mod lattice;

pub use ty::{Type, PrimitiveType, TypeId, ClassType, ArrayType, FunctionType};
pub use context::TypeContext;
pub use error::TypeError;
pub use subtyping::SubtypingContext;
