//! Contour Type System
//!
//! Structural type representation and the evaluators over it: the
//! assignability relation, union/intersection reduction, generic
//! instantiation and discriminated-union narrowing.
//!
//! Every operation is pure. Types are immutable trees kept in a canonical
//! form, so structural equality is plain `==`.

#![warn(missing_docs)]

pub mod ty;
pub mod context;
pub mod config;
pub mod error;
pub mod assignability;
pub mod generics;
pub mod normalize;
pub mod discriminant;

pub use ty::{
    equal_types, ArrayType, Field, FunctionType, GenericParam, GenericType, IndexKey,
    IndexSignature, IntersectionType, LiteralType, ObjectType, PrimitiveType, TupleType, Type,
    TypeReference, UnionType,
};
pub use context::TypeContext;
pub use config::CheckerConfig;
pub use error::TypeError;
pub use assignability::{is_assignable, AssignabilityContext};
pub use generics::instantiate;
pub use normalize::{
    exclude, extract, intersection_of, keyof, partial, readonly, required, union_of,
};
pub use discriminant::{infer_discriminant, narrow, Discriminant, DiscriminantError};
