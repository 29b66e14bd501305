//! Type narrowing engine for control flow analysis
//!
//! This module applies type guards to types and tracks narrowed types
//! through control flow branches, merging environments at join points.

use crate::type_guards::{is_typeof_name, TypeGuard};
use contour_types::{
    intersection_of, is_assignable, union_of, LiteralType, ObjectType, PrimitiveType, Type,
};
use rustc_hash::FxHashMap;
use std::borrow::Cow;

/// Type environment tracking narrowed types for variables
///
/// In control flow branches, variables may have narrowed types based
/// on type guards. This environment tracks those narrowed types; a
/// variable without a binding has its declared type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NarrowingEnv {
    /// Map from variable name to narrowed type
    bindings: FxHashMap<String, Type>,
}

impl NarrowingEnv {
    /// Create a new empty type environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the narrowed type for a variable, if any
    pub fn get(&self, var: &str) -> Option<&Type> {
        self.bindings.get(var)
    }

    /// Set a narrowed type for a variable
    pub fn set(&mut self, var: impl Into<String>, ty: Type) {
        self.bindings.insert(var.into(), ty);
    }

    /// Remove a narrowed type binding (e.g., after reassignment)
    pub fn remove(&mut self, var: &str) -> Option<Type> {
        self.bindings.remove(var)
    }

    /// Check if no variable is narrowed
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Narrow the guarded variable in place and return its new type.
    ///
    /// Starts from the current binding, or from `declared` if the variable
    /// has not been narrowed yet.
    pub fn narrow(&mut self, guard: &TypeGuard, declared: &Type) -> Type {
        let current = self.get(guard.var()).unwrap_or(declared);
        let narrowed = apply_type_guard(current, guard);
        self.set(guard.var(), narrowed.clone());
        narrowed
    }

    /// Environments for the then and else branches of `if (guard)`
    pub fn branch(&self, guard: &TypeGuard, declared: &Type) -> (NarrowingEnv, NarrowingEnv) {
        let mut then_env = self.clone();
        then_env.narrow(guard, declared);

        let mut else_env = self.clone();
        else_env.narrow(&guard.clone().negate(), declared);

        (then_env, else_env)
    }

    /// Merge two type environments at a control flow join point
    ///
    /// For variables present in both environments, creates a union type.
    /// Variables only in one environment are dropped (not guaranteed to be narrowed).
    pub fn merge(&self, other: &NarrowingEnv) -> NarrowingEnv {
        let mut merged = NarrowingEnv::new();

        for (var, ty1) in &self.bindings {
            if let Some(ty2) = other.bindings.get(var) {
                let union_ty = if ty1 == ty2 {
                    ty1.clone()
                } else {
                    union_of([ty1.clone(), ty2.clone()])
                };
                merged.set(var.clone(), union_ty);
            }
        }

        merged
    }
}

/// Apply a type guard to narrow a type
///
/// Union members the guard rules out are removed; `never` means the branch
/// is unreachable. Members whose runtime shape is not known statically
/// (`unknown`, generic parameters, references) are kept, or refined where
/// the guard pins down a concrete type.
pub fn apply_type_guard(ty: &Type, guard: &TypeGuard) -> Type {
    let narrowed = match guard {
        TypeGuard::TypeOf {
            type_name, negated, ..
        } => apply_typeof_guard(ty, type_name, *negated),
        TypeGuard::In { field, negated, .. } => apply_in_guard(ty, field, *negated),
        TypeGuard::Nullish { negated, .. } => apply_nullish_guard(ty, *negated),
        TypeGuard::Discriminant {
            field,
            value,
            negated,
            ..
        } => apply_discriminant_guard(ty, field, value, *negated),
        TypeGuard::IsArray { negated, .. } => apply_is_array_guard(ty, *negated),
    };
    tracing::trace!(var = guard.var(), %ty, %narrowed, "applied type guard");
    narrowed
}

fn members(ty: &Type) -> &[Type] {
    match ty {
        Type::Union(union) => union.members(),
        other => std::slice::from_ref(other),
    }
}

/// Keep, drop or replace every union member
fn filter_members(ty: &Type, mut f: impl FnMut(&Type) -> Option<Type>) -> Type {
    union_of(members(ty).iter().filter_map(&mut f).collect::<Vec<_>>())
}

/// Members whose runtime shape is decided only at instantiation
fn is_opaque(ty: &Type) -> bool {
    matches!(
        ty,
        Type::Any | Type::Unknown | Type::Param(_) | Type::Reference(_) | Type::Generic(_)
    )
}

/// What `typeof` yields for values of `ty`, if that is statically known
pub(crate) fn typeof_result(ty: &Type) -> Option<&'static str> {
    let primitive_name = |p: PrimitiveType| match p {
        PrimitiveType::Null => "object",
        PrimitiveType::Void => "undefined",
        other => other.type_name(),
    };
    match ty {
        Type::Primitive(p) => Some(primitive_name(*p)),
        Type::Literal(lit) => Some(primitive_name(lit.primitive())),
        Type::Object(_) | Type::Array(_) | Type::Tuple(_) => Some("object"),
        Type::Function(_) => Some("function"),
        Type::Intersection(i) => i.members().iter().find_map(typeof_result),
        _ => None,
    }
}

/// The type a successful `typeof x === name` pins down
fn typeof_implied_type(name: &str) -> Option<Type> {
    match name {
        "object" => Some(union_of([
            Type::Object(ObjectType::empty()),
            Type::null(),
        ])),
        "function" => None,
        other => PrimitiveType::from_name(other).map(Type::Primitive),
    }
}

fn apply_typeof_guard(ty: &Type, type_name: &str, negated: bool) -> Type {
    if !is_typeof_name(type_name) {
        return ty.clone();
    }

    filter_members(ty, |member| match typeof_result(member) {
        Some(result) => ((result == type_name) != negated).then(|| member.clone()),
        None if negated || matches!(member, Type::Any) => Some(member.clone()),
        None => match typeof_implied_type(type_name) {
            Some(implied) => Some(intersection_of([member.clone(), implied])),
            None => Some(member.clone()),
        },
    })
}

/// View a member as a single object type, reducing intersections
fn object_view(ty: &Type) -> Option<Cow<'_, ObjectType>> {
    match ty {
        Type::Object(obj) => Some(Cow::Borrowed(obj)),
        Type::Intersection(i) => match intersection_of(i.members().iter().cloned()) {
            Type::Object(obj) => Some(Cow::Owned(obj)),
            _ => None,
        },
        _ => None,
    }
}

fn apply_in_guard(ty: &Type, field: &str, negated: bool) -> Type {
    filter_members(ty, |member| {
        if is_opaque(member) {
            return Some(member.clone());
        }
        let keep = match object_view(member) {
            Some(obj) => match obj.field(field) {
                // An optional property may be absent at runtime
                Some(f) => !negated || f.optional,
                None => {
                    let indexed = obj
                        .index_signature()
                        .is_some_and(|index| index.key.covers(field));
                    negated || indexed
                }
            },
            // `in` only finds properties declared on object types
            None => negated,
        };
        keep.then(|| member.clone())
    })
}

fn apply_nullish_guard(ty: &Type, negated: bool) -> Type {
    filter_members(ty, |member| match member {
        Type::Primitive(p) if p.is_nullish() => {
            (!negated).then(|| member.clone())
        }
        Type::Unknown if !negated => Some(union_of([Type::null(), Type::undefined()])),
        _ if is_opaque(member) => Some(member.clone()),
        _ => negated.then(|| member.clone()),
    })
}

fn apply_discriminant_guard(ty: &Type, field: &str, value: &LiteralType, negated: bool) -> Type {
    let literal = Type::Literal(value.clone());

    filter_members(ty, |member| {
        if is_opaque(member) {
            return Some(member.clone());
        }
        let keep = match object_view(member) {
            Some(obj) => match obj.field(field) {
                // Only a property fixed to exactly this value is ruled out
                Some(f) if negated => f.optional || f.ty != literal,
                Some(f) => is_assignable(&literal, &f.ty),
                None if negated => true,
                None => obj
                    .index_signature()
                    .is_some_and(|index| {
                        index.key.covers(field) && is_assignable(&literal, &index.value)
                    }),
            },
            None => negated,
        };
        keep.then(|| member.clone())
    })
}

fn apply_is_array_guard(ty: &Type, negated: bool) -> Type {
    filter_members(ty, |member| match member {
        Type::Array(_) | Type::Tuple(_) => (!negated).then(|| member.clone()),
        Type::Unknown if !negated => Some(Type::array(Type::Unknown)),
        _ if is_opaque(member) => Some(member.clone()),
        _ => negated.then(|| member.clone()),
    })
}
