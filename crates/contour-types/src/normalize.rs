//! Union and intersection evaluation
//!
//! `union_of` and `intersection_of` compute the reduced form of a
//! composition, unlike [`Type::union`] / [`Type::intersection`] which only
//! flatten and deduplicate. The utility mappings (`keyof`, `Partial`,
//! `Readonly`, `Required`, `Exclude`) live here as well since they are
//! defined in terms of the same reductions.

use crate::assignability::is_assignable;
use crate::ty::{
    flatten_intersection, flatten_union, Field, IndexKey, IndexSignature, ObjectType,
    PrimitiveType, Type,
};
use std::collections::btree_map::Entry;

/// Reduced union of `types`.
///
/// Nested unions are flattened and duplicates removed; `never` members
/// disappear. `[]` is `never`, a single member is returned as is. An `any`
/// member absorbs the union, otherwise an `unknown` member does.
pub fn union_of(types: impl IntoIterator<Item = Type>) -> Type {
    let mut flat = Vec::new();
    for ty in types {
        flatten_union(ty, &mut flat);
    }

    if flat.iter().any(|t| matches!(t, Type::Any)) {
        return Type::Any;
    }
    if flat.iter().any(|t| matches!(t, Type::Unknown)) {
        return Type::Unknown;
    }
    flat.retain(|t| !t.is_never());

    if flat.is_empty() {
        return Type::Never;
    }
    Type::union_from_flat(flat)
}

/// Reduced intersection of `types`.
///
/// Union operands distribute over the rest, disjoint primitives collapse to
/// `never`, and object operands merge property by property. Operands that
/// cannot be combined stay side by side in an intersection. `[]` is
/// `unknown`.
#[tracing::instrument(level = "trace", skip_all)]
pub fn intersection_of(types: impl IntoIterator<Item = Type>) -> Type {
    let mut flat = Vec::new();
    for ty in types {
        flatten_intersection(ty, &mut flat);
    }

    if flat.iter().any(Type::is_never) {
        return Type::Never;
    }
    if flat.iter().any(|t| matches!(t, Type::Any)) {
        return Type::Any;
    }
    flat.retain(|t| !matches!(t, Type::Unknown));
    if flat.is_empty() {
        return Type::Unknown;
    }

    flat.sort();
    flat.dedup();

    let mut parts: Vec<Type> = Vec::new();
    for ty in flat {
        absorb(&mut parts, ty);
    }

    if parts.iter().any(Type::is_never) {
        tracing::trace!("intersection reduced to never");
        return Type::Never;
    }

    // Distribution may have produced nested intersections
    let mut reduced = Vec::new();
    for part in parts {
        flatten_intersection(part, &mut reduced);
    }
    Type::intersection_from_flat(reduced)
}

/// Add `incoming` to the pairwise-irreducible `parts`. A merged part is
/// taken out and offered to the remaining parts again, until nothing
/// combines.
fn absorb(parts: &mut Vec<Type>, mut incoming: Type) {
    loop {
        let merged = parts
            .iter()
            .enumerate()
            .find_map(|(i, part)| combine(part, &incoming).map(|merged| (i, merged)));
        match merged {
            Some((i, merged)) => {
                parts.remove(i);
                incoming = merged;
            }
            None => {
                parts.push(incoming);
                return;
            }
        }
    }
}

/// Intersect two operands, or `None` when they have to stay apart.
fn combine(a: &Type, b: &Type) -> Option<Type> {
    if a == b {
        return Some(a.clone());
    }

    // (A | B) & X = (A & X) | (B & X)
    match (a, b) {
        (Type::Union(ua), Type::Union(ub)) => {
            let pairs = ua.members().iter().flat_map(|ma| {
                ub.members()
                    .iter()
                    .map(move |mb| intersection_of([ma.clone(), mb.clone()]))
            });
            return Some(union_of(pairs.collect::<Vec<_>>()));
        }
        (Type::Union(u), other) | (other, Type::Union(u)) => {
            let pairs = u
                .members()
                .iter()
                .map(|m| intersection_of([m.clone(), other.clone()]));
            return Some(union_of(pairs.collect::<Vec<_>>()));
        }
        _ => {}
    }

    match (a, b) {
        // undefined is the only value of void
        (Type::Primitive(PrimitiveType::Undefined), Type::Primitive(PrimitiveType::Void))
        | (Type::Primitive(PrimitiveType::Void), Type::Primitive(PrimitiveType::Undefined)) => {
            Some(Type::undefined())
        }
        (Type::Primitive(pa), Type::Primitive(pb)) if pa != pb => Some(Type::Never),
        (Type::Literal(la), Type::Literal(lb)) if la != lb => Some(Type::Never),
        (Type::Literal(l), Type::Primitive(p)) | (Type::Primitive(p), Type::Literal(l)) => {
            if l.primitive() == *p {
                Some(Type::Literal(l.clone()))
            } else {
                Some(Type::Never)
            }
        }
        // null and undefined have nothing in common with any other type
        (Type::Primitive(p), other) | (other, Type::Primitive(p))
            if p.is_nullish() && !matches!(other, Type::Param(_)) =>
        {
            Some(Type::Never)
        }
        (Type::Object(oa), Type::Object(ob)) => merge_objects(oa, ob),
        _ => {
            if is_assignable(a, b) {
                Some(a.clone())
            } else if is_assignable(b, a) {
                Some(b.clone())
            } else {
                None
            }
        }
    }
}

/// `{ a: A } & { b: B }` = `{ a: A; b: B }`, overlapping properties
/// intersected recursively.
fn merge_objects(a: &ObjectType, b: &ObjectType) -> Option<Type> {
    let index = match (a.index_signature(), b.index_signature()) {
        (None, None) => None,
        (Some(i), None) | (None, Some(i)) => Some(i.clone()),
        (Some(ia), Some(ib)) if ia.key == ib.key => Some(IndexSignature {
            key: ia.key,
            value: Box::new(intersection_of([(*ia.value).clone(), (*ib.value).clone()])),
        }),
        // Differently keyed signatures cannot share one object type
        _ => return None,
    };

    let mut fields = a.fields().clone();
    for (name, fb) in b.fields() {
        match fields.entry(name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(fb.clone());
            }
            Entry::Occupied(mut slot) => {
                let fa = slot.get();
                let ty = intersection_of([fa.ty.clone(), fb.ty.clone()]);
                // Only a property both sides require makes the object empty
                if ty.is_never() && !fa.optional && !fb.optional {
                    return Some(Type::Never);
                }
                let merged = Field {
                    ty,
                    optional: fa.optional && fb.optional,
                    readonly: fa.readonly || fb.readonly,
                };
                slot.insert(merged);
            }
        }
    }

    Some(Type::Object(ObjectType::from_parts(fields, index)))
}

/// Members of `ty` that are not assignable to `removed` (`Exclude<T, U>`)
pub fn exclude(ty: &Type, removed: &Type) -> Type {
    match ty {
        Type::Union(u) => union_of(
            u.members()
                .iter()
                .filter(|m| !is_assignable(m, removed))
                .cloned()
                .collect::<Vec<_>>(),
        ),
        other if is_assignable(other, removed) => Type::Never,
        other => other.clone(),
    }
}

/// Members of `ty` that are assignable to `kept` (`Extract<T, U>`)
pub fn extract(ty: &Type, kept: &Type) -> Type {
    match ty {
        Type::Union(u) => union_of(
            u.members()
                .iter()
                .filter(|m| is_assignable(m, kept))
                .cloned()
                .collect::<Vec<_>>(),
        ),
        other if is_assignable(other, kept) => other.clone(),
        _ => Type::Never,
    }
}

/// `keyof T`: the union of property names of an object type.
///
/// A union yields only the keys every member has; an intersection yields
/// the keys of any member.
pub fn keyof(ty: &Type) -> Type {
    match ty {
        Type::Object(obj) => {
            let mut keys: Vec<Type> = obj
                .fields()
                .keys()
                .map(|name| Type::string_literal(name.clone()))
                .collect();
            match obj.index_signature().map(|index| index.key) {
                // string keys also accept numeric property access
                Some(IndexKey::String) => {
                    keys.push(Type::string());
                    keys.push(Type::number());
                }
                Some(key) => keys.push(key.as_type()),
                None => {}
            }
            union_of(keys)
        }
        Type::Union(u) => intersection_of(u.members().iter().map(keyof).collect::<Vec<_>>()),
        Type::Intersection(i) => union_of(i.members().iter().map(keyof).collect::<Vec<_>>()),
        Type::Any | Type::Never => union_of([
            Type::string(),
            Type::number(),
            Type::Primitive(PrimitiveType::Symbol),
        ]),
        _ => Type::Never,
    }
}

fn map_object_fields(ty: &Type, f: &impl Fn(&Field) -> Field) -> Type {
    match ty {
        Type::Object(obj) => Type::Object(obj.map_fields(f)),
        Type::Union(u) => union_of(
            u.members()
                .iter()
                .map(|m| map_object_fields(m, f))
                .collect::<Vec<_>>(),
        ),
        other => other.clone(),
    }
}

/// `Partial<T>`: every property optional
pub fn partial(ty: &Type) -> Type {
    map_object_fields(ty, &|field: &Field| Field {
        optional: true,
        ..field.clone()
    })
}

/// `Required<T>`: every property required
pub fn required(ty: &Type) -> Type {
    map_object_fields(ty, &|field: &Field| Field {
        optional: false,
        ..field.clone()
    })
}

/// `Readonly<T>`: every property readonly
pub fn readonly(ty: &Type) -> Type {
    map_object_fields(ty, &|field: &Field| Field {
        readonly: true,
        ..field.clone()
    })
}
