//! Discriminated unions
//!
//! A discriminated (tagged) union is a union of object types that share a
//! field whose literal value identifies the variant:
//!
//! ```text
//! type Animal = { type: "bird"; flyingSpeed: number }
//!             | { type: "horse"; runningSpeed: number }
//! ```
//!
//! [`narrow`] picks the variant for a known discriminant value.
//! [`infer_discriminant`] finds the discriminant field itself.

use crate::error::TypeError;
use crate::ty::{LiteralType, ObjectType, PrimitiveType, Type};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Narrow `union` to the object member whose `field` is the literal `value`.
///
/// Members are scanned in canonical order and the first match wins. A
/// single object type is treated as a one-member union. Non-object members
/// never match.
pub fn narrow(union: &Type, field: &str, value: &LiteralType) -> Result<ObjectType, TypeError> {
    variants(union)
        .iter()
        .filter_map(|member| member.as_object())
        .find(|obj| {
            obj.field(field)
                .is_some_and(|f| matches!(&f.ty, Type::Literal(lit) if lit == value))
        })
        .cloned()
        .ok_or_else(|| TypeError::NotFound {
            field: field.to_string(),
            value: value.clone(),
        })
}

fn variants(ty: &Type) -> &[Type] {
    match ty {
        Type::Union(union) => union.members(),
        other => std::slice::from_ref(other),
    }
}

/// Information about a discriminant field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discriminant {
    /// Field name that serves as discriminant
    pub field_name: String,

    /// Map from discriminant value to variant index, in canonical member
    /// order: `"bird" -> 0`, `"horse" -> 1`
    pub value_map: FxHashMap<LiteralType, usize>,
}

impl Discriminant {
    /// Get the variant index for a discriminant value
    pub fn variant_index(&self, value: &LiteralType) -> Option<usize> {
        self.value_map.get(value).copied()
    }

    /// All discriminant values, in variant order
    pub fn values(&self) -> Vec<&LiteralType> {
        let mut values: Vec<_> = self.value_map.iter().collect();
        values.sort_by_key(|(_, idx)| **idx);
        values.into_iter().map(|(value, _)| value).collect()
    }

    /// Check if a value is valid for this discriminant
    pub fn is_valid_value(&self, value: &LiteralType) -> bool {
        self.value_map.contains_key(value)
    }
}

/// Errors that can occur during discriminant inference
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscriminantError {
    /// Union has no common fields with literal types
    #[error(
        "Cannot infer discriminant: union with {variants} variants has no common fields with literal types"
    )]
    NoCommonLiteralFields {
        /// Number of variants
        variants: usize,
    },

    /// Discriminant values are not unique across variants
    #[error("Discriminant field '{field}' has duplicate value {value}")]
    DuplicateValues {
        /// Discriminant field
        field: String,
        /// Value carried by more than one variant
        value: LiteralType,
    },

    /// Discriminant field has inconsistent kinds (e.g., string vs number)
    #[error("Discriminant field '{field}' has inconsistent types: expected {expected}, found {found}")]
    InconsistentTypes {
        /// Discriminant field
        field: String,
        /// Kind of the first variant's literal
        expected: PrimitiveType,
        /// Conflicting kind
        found: PrimitiveType,
        /// Index of the conflicting variant
        variant: usize,
    },

    /// Variant is not an object type
    #[error("All union variants must be object types for discriminant inference")]
    NonObjectVariant {
        /// Index of the offending variant
        variant: usize,
    },
}

/// Field names tried first, in order, before falling back to alphabetical
const PRIORITY: &[&str] = &["kind", "type", "tag", "variant"];

/// Infer the discriminant field of a union of object types.
///
/// Candidates are fields present in every variant with a literal type.
/// When several qualify, `kind > type > tag > variant > alphabetical`
/// decides. The chosen field must carry literals of one primitive kind and a
/// distinct value per variant.
pub fn infer_discriminant(union: &Type) -> Result<Discriminant, DiscriminantError> {
    let members = variants(union);

    let mut objects = Vec::with_capacity(members.len());
    for (idx, member) in members.iter().enumerate() {
        match member {
            Type::Object(obj) => objects.push(obj),
            _ => return Err(DiscriminantError::NonObjectVariant { variant: idx }),
        }
    }

    let mut candidates: Vec<&str> = literal_fields(objects[0]).collect();
    for obj in &objects[1..] {
        candidates.retain(|name| literal_field(obj, name).is_some());
    }

    let field = select_by_priority(&candidates).ok_or(DiscriminantError::NoCommonLiteralFields {
        variants: objects.len(),
    })?;

    let mut value_map = FxHashMap::default();
    let mut expected: Option<PrimitiveType> = None;
    for (idx, obj) in objects.iter().enumerate() {
        // Every candidate is a literal field of every variant
        let Some(value) = literal_field(obj, field) else {
            continue;
        };

        let kind = value.primitive();
        match expected {
            Some(expected) if expected != kind => {
                return Err(DiscriminantError::InconsistentTypes {
                    field: field.to_string(),
                    expected,
                    found: kind,
                    variant: idx,
                });
            }
            _ => expected = Some(kind),
        }

        if value_map.insert(value.clone(), idx).is_some() {
            return Err(DiscriminantError::DuplicateValues {
                field: field.to_string(),
                value: value.clone(),
            });
        }
    }

    Ok(Discriminant {
        field_name: field.to_string(),
        value_map,
    })
}

fn literal_field<'o>(obj: &'o ObjectType, name: &str) -> Option<&'o LiteralType> {
    match obj.field(name) {
        Some(field) if !field.optional => match &field.ty {
            Type::Literal(lit) => Some(lit),
            _ => None,
        },
        _ => None,
    }
}

fn literal_fields(obj: &ObjectType) -> impl Iterator<Item = &str> {
    obj.fields()
        .keys()
        .map(String::as_str)
        .filter(move |name| literal_field(obj, name).is_some())
}

fn select_by_priority<'c>(candidates: &[&'c str]) -> Option<&'c str> {
    for &preferred in PRIORITY {
        if let Some(found) = candidates.iter().find(|c| **c == preferred) {
            return Some(*found);
        }
    }
    // Candidates come from a BTreeMap, so the first one is alphabetical
    candidates.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bird() -> Type {
        Type::object(vec![
            ("type", Type::string_literal("bird")),
            ("flyingSpeed", Type::number()),
        ])
        .unwrap()
    }

    fn horse() -> Type {
        Type::object(vec![
            ("type", Type::string_literal("horse")),
            ("runningSpeed", Type::number()),
        ])
        .unwrap()
    }

    fn animal() -> Type {
        Type::union(vec![bird(), horse()]).unwrap()
    }

    #[test]
    fn test_narrow_to_variant() {
        let result = narrow(&animal(), "type", &LiteralType::string("horse")).unwrap();
        assert_eq!(Type::Object(result), horse());
    }

    #[test]
    fn test_narrow_not_found() {
        let err = narrow(&animal(), "type", &LiteralType::string("fish")).unwrap_err();
        assert_eq!(
            err,
            TypeError::NotFound {
                field: "type".to_string(),
                value: LiteralType::string("fish"),
            }
        );
        assert_eq!(err.to_string(), "No variant with type = \"fish\"");
    }

    #[test]
    fn test_narrow_single_object() {
        let result = narrow(&bird(), "type", &LiteralType::string("bird")).unwrap();
        assert_eq!(Type::Object(result), bird());
    }

    #[test]
    fn test_narrow_skips_non_objects() {
        let ty = Type::union(vec![Type::string(), bird()]).unwrap();
        assert!(narrow(&ty, "type", &LiteralType::string("bird")).is_ok());
        assert!(narrow(&ty, "length", &LiteralType::number(3.0)).is_err());
    }

    #[test]
    fn test_infer_discriminant() {
        let disc = infer_discriminant(&animal()).unwrap();
        assert_eq!(disc.field_name, "type");

        let bird_idx = disc.variant_index(&LiteralType::string("bird")).unwrap();
        let horse_idx = disc.variant_index(&LiteralType::string("horse")).unwrap();
        assert_ne!(bird_idx, horse_idx);
        assert!(!disc.is_valid_value(&LiteralType::string("fish")));
        assert_eq!(disc.values().len(), 2);
    }

    #[test]
    fn test_priority_kind_over_type() {
        let a = Type::object(vec![
            ("kind", Type::string_literal("a")),
            ("type", Type::string_literal("x")),
        ])
        .unwrap();
        let b = Type::object(vec![
            ("kind", Type::string_literal("b")),
            ("type", Type::string_literal("y")),
        ])
        .unwrap();

        let disc = infer_discriminant(&Type::union(vec![a, b]).unwrap()).unwrap();
        assert_eq!(disc.field_name, "kind");
    }

    #[test]
    fn test_alphabetical_fallback() {
        let a = Type::object(vec![
            ("status", Type::string_literal("ok")),
            ("code", Type::number_literal(200.0)),
        ])
        .unwrap();
        let b = Type::object(vec![
            ("status", Type::string_literal("error")),
            ("code", Type::number_literal(500.0)),
        ])
        .unwrap();

        let disc = infer_discriminant(&Type::union(vec![a, b]).unwrap()).unwrap();
        assert_eq!(disc.field_name, "code");
    }

    #[test]
    fn test_no_common_literal_field() {
        let a = Type::object(vec![("x", Type::string_literal("a"))]).unwrap();
        let b = Type::object(vec![("y", Type::string_literal("b"))]).unwrap();

        assert_eq!(
            infer_discriminant(&Type::union(vec![a, b]).unwrap()),
            Err(DiscriminantError::NoCommonLiteralFields { variants: 2 })
        );
    }

    #[test]
    fn test_inconsistent_kinds() {
        let a = Type::object(vec![("kind", Type::string_literal("a"))]).unwrap();
        let b = Type::object(vec![("kind", Type::number_literal(1.0))]).unwrap();

        assert!(matches!(
            infer_discriminant(&Type::union(vec![a, b]).unwrap()),
            Err(DiscriminantError::InconsistentTypes { .. })
        ));
    }

    #[test]
    fn test_duplicate_values() {
        let a = Type::object(vec![
            ("kind", Type::string_literal("a")),
            ("x", Type::number()),
        ])
        .unwrap();
        let b = Type::object(vec![
            ("kind", Type::string_literal("a")),
            ("y", Type::number()),
        ])
        .unwrap();

        assert_eq!(
            infer_discriminant(&Type::union(vec![a, b]).unwrap()),
            Err(DiscriminantError::DuplicateValues {
                field: "kind".to_string(),
                value: LiteralType::string("a"),
            })
        );
    }

    #[test]
    fn test_non_object_variant() {
        let ty = Type::union(vec![bird(), Type::string()]).unwrap();
        assert!(matches!(
            infer_discriminant(&ty),
            Err(DiscriminantError::NonObjectVariant { .. })
        ));
    }
}
