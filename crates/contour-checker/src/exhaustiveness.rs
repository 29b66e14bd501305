//! Exhaustiveness checking for discriminated unions
//!
//! This module checks that switch statements and if-else chains over a
//! discriminated union handle every variant, and that typeof switches over
//! a union of primitives cover every primitive.

use crate::narrowing::{apply_type_guard, typeof_result};
use crate::type_guards::TypeGuard;
use contour_types::{infer_discriminant, LiteralType, Type};

/// Result of exhaustiveness checking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExhaustivenessResult {
    /// All variants are covered
    Exhaustive,
    /// Missing variants (returns list of missing discriminant values)
    NonExhaustive(Vec<LiteralType>),
    /// Has a default case, so exhaustive by definition
    HasDefault,
    /// Not a discriminated union, cannot check exhaustiveness
    NotApplicable,
}

impl ExhaustivenessResult {
    /// Whether every runtime value is handled
    pub fn is_exhaustive(&self) -> bool {
        matches!(
            self,
            ExhaustivenessResult::Exhaustive | ExhaustivenessResult::HasDefault
        )
    }
}

/// A `case` label of a switch over a discriminant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseLabel {
    /// `case "bird":`
    Value(LiteralType),
    /// `default:`
    Default,
}

/// Check if a switch over `union[field]` is exhaustive
pub fn check_switch_exhaustiveness(
    union: &Type,
    field: &str,
    cases: &[CaseLabel],
) -> ExhaustivenessResult {
    if cases.iter().any(|case| matches!(case, CaseLabel::Default)) {
        return ExhaustivenessResult::HasDefault;
    }

    let tested: Vec<LiteralType> = cases
        .iter()
        .filter_map(|case| match case {
            CaseLabel::Value(value) => Some(value.clone()),
            CaseLabel::Default => None,
        })
        .collect();
    check_exhaustiveness(union, field, &tested)
}

/// Check if the `tested` discriminant values cover every variant of `union`
///
/// Missing values are reported in member order. A member whose `field` is
/// not a literal (or a union of literals) makes the check
/// [`NotApplicable`](ExhaustivenessResult::NotApplicable).
pub fn check_exhaustiveness(union: &Type, field: &str, tested: &[LiteralType]) -> ExhaustivenessResult {
    let Some(all_variants) = extract_union_variants(union, field) else {
        return ExhaustivenessResult::NotApplicable;
    };

    let missing: Vec<LiteralType> = all_variants
        .into_iter()
        .filter(|variant| !tested.contains(variant))
        .collect();

    if missing.is_empty() {
        ExhaustivenessResult::Exhaustive
    } else {
        ExhaustivenessResult::NonExhaustive(missing)
    }
}

/// Like [`check_exhaustiveness`], with the discriminant field inferred
pub fn check_inferred_exhaustiveness(union: &Type, tested: &[LiteralType]) -> ExhaustivenessResult {
    match infer_discriminant(union) {
        Ok(discriminant) => check_exhaustiveness(union, &discriminant.field_name, tested),
        Err(_) => ExhaustivenessResult::NotApplicable,
    }
}

/// The type left for a `default` branch after every `tested` value has
/// been ruled out; `never` when the switch is exhaustive.
pub fn unhandled_type(union: &Type, field: &str, tested: &[LiteralType]) -> Type {
    tested.iter().fold(union.clone(), |remaining, value| {
        let guard = TypeGuard::Discriminant {
            var: String::new(),
            field: field.to_string(),
            value: value.clone(),
            negated: true,
        };
        apply_type_guard(&remaining, &guard)
    })
}

/// Check exhaustiveness for typeof-based switch on a union of primitives
///
/// Returns the typeof names that are never tested, or `None` when every
/// one is (or when `ty` has members typeof cannot classify).
pub fn check_typeof_exhaustiveness(ty: &Type, tested_types: &[&str]) -> Option<Vec<&'static str>> {
    let members = match ty {
        Type::Union(union) => union.members(),
        other => std::slice::from_ref(other),
    };

    let mut all_types = Vec::new();
    for member in members {
        let name = typeof_result(member)?;
        if !all_types.contains(&name) {
            all_types.push(name);
        }
    }

    let missing: Vec<&'static str> = all_types
        .into_iter()
        .filter(|name| !tested_types.contains(name))
        .collect();

    if missing.is_empty() {
        None
    } else {
        Some(missing)
    }
}

/// Collect the discriminant values of every variant, in member order
///
/// Returns None if some member is not an object with a literal `field`.
fn extract_union_variants(ty: &Type, field: &str) -> Option<Vec<LiteralType>> {
    let members = match ty {
        Type::Union(union) => union.members(),
        other => std::slice::from_ref(other),
    };

    let mut variants = Vec::new();
    for member in members {
        let obj = member.as_object()?;
        let field_ty = &obj.field(field)?.ty;
        for value in literal_values(field_ty)? {
            if !variants.contains(value) {
                variants.push(value.clone());
            }
        }
    }
    Some(variants)
}

/// Literals making up `ty`, if it consists of literals only
fn literal_values(ty: &Type) -> Option<Vec<&LiteralType>> {
    match ty {
        Type::Literal(lit) => Some(vec![lit]),
        Type::Union(union) => union
            .members()
            .iter()
            .map(|member| match member {
                Type::Literal(lit) => Some(lit),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result_type() -> Type {
        let ok = Type::object(vec![
            ("status", Type::string_literal("ok")),
            ("value", Type::number()),
        ])
        .unwrap();
        let error = Type::object(vec![
            ("status", Type::string_literal("error")),
            ("message", Type::string()),
        ])
        .unwrap();
        Type::union(vec![ok, error]).unwrap()
    }

    #[test]
    fn test_has_default_case() {
        let cases = vec![
            CaseLabel::Value(LiteralType::string("ok")),
            CaseLabel::Default,
        ];
        assert_eq!(
            check_switch_exhaustiveness(&result_type(), "status", &cases),
            ExhaustivenessResult::HasDefault
        );
    }

    #[test]
    fn test_all_variants_covered() {
        let cases = vec![
            CaseLabel::Value(LiteralType::string("error")),
            CaseLabel::Value(LiteralType::string("ok")),
        ];
        let result = check_switch_exhaustiveness(&result_type(), "status", &cases);
        assert_eq!(result, ExhaustivenessResult::Exhaustive);
        assert!(result.is_exhaustive());
    }

    #[test]
    fn test_missing_variant() {
        let result = check_exhaustiveness(&result_type(), "status", &[LiteralType::string("ok")]);
        assert_eq!(
            result,
            ExhaustivenessResult::NonExhaustive(vec![LiteralType::string("error")])
        );
        assert!(!result.is_exhaustive());
    }

    #[test]
    fn test_not_a_discriminated_union() {
        let ty = Type::union(vec![Type::string(), Type::number()]).unwrap();
        assert_eq!(
            check_exhaustiveness(&ty, "status", &[]),
            ExhaustivenessResult::NotApplicable
        );
    }

    #[test]
    fn test_inferred_field() {
        let result = check_inferred_exhaustiveness(
            &result_type(),
            &[LiteralType::string("ok"), LiteralType::string("error")],
        );
        assert_eq!(result, ExhaustivenessResult::Exhaustive);
    }

    #[test]
    fn test_unhandled_type() {
        let handled_ok = unhandled_type(&result_type(), "status", &[LiteralType::string("ok")]);
        assert_eq!(
            handled_ok,
            Type::object(vec![
                ("message", Type::string()),
                ("status", Type::string_literal("error")),
            ])
            .unwrap()
        );

        let all = [LiteralType::string("ok"), LiteralType::string("error")];
        assert_eq!(unhandled_type(&result_type(), "status", &all), Type::Never);
    }

    #[test]
    fn test_typeof_exhaustiveness_bare_union() {
        let bare_union = Type::union(vec![Type::string(), Type::number(), Type::boolean()]).unwrap();

        let result = check_typeof_exhaustiveness(&bare_union, &["string", "number", "boolean"]);
        assert!(result.is_none(), "Should be exhaustive");

        let result = check_typeof_exhaustiveness(&bare_union, &["string", "number"]);
        assert_eq!(result, Some(vec!["boolean"]));
    }
}
