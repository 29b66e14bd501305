//! Assignability relation for structural types
//!
//! Implements the relation T ~> U (a value of type T may be used where U is
//! expected). Compatibility is purely structural: object types are compared
//! by shape with width and depth subtyping, never by declared lineage.

use crate::config::CheckerConfig;
use crate::context::TypeContext;
use crate::normalize::intersection_of;
use crate::ty::{FunctionType, ObjectType, PrimitiveType, Type};
use std::borrow::Cow;

/// Context for checking assignability
#[derive(Debug, Clone, Copy)]
pub struct AssignabilityContext<'a> {
    /// Strictness switches
    config: CheckerConfig,

    /// Registry used to expand generic references, if any
    type_ctx: Option<&'a TypeContext>,
}

impl Default for AssignabilityContext<'_> {
    fn default() -> Self {
        Self::new(CheckerConfig::default())
    }
}

impl<'a> AssignabilityContext<'a> {
    /// Create a context without a generic registry
    pub fn new(config: CheckerConfig) -> Self {
        AssignabilityContext {
            config,
            type_ctx: None,
        }
    }

    /// Create a context that expands references through `type_ctx`
    pub fn with_type_context(config: CheckerConfig, type_ctx: &'a TypeContext) -> Self {
        AssignabilityContext {
            config,
            type_ctx: Some(type_ctx),
        }
    }

    /// The configuration in effect
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Check if `source` is assignable to `target` (source ~> target)
    ///
    /// Total over well-formed types: never panics, never errors. A reference
    /// that fails to expand is simply not assignable.
    pub fn is_assignable(&self, source: &Type, target: &Type) -> bool {
        // Top types accept everything
        if matches!(target, Type::Any | Type::Unknown) {
            return true;
        }

        // any is an escape hatch, never is the bottom type
        if matches!(source, Type::Any | Type::Never) {
            return true;
        }

        if source == target {
            return true;
        }

        let (source, target) = match self.expand_references(source, target) {
            Some(pair) => pair,
            None => return false,
        };
        if matches!((&source, &target), (Cow::Owned(_), _) | (_, Cow::Owned(_))) {
            return self.is_assignable(&source, &target);
        }

        // T1 | ... | Tn ~> U if Ti ~> U for all i. Checked before the target
        // union rule so that a union is assignable to a wider union.
        if let Type::Union(union) = source.as_ref() {
            return union
                .members()
                .iter()
                .all(|member| self.is_assignable(member, &target));
        }

        // T ~> U1 | ... | Un if T ~> Ui for some i
        if let Type::Union(union) = target.as_ref() {
            if union
                .members()
                .iter()
                .any(|member| self.is_assignable(&source, member))
            {
                return true;
            }
            // T extends A | B ~> A | B, which no single member accepts
            if let Type::Param(param) = source.as_ref() {
                if let Some(constraint) = &param.constraint {
                    return self.is_assignable(constraint, &target);
                }
            }
            return self.reduced_intersection_assignable(&source, &target);
        }

        // T ~> U1 & ... & Un if T ~> Ui for all i. The target is reduced
        // first: { a: "x" } & { a: "y" } is never and accepts only never.
        if let Type::Intersection(intersection) = target.as_ref() {
            return match intersection_of(intersection.members().iter().cloned()) {
                Type::Intersection(reduced) => reduced
                    .members()
                    .iter()
                    .all(|member| self.is_assignable(&source, member)),
                reduced => self.is_assignable(&source, &reduced),
            };
        }

        // T1 & ... & Tn ~> U if Ti ~> U for some i
        if let Type::Intersection(intersection) = source.as_ref() {
            return intersection
                .members()
                .iter()
                .any(|member| self.is_assignable(member, &target))
                || self.reduced_intersection_assignable(&source, &target);
        }

        self.is_structurally_assignable(&source, &target)
    }

    /// Rules for non-union, non-intersection pairs
    fn is_structurally_assignable(&self, source: &Type, target: &Type) -> bool {
        match (source, target) {
            // T extends C ~> U if C ~> U
            (Type::Param(param), _) => match &param.constraint {
                Some(constraint) => self.is_assignable(constraint, target),
                None => false,
            },

            // Width and depth subtyping
            (_, Type::Object(t)) => match source {
                Type::Object(s) => self.is_object_assignable(s, t),
                _ => false,
            },

            // S[] ~> T[] if S ~> T; [S1, ..., Sn] ~> T[] if every Si ~> T
            (_, Type::Array(t)) => match source {
                Type::Array(s) => self.is_assignable(&s.element, &t.element),
                Type::Tuple(s) => s
                    .elements
                    .iter()
                    .all(|element| self.is_assignable(element, &t.element)),
                _ => false,
            },

            (Type::Tuple(s), Type::Tuple(t)) => {
                s.elements.len() == t.elements.len()
                    && s.elements
                        .iter()
                        .zip(&t.elements)
                        .all(|(se, te)| self.is_assignable(se, te))
            }

            (Type::Function(s), Type::Function(t)) => self.is_function_assignable(s, t),

            // Only the identical literal, handled by the equality check
            (_, Type::Literal(_)) => false,

            (Type::Primitive(s), Type::Primitive(t)) => {
                s == t || (*s == PrimitiveType::Undefined && *t == PrimitiveType::Void)
            }

            // "ADM" ~> string
            (Type::Literal(s), Type::Primitive(t)) => {
                self.config.widen_literals && s.primitive() == *t
            }

            // Generic parameters, declarations and references only match
            // themselves, which the equality check already covered.
            _ => false,
        }
    }

    /// `{ a: S1, b: S2 } ~> { a: T1 }` if S1 ~> T1 (extra fields allowed)
    fn is_object_assignable(&self, source: &ObjectType, target: &ObjectType) -> bool {
        for (name, target_field) in target.fields() {
            match source.field(name) {
                Some(source_field) => {
                    if source_field.optional && !target_field.optional {
                        return false;
                    }
                    if !self.is_assignable(&source_field.ty, &target_field.ty) {
                        return false;
                    }
                }
                None if target_field.optional => {}
                None => return false,
            }
        }

        let target_index = target.index_signature();

        for (name, source_field) in source.fields() {
            if target.field(name).is_some() {
                continue;
            }
            match target_index {
                Some(index) if index.key.covers(name) => {
                    if !self.is_assignable(&source_field.ty, &index.value) {
                        return false;
                    }
                }
                _ if self.config.exact_objects => return false,
                _ => {}
            }
        }

        if let (Some(target_index), Some(source_index)) = (target_index, source.index_signature()) {
            if target_index.key == source_index.key
                && !self.is_assignable(&source_index.value, &target_index.value)
            {
                return false;
            }
        }

        true
    }

    /// Parameters are contravariant, the return type covariant. The source
    /// may ignore trailing parameters the target passes, and any return
    /// type is accepted where the result is discarded (`void`).
    fn is_function_assignable(&self, source: &FunctionType, target: &FunctionType) -> bool {
        if source.params.len() > target.params.len() {
            return false;
        }

        let params_match = source.params.iter().zip(&target.params).all(|(sp, tp)| {
            // Note: reversed!
            self.is_assignable(tp, sp)
                || (!self.config.strict_function_types && self.is_assignable(sp, tp))
        });

        params_match
            && (self.is_assignable(&Type::void(), &target.returns)
                || self.is_assignable(&source.returns, &target.returns))
    }

    /// Retry an intersection source in its reduced form, so that
    /// `{ a } & { b }` is accepted where `{ a, b }` is expected.
    fn reduced_intersection_assignable(&self, source: &Type, target: &Type) -> bool {
        let Type::Intersection(intersection) = source else {
            return false;
        };
        match intersection_of(intersection.members().iter().cloned()) {
            // Partially merged: { a } & { b } & F becomes { a; b } & F
            Type::Intersection(reduced) if reduced != *intersection => reduced
                .members()
                .iter()
                .any(|member| self.is_assignable(member, target)),
            Type::Intersection(_) => false,
            reduced => self.is_assignable(&reduced, target),
        }
    }

    /// Expand top-level references to registered generics. Returns `None`
    /// when an expansion fails.
    fn expand_references<'t>(
        &self,
        source: &'t Type,
        target: &'t Type,
    ) -> Option<(Cow<'t, Type>, Cow<'t, Type>)> {
        let Some(ctx) = self.type_ctx else {
            return Some((Cow::Borrowed(source), Cow::Borrowed(target)));
        };
        let expand = |ty: &'t Type| -> Option<Cow<'t, Type>> {
            match ty {
                Type::Reference(r) if ctx.lookup_generic(&r.name).is_some() => {
                    ctx.instantiate_reference(r).ok().map(Cow::Owned)
                }
                _ => Some(Cow::Borrowed(ty)),
            }
        };
        Some((expand(source)?, expand(target)?))
    }
}

/// Check if `source` is assignable to `target` with the default configuration
pub fn is_assignable(source: &Type, target: &Type) -> bool {
    AssignabilityContext::default().is_assignable(source, target)
}
