//! Type guards for control flow-based type narrowing
//!
//! A type guard is the type-level content of a runtime check: after
//! `typeof x === "string"` succeeds, `x` is known to be a string. Front ends
//! recognize these patterns in conditions and hand them to
//! [`apply_type_guard`](crate::apply_type_guard).

use contour_types::LiteralType;

/// Results the `typeof` operator can produce
pub const TYPEOF_NAMES: &[&str] = &[
    "string",
    "number",
    "boolean",
    "bigint",
    "symbol",
    "undefined",
    "object",
    "function",
];

/// A type guard extracted from a conditional expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeGuard {
    /// `typeof x === "type"` or `typeof x !== "type"`
    /// Supports the names in [`TYPEOF_NAMES`]
    TypeOf {
        /// Variable name being tested
        var: String,
        /// Type name ("string", "number", "object", ...)
        type_name: String,
        /// Whether this is a negated check (!==)
        negated: bool,
    },

    /// `"field" in x` or `!("field" in x)`
    In {
        /// Variable name being tested
        var: String,
        /// Property name
        field: String,
        /// Whether this is a negated check
        negated: bool,
    },

    /// `x == null` or `x != null`; covers both null and undefined
    Nullish {
        /// Variable name being tested
        var: String,
        /// Whether this is a negated check (testing for non-null)
        negated: bool,
    },

    /// `x.discriminant === "variant"` or `x.discriminant !== "variant"`
    Discriminant {
        /// Variable name (base of member expression)
        var: String,
        /// Discriminant field name
        field: String,
        /// Variant value
        value: LiteralType,
        /// Whether this is a negated check (!==)
        negated: bool,
    },

    /// `Array.isArray(x)` - narrows to array and tuple types
    IsArray {
        /// Variable name being tested
        var: String,
        /// Whether this is a negated check (!Array.isArray(x))
        negated: bool,
    },
}

impl TypeGuard {
    /// `typeof var === type_name`
    pub fn type_of(var: impl Into<String>, type_name: impl Into<String>) -> Self {
        TypeGuard::TypeOf {
            var: var.into(),
            type_name: type_name.into(),
            negated: false,
        }
    }

    /// `field in var`
    pub fn has_field(var: impl Into<String>, field: impl Into<String>) -> Self {
        TypeGuard::In {
            var: var.into(),
            field: field.into(),
            negated: false,
        }
    }

    /// `var == null`
    pub fn is_nullish(var: impl Into<String>) -> Self {
        TypeGuard::Nullish {
            var: var.into(),
            negated: false,
        }
    }

    /// `var.field === value`
    pub fn discriminant(
        var: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<LiteralType>,
    ) -> Self {
        TypeGuard::Discriminant {
            var: var.into(),
            field: field.into(),
            value: value.into(),
            negated: false,
        }
    }

    /// `Array.isArray(var)`
    pub fn is_array(var: impl Into<String>) -> Self {
        TypeGuard::IsArray {
            var: var.into(),
            negated: false,
        }
    }

    /// Variable the guard tests
    pub fn var(&self) -> &str {
        match self {
            TypeGuard::TypeOf { var, .. }
            | TypeGuard::In { var, .. }
            | TypeGuard::Nullish { var, .. }
            | TypeGuard::Discriminant { var, .. }
            | TypeGuard::IsArray { var, .. } => var,
        }
    }

    /// Whether the guard is negated
    pub fn is_negated(&self) -> bool {
        match self {
            TypeGuard::TypeOf { negated, .. }
            | TypeGuard::In { negated, .. }
            | TypeGuard::Nullish { negated, .. }
            | TypeGuard::Discriminant { negated, .. }
            | TypeGuard::IsArray { negated, .. } => *negated,
        }
    }

    /// The guard that holds in the else branch
    pub fn negate(mut self) -> Self {
        match &mut self {
            TypeGuard::TypeOf { negated, .. }
            | TypeGuard::In { negated, .. }
            | TypeGuard::Nullish { negated, .. }
            | TypeGuard::Discriminant { negated, .. }
            | TypeGuard::IsArray { negated, .. } => *negated = !*negated,
        }
        self
    }
}

/// Check whether `name` is something `typeof` can evaluate to
pub fn is_typeof_name(name: &str) -> bool {
    TYPEOF_NAMES.contains(&name)
}
