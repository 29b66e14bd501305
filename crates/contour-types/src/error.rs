//! Type system errors

use crate::ty::{LiteralType, Type};
use thiserror::Error;

/// Errors produced by type construction and the evaluators
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    /// Structurally invalid type tree (empty union, duplicate property, ...)
    #[error("Malformed type: {reason}")]
    MalformedType {
        /// Why the type was rejected
        reason: String,
    },

    /// Type argument does not satisfy its parameter's constraint
    #[error("Type constraint violation: {arg} does not satisfy '{param} extends {constraint}'")]
    ConstraintViolation {
        /// Offending parameter name
        param: String,
        /// Supplied argument
        arg: Type,
        /// Declared constraint (after substitution of earlier parameters)
        constraint: Type,
    },

    /// Instantiation would expand a generic inside its own expansion
    #[error("Circular type reference detected: '{name}' expands to itself")]
    RecursiveGeneric {
        /// Generic being re-entered
        name: String,
    },

    /// No union member carries the requested discriminant value
    #[error("No variant with {field} = {value}")]
    NotFound {
        /// Discriminant field
        field: String,
        /// Requested value
        value: LiteralType,
    },

    /// Invalid type argument count
    #[error("Invalid type argument count for '{name}': expected {expected}, got {actual}")]
    ArityMismatch {
        /// Generic name
        name: String,
        /// Expected count
        expected: usize,
        /// Actual count
        actual: usize,
    },

    /// Undefined generic or alias name
    #[error("Undefined type: {name}")]
    UndefinedType {
        /// Name that was not found
        name: String,
    },
}

impl TypeError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        TypeError::MalformedType {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_violation_message() {
        let err = TypeError::ConstraintViolation {
            param: "T".to_string(),
            arg: Type::number(),
            constraint: Type::object(Vec::<(&str, Type)>::new()).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Type constraint violation: number does not satisfy 'T extends {}'"
        );
    }
}
