//! Error types for checker helpers

use contour_types::{FunctionType, Type, TypeError};
use thiserror::Error;

/// Errors reported by the checker helpers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// Error from the type system
    #[error(transparent)]
    Type(#[from] TypeError),

    /// No overload signature accepts the arguments
    #[error("No overload matches arguments ({})", render_list(.args))]
    NoMatchingOverload {
        /// Argument types of the call
        args: Vec<Type>,
    },

    /// Overload signature the implementation cannot serve
    #[error("This overload signature is not compatible with its implementation signature: {signature} vs {implementation}")]
    IncompatibleOverload {
        /// Position of the offending signature
        index: usize,
        /// Offending signature
        signature: FunctionType,
        /// Implementation signature
        implementation: FunctionType,
    },

    /// Type assertion between unrelated types
    #[error("Conversion of type '{from}' to type '{to}' may be a mistake because neither type sufficiently overlaps with the other")]
    InvalidCast {
        /// Asserted expression type
        from: Type,
        /// Assertion target
        to: Type,
    },
}

fn render_list(types: &[Type]) -> String {
    types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matching_overload_message() {
        let err = CheckError::NoMatchingOverload {
            args: vec![Type::number(), Type::boolean()],
        };
        assert_eq!(err.to_string(), "No overload matches arguments (number, boolean)");
    }

    #[test]
    fn test_type_error_is_transparent() {
        let err = CheckError::from(TypeError::UndefinedType {
            name: "Box".to_string(),
        });
        assert_eq!(err.to_string(), "Undefined type: Box");
    }
}
