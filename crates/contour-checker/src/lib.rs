//! Contour Type Checker
//!
//! Checker-side helpers built on the `contour-types` engine.
//!
//! This crate provides:
//! - Type guards and control flow-based type narrowing
//! - Exhaustiveness checking for discriminated unions
//! - Overload resolution
//! - Type assertion (cast) checks
//!
//! # Usage
//!
//! ```
//! use contour_checker::{NarrowingEnv, TypeGuard};
//! use contour_types::Type;
//!
//! let declared = Type::union(vec![Type::string(), Type::number()]).unwrap();
//! let guard = TypeGuard::type_of("x", "string");
//!
//! let (then_env, else_env) = NarrowingEnv::new().branch(&guard, &declared);
//! assert_eq!(then_env.get("x"), Some(&Type::string()));
//! assert_eq!(else_env.get("x"), Some(&Type::number()));
//! ```

#![warn(missing_docs)]

pub mod type_guards;
pub mod narrowing;
pub mod exhaustiveness;
pub mod overload;
pub mod cast;
pub mod error;

// Re-export main types
pub use type_guards::{is_typeof_name, TypeGuard, TYPEOF_NAMES};
pub use narrowing::{apply_type_guard, NarrowingEnv};
pub use exhaustiveness::{
    check_exhaustiveness, check_inferred_exhaustiveness, check_switch_exhaustiveness,
    check_typeof_exhaustiveness, unhandled_type, CaseLabel, ExhaustivenessResult,
};
pub use overload::{
    is_compatible_implementation, resolve_overload, resolve_overload_with, OverloadSet,
};
pub use cast::{check_cast, is_valid_cast, is_valid_cast_with, non_null};
pub use error::CheckError;
