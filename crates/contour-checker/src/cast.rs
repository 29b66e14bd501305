//! Type assertions
//!
//! `expr as T` and `<T>expr` change the static type of an expression
//! without a runtime check. They are accepted when the two types overlap,
//! i.e. either one is assignable to the other. The non-null assertion
//! `expr!` removes `null` and `undefined`.

use crate::error::CheckError;
use crate::narrowing::apply_type_guard;
use crate::type_guards::TypeGuard;
use contour_types::{AssignabilityContext, Type};

/// Check whether asserting `from` as `to` is allowed
pub fn is_valid_cast(from: &Type, to: &Type) -> bool {
    is_valid_cast_with(&AssignabilityContext::default(), from, to)
}

/// [`is_valid_cast`] under an explicit assignability context
pub fn is_valid_cast_with(ctx: &AssignabilityContext<'_>, from: &Type, to: &Type) -> bool {
    ctx.is_assignable(from, to) || ctx.is_assignable(to, from)
}

/// Type of `from as to`, or the reason the assertion is rejected
pub fn check_cast(from: &Type, to: &Type) -> Result<Type, CheckError> {
    if is_valid_cast(from, to) {
        Ok(to.clone())
    } else {
        tracing::debug!(%from, %to, "rejected type assertion");
        Err(CheckError::InvalidCast {
            from: from.clone(),
            to: to.clone(),
        })
    }
}

/// Type of `expr!`
pub fn non_null(ty: &Type) -> Type {
    apply_type_guard(ty, &TypeGuard::is_nullish("").negate())
}
