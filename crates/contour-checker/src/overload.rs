//! Function overload resolution
//!
//! An overloaded function declares several call signatures followed by one
//! implementation signature:
//!
//! ```text
//! function add(a: number, b: number): number;
//! function add(a: string, b: string): string;
//! function add(a: Combinable, b: Combinable) { ... }
//! ```
//!
//! Calls are checked against the declared signatures in order; the
//! implementation signature is not callable from outside.

use crate::error::CheckError;
use contour_types::{AssignabilityContext, FunctionType, Type};

/// Pick the first signature whose parameters accept `args`
///
/// Argument and parameter counts must match exactly.
pub fn resolve_overload<'o>(
    overloads: &'o [FunctionType],
    args: &[Type],
) -> Result<&'o FunctionType, CheckError> {
    resolve_overload_with(&AssignabilityContext::default(), overloads, args)
}

/// [`resolve_overload`] under an explicit assignability context
pub fn resolve_overload_with<'o>(
    ctx: &AssignabilityContext<'_>,
    overloads: &'o [FunctionType],
    args: &[Type],
) -> Result<&'o FunctionType, CheckError> {
    overloads
        .iter()
        .find(|signature| accepts(ctx, signature, args))
        .ok_or_else(|| {
            tracing::debug!(candidates = overloads.len(), "no overload matches");
            CheckError::NoMatchingOverload {
                args: args.to_vec(),
            }
        })
}

fn accepts(ctx: &AssignabilityContext<'_>, signature: &FunctionType, args: &[Type]) -> bool {
    signature.params.len() == args.len()
        && args
            .iter()
            .zip(&signature.params)
            .all(|(arg, param)| ctx.is_assignable(arg, param))
}

/// Check that `implementation` can serve `signature`: it accepts every
/// argument the signature admits, and its return type is related to the
/// signature's in either direction.
pub fn is_compatible_implementation(signature: &FunctionType, implementation: &FunctionType) -> bool {
    let ctx = AssignabilityContext::default();
    signature.params.len() >= implementation.params.len()
        && signature
            .params
            .iter()
            .zip(&implementation.params)
            .all(|(sig, imp)| ctx.is_assignable(sig, imp))
        && (ctx.is_assignable(&implementation.returns, &signature.returns)
            || ctx.is_assignable(&signature.returns, &implementation.returns))
}

/// An overloaded function: its call signatures and, optionally, the
/// implementation behind them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverloadSet {
    /// Function name
    pub name: String,
    /// Call signatures in declaration order
    signatures: Vec<FunctionType>,
    /// Implementation signature
    implementation: Option<FunctionType>,
}

impl OverloadSet {
    /// Create an overload set from call signatures alone (e.g., an ambient
    /// declaration)
    pub fn new(name: impl Into<String>, signatures: Vec<FunctionType>) -> Self {
        OverloadSet {
            name: name.into(),
            signatures,
            implementation: None,
        }
    }

    /// Create an overload set, checking every signature against the
    /// implementation
    pub fn with_implementation(
        name: impl Into<String>,
        signatures: Vec<FunctionType>,
        implementation: FunctionType,
    ) -> Result<Self, CheckError> {
        for (index, signature) in signatures.iter().enumerate() {
            if !is_compatible_implementation(signature, &implementation) {
                return Err(CheckError::IncompatibleOverload {
                    index,
                    signature: signature.clone(),
                    implementation,
                });
            }
        }
        Ok(OverloadSet {
            name: name.into(),
            signatures,
            implementation: Some(implementation),
        })
    }

    /// Call signatures in declaration order
    pub fn signatures(&self) -> &[FunctionType] {
        &self.signatures
    }

    /// Implementation signature, if known
    pub fn implementation(&self) -> Option<&FunctionType> {
        self.implementation.as_ref()
    }

    /// Resolve a call
    pub fn resolve(&self, args: &[Type]) -> Result<&FunctionType, CheckError> {
        resolve_overload(&self.signatures, args)
    }

    /// Type of a call expression with `args`
    pub fn call_return_type(&self, args: &[Type]) -> Result<Type, CheckError> {
        self.resolve(args).map(|signature| (*signature.returns).clone())
    }
}
