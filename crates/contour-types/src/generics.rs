//! Generic instantiation
//!
//! Instantiation binds a generic's parameters to concrete arguments, checks
//! declared constraints, and rewrites the body into a fresh tree with every
//! parameter replaced. References to other generics are expanded when a
//! [`TypeContext`] is available; a generic that is re-entered while it is
//! still being expanded is reported as [`TypeError::RecursiveGeneric`].

use crate::assignability::AssignabilityContext;
use crate::config::CheckerConfig;
use crate::context::TypeContext;
use crate::error::TypeError;
use crate::ty::{
    ArrayType, FunctionType, GenericParam, GenericType, IndexSignature, ObjectType, TupleType,
    Type, TypeReference,
};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Parameter name to argument bindings for one instantiation
type Bindings = FxHashMap<String, Type>;

/// Instantiation state for a single top-level call
pub(crate) struct GenericContext<'a> {
    /// Registry used to expand references, if any
    type_ctx: Option<&'a TypeContext>,

    /// Configuration for constraint checks
    config: CheckerConfig,

    /// Generics currently being expanded, outermost first
    active: Vec<String>,
}

impl<'a> GenericContext<'a> {
    pub(crate) fn new(config: CheckerConfig, type_ctx: Option<&'a TypeContext>) -> Self {
        GenericContext {
            type_ctx,
            config,
            active: Vec::new(),
        }
    }

    fn assignability(&self) -> AssignabilityContext<'a> {
        match self.type_ctx {
            Some(ctx) => AssignabilityContext::with_type_context(self.config, ctx),
            None => AssignabilityContext::new(self.config),
        }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(generic = %generic.name, args = args.len()))]
    pub(crate) fn instantiate(
        &mut self,
        generic: &GenericType,
        args: &[Type],
    ) -> Result<Type, TypeError> {
        if self.active.iter().any(|name| *name == generic.name) {
            tracing::debug!(generic = %generic.name, "recursive generic expansion");
            return Err(TypeError::RecursiveGeneric {
                name: generic.name.clone(),
            });
        }

        // Arguments are expanded before the generic becomes active, so
        // `Box<Box<number>>` is fine while a self-referencing body is not.
        let args = args
            .iter()
            .map(|arg| self.substitute(arg, &Bindings::default()))
            .collect::<Result<Vec<_>, _>>()?;

        self.active.push(generic.name.clone());
        let result = self.bind_and_substitute(generic, args);
        self.active.pop();
        result
    }

    fn bind_and_substitute(
        &mut self,
        generic: &GenericType,
        mut args: Vec<Type>,
    ) -> Result<Type, TypeError> {
        let provided = args.len();
        let mut bindings = Bindings::default();

        // Defaults fill missing trailing arguments
        if args.len() < generic.params.len() {
            for (param, arg) in generic.params.iter().zip(&args) {
                bindings.insert(param.name.clone(), arg.clone());
            }
            for param in &generic.params[args.len()..] {
                let Some(default) = &param.default else {
                    break;
                };
                let filled = self.substitute(default, &bindings)?;
                bindings.insert(param.name.clone(), filled.clone());
                args.push(filled);
            }
        }

        if args.len() != generic.params.len() {
            return Err(TypeError::ArityMismatch {
                name: generic.name.clone(),
                expected: generic.params.len(),
                actual: provided,
            });
        }

        bindings.clear();
        for (param, arg) in generic.params.iter().zip(args) {
            if let Some(constraint) = &param.constraint {
                // Constraints may mention earlier parameters: U extends keyof T
                let constraint = self.substitute(constraint, &bindings)?;
                if !self.assignability().is_assignable(&arg, &constraint) {
                    tracing::debug!(param = %param.name, %arg, %constraint, "constraint violated");
                    return Err(TypeError::ConstraintViolation {
                        param: param.name.clone(),
                        arg,
                        constraint,
                    });
                }
            }
            bindings.insert(param.name.clone(), arg);
        }

        self.substitute(&generic.body, &bindings)
    }

    /// Rewrite `ty` with `bindings` applied, expanding references on the way
    fn substitute(&mut self, ty: &Type, bindings: &Bindings) -> Result<Type, TypeError> {
        Ok(match ty {
            Type::Param(param) => match bindings.get(&param.name) {
                Some(arg) => arg.clone(),
                // Free parameter of an enclosing scope
                None => Type::Param(self.substitute_param(param, bindings)?),
            },

            Type::Reference(reference) => return self.substitute_reference(reference, bindings),

            Type::Generic(inner) => {
                // Inner declarations shadow the names they bind
                let mut scoped = bindings.clone();
                for param in &inner.params {
                    scoped.remove(&param.name);
                }
                let params = inner
                    .params
                    .iter()
                    .map(|param| self.substitute_param(param, &scoped))
                    .collect::<Result<Vec<_>, _>>()?;
                let body = self.substitute(&inner.body, &scoped)?;
                Type::Generic(GenericType {
                    name: inner.name.clone(),
                    params,
                    body: Box::new(body),
                })
            }

            Type::Object(obj) => {
                let mut fields = BTreeMap::new();
                for (name, field) in obj.fields() {
                    let mut field = field.clone();
                    field.ty = self.substitute(&field.ty, bindings)?;
                    fields.insert(name.clone(), field);
                }
                let index = match obj.index_signature() {
                    Some(index) => Some(IndexSignature {
                        key: index.key,
                        value: Box::new(self.substitute(&index.value, bindings)?),
                    }),
                    None => None,
                };
                Type::Object(ObjectType::from_parts(fields, index))
            }

            Type::Array(arr) => Type::Array(ArrayType {
                element: Box::new(self.substitute(&arr.element, bindings)?),
            }),

            Type::Tuple(tuple) => Type::Tuple(TupleType {
                elements: self.substitute_all(&tuple.elements, bindings)?,
            }),

            Type::Function(func) => Type::Function(FunctionType {
                params: self.substitute_all(&func.params, bindings)?,
                returns: Box::new(self.substitute(&func.returns, bindings)?),
            }),

            Type::Union(union) => Type::union(self.substitute_all(union.members(), bindings)?)?,

            Type::Intersection(intersection) => {
                Type::intersection(self.substitute_all(intersection.members(), bindings)?)?
            }

            Type::Primitive(_)
            | Type::Literal(_)
            | Type::Never
            | Type::Any
            | Type::Unknown => ty.clone(),
        })
    }

    fn substitute_all(&mut self, types: &[Type], bindings: &Bindings) -> Result<Vec<Type>, TypeError> {
        types.iter().map(|ty| self.substitute(ty, bindings)).collect()
    }

    fn substitute_param(
        &mut self,
        param: &GenericParam,
        bindings: &Bindings,
    ) -> Result<GenericParam, TypeError> {
        let constraint = match &param.constraint {
            Some(c) => Some(Box::new(self.substitute(c, bindings)?)),
            None => None,
        };
        let default = match &param.default {
            Some(d) => Some(Box::new(self.substitute(d, bindings)?)),
            None => None,
        };
        Ok(GenericParam {
            name: param.name.clone(),
            constraint,
            default,
        })
    }

    fn substitute_reference(
        &mut self,
        reference: &TypeReference,
        bindings: &Bindings,
    ) -> Result<Type, TypeError> {
        if self.active.iter().any(|name| *name == reference.name) {
            tracing::debug!(generic = %reference.name, "recursive generic reference");
            return Err(TypeError::RecursiveGeneric {
                name: reference.name.clone(),
            });
        }

        let args = self.substitute_all(&reference.args, bindings)?;
        match self.type_ctx.and_then(|ctx| ctx.lookup_generic(&reference.name)) {
            Some(generic) => self.instantiate(generic, &args),
            // Unregistered names stay opaque
            None => Ok(Type::Reference(TypeReference {
                name: reference.name.clone(),
                args,
            })),
        }
    }
}

/// Instantiate `generic` with `args`.
///
/// Fails with [`TypeError::ConstraintViolation`] when an argument does not
/// satisfy its parameter's constraint, [`TypeError::ArityMismatch`] when the
/// argument count is wrong after defaults are applied, and
/// [`TypeError::RecursiveGeneric`] when the body refers back to `generic`.
/// References to other generics are left as opaque references; use
/// [`TypeContext::instantiate`] to expand them.
pub fn instantiate(generic: &GenericType, args: &[Type]) -> Result<Type, TypeError> {
    GenericContext::new(CheckerConfig::default(), None).instantiate(generic, args)
}
