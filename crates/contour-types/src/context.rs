//! Type context for named generics and aliases

use crate::assignability::AssignabilityContext;
use crate::config::CheckerConfig;
use crate::error::TypeError;
use crate::generics::GenericContext;
use crate::ty::{GenericType, Type, TypeReference};
use rustc_hash::FxHashMap;

/// Registry of named type declarations.
///
/// [`Type::Reference`] nodes are resolved against this registry: during
/// instantiation (so `Box<Box<number>>` expands fully) and during
/// assignability checks made through
/// [`AssignabilityContext::with_type_context`].
#[derive(Debug, Clone, Default)]
pub struct TypeContext {
    /// Named declarations; a plain alias is a generic without parameters
    named_types: FxHashMap<String, GenericType>,

    /// Configuration used for constraint checks during instantiation
    config: CheckerConfig,
}

impl TypeContext {
    /// Create a new empty type context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty context that checks constraints under `config`
    pub fn with_config(config: CheckerConfig) -> Self {
        TypeContext {
            named_types: FxHashMap::default(),
            config,
        }
    }

    /// Configuration used by this context
    pub fn config(&self) -> CheckerConfig {
        self.config
    }

    /// Register a generic declaration under its own name, replacing any
    /// earlier declaration with that name
    pub fn register_generic(&mut self, generic: GenericType) {
        tracing::trace!(name = %generic.name, params = generic.params.len(), "register generic");
        self.named_types.insert(generic.name.clone(), generic);
    }

    /// Register a non-generic alias: `type Name = ty`
    pub fn register_alias(&mut self, name: impl Into<String>, ty: Type) {
        let name = name.into();
        self.register_generic(GenericType {
            name,
            params: Vec::new(),
            body: Box::new(ty),
        });
    }

    /// Look up a named declaration
    pub fn lookup_generic(&self, name: &str) -> Option<&GenericType> {
        self.named_types.get(name)
    }

    /// Look up a named declaration, failing if it does not exist
    pub fn resolve_generic(&self, name: &str) -> Result<&GenericType, TypeError> {
        self.lookup_generic(name)
            .ok_or_else(|| TypeError::UndefinedType {
                name: name.to_string(),
            })
    }

    /// Check whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.named_types.contains_key(name)
    }

    /// Number of registered declarations
    pub fn len(&self) -> usize {
        self.named_types.len()
    }

    /// Check if no declarations are registered
    pub fn is_empty(&self) -> bool {
        self.named_types.is_empty()
    }

    /// Instantiate `generic`, expanding references to registered names
    pub fn instantiate(&self, generic: &GenericType, args: &[Type]) -> Result<Type, TypeError> {
        GenericContext::new(self.config, Some(self)).instantiate(generic, args)
    }

    /// Instantiate the registered generic `name` with `args`
    pub fn instantiate_named(&self, name: &str, args: &[Type]) -> Result<Type, TypeError> {
        let generic = self.resolve_generic(name)?;
        self.instantiate(generic, args)
    }

    /// Expand a by-name reference
    pub fn instantiate_reference(&self, reference: &TypeReference) -> Result<Type, TypeError> {
        self.instantiate_named(&reference.name, &reference.args)
    }

    /// Expand a type: references to registered names are replaced by their
    /// instantiated bodies, everything else is returned unchanged.
    pub fn expand(&self, ty: &Type) -> Result<Type, TypeError> {
        match ty {
            Type::Reference(reference) if self.contains(&reference.name) => {
                self.instantiate_reference(reference)
            }
            _ => Ok(ty.clone()),
        }
    }

    /// Assignability with references resolved against this context
    pub fn is_assignable(&self, source: &Type, target: &Type) -> bool {
        AssignabilityContext::with_type_context(self.config, self).is_assignable(source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::{GenericParam, ObjectType};
    use pretty_assertions::assert_eq;

    fn boxed() -> GenericType {
        GenericType::new(
            "Box",
            vec![GenericParam::new("T").with_constraint(Type::Unknown)],
            Type::object(vec![("value", Type::param("T"))]).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut ctx = TypeContext::new();
        assert!(ctx.is_empty());

        ctx.register_generic(boxed());
        assert_eq!(ctx.len(), 1);
        assert!(ctx.contains("Box"));
        assert_eq!(ctx.lookup_generic("Box"), Some(&boxed()));
    }

    #[test]
    fn test_resolve_undefined() {
        let ctx = TypeContext::new();
        assert_eq!(
            ctx.resolve_generic("Missing"),
            Err(TypeError::UndefinedType {
                name: "Missing".to_string()
            })
        );
    }

    #[test]
    fn test_nested_reference_expands() {
        let mut ctx = TypeContext::new();
        ctx.register_generic(boxed());

        let inner = Type::reference("Box", vec![Type::number()]);
        let result = ctx.instantiate_named("Box", &[inner]).unwrap();

        let expected = Type::object(vec![(
            "value",
            Type::object(vec![("value", Type::number())]).unwrap(),
        )])
        .unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_self_referencing_generic() {
        let mut ctx = TypeContext::new();
        ctx.register_generic(
            GenericType::new(
                "List",
                vec![GenericParam::new("T")],
                Type::object(vec![
                    ("head", Type::param("T")),
                    ("tail", Type::reference("List", vec![Type::param("T")])),
                ])
                .unwrap(),
            )
            .unwrap(),
        );

        assert_eq!(
            ctx.instantiate_named("List", &[Type::number()]),
            Err(TypeError::RecursiveGeneric {
                name: "List".to_string()
            })
        );
    }

    #[test]
    fn test_mutually_recursive_generics() {
        let mut ctx = TypeContext::new();
        ctx.register_generic(
            GenericType::new(
                "A",
                vec![GenericParam::new("T")],
                Type::array(Type::reference("B", vec![Type::param("T")])),
            )
            .unwrap(),
        );
        ctx.register_generic(
            GenericType::new(
                "B",
                vec![GenericParam::new("T")],
                Type::array(Type::reference("A", vec![Type::param("T")])),
            )
            .unwrap(),
        );

        assert!(matches!(
            ctx.instantiate_named("A", &[Type::string()]),
            Err(TypeError::RecursiveGeneric { .. })
        ));
    }

    #[test]
    fn test_alias_expansion() {
        let mut ctx = TypeContext::new();
        let id = Type::union(vec![Type::number(), Type::string()]).unwrap();
        ctx.register_alias("Id", id.clone());

        assert_eq!(ctx.expand(&Type::reference("Id", vec![])).unwrap(), id);
        // Unregistered references are returned as is
        let opaque = Type::reference("Promise", vec![Type::number()]);
        assert_eq!(ctx.expand(&opaque).unwrap(), opaque);
    }

    #[test]
    fn test_assignability_through_references() {
        let mut ctx = TypeContext::new();
        ctx.register_generic(boxed());

        let box_number = Type::reference("Box", vec![Type::number()]);
        let structural = Type::object(vec![("value", Type::number())]).unwrap();
        let loose = Type::Object(ObjectType::empty());

        assert!(ctx.is_assignable(&box_number, &structural));
        assert!(ctx.is_assignable(&structural, &box_number));
        assert!(ctx.is_assignable(&box_number, &loose));
        assert!(!ctx.is_assignable(&box_number, &Type::reference("Box", vec![Type::string()])));
    }
}
