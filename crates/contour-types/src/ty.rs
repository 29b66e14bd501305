//! Core type definitions for the Contour type model
//!
//! Types are immutable, tree-shaped values. Composite types own their members;
//! generic parameters are referenced by name from a generic body, never by
//! pointer, so every `Type` is a finite acyclic tree.
//!
//! Union and intersection members are stored in a canonical (sorted,
//! deduplicated) order and object fields live in an ordered map. Because of
//! that, the derived `PartialEq` is structural equality: two types compare
//! equal iff they describe the same set of values, independent of the order
//! members or fields were written in.

use crate::assignability::is_assignable;
use crate::error::TypeError;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveType {
    /// The `number` type (IEEE 754 double precision)
    Number,
    /// The `string` type
    String,
    /// The `boolean` type
    Boolean,
    /// The `null` type
    Null,
    /// The `undefined` type
    Undefined,
    /// The `symbol` type
    Symbol,
    /// The `bigint` type
    BigInt,
    /// The `void` type: the result of a function is not used
    Void,
}

impl PrimitiveType {
    /// Every primitive, in declaration order
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Number,
        PrimitiveType::String,
        PrimitiveType::Boolean,
        PrimitiveType::Null,
        PrimitiveType::Undefined,
        PrimitiveType::Symbol,
        PrimitiveType::BigInt,
        PrimitiveType::Void,
    ];

    /// Source-level name of the primitive
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveType::Number => "number",
            PrimitiveType::String => "string",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Null => "null",
            PrimitiveType::Undefined => "undefined",
            PrimitiveType::Symbol => "symbol",
            PrimitiveType::BigInt => "bigint",
            PrimitiveType::Void => "void",
        }
    }

    /// Look a primitive up by its source-level name
    pub fn from_name(name: &str) -> Option<PrimitiveType> {
        Self::ALL.into_iter().find(|p| p.type_name() == name)
    }

    /// `null` and `undefined` have exactly one inhabitant each
    pub fn is_nullish(&self) -> bool {
        matches!(self, PrimitiveType::Null | PrimitiveType::Undefined)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A single literal value used as a type: `"bird"`, `42`, `true`, `10n`
#[derive(Debug, Clone)]
pub enum LiteralType {
    /// String literal type
    String(String),
    /// Number literal type
    Number(f64),
    /// Boolean literal type
    Boolean(bool),
    /// BigInt literal type, kept as its decimal digits
    BigInt(String),
}

impl LiteralType {
    /// String literal
    pub fn string(value: impl Into<String>) -> Self {
        LiteralType::String(value.into())
    }

    /// Number literal
    pub fn number(value: f64) -> Self {
        LiteralType::Number(value)
    }

    /// Boolean literal
    pub fn boolean(value: bool) -> Self {
        LiteralType::Boolean(value)
    }

    /// BigInt literal
    pub fn bigint(digits: impl Into<String>) -> Self {
        LiteralType::BigInt(digits.into())
    }

    /// The primitive kind this literal belongs to
    pub fn primitive(&self) -> PrimitiveType {
        match self {
            LiteralType::String(_) => PrimitiveType::String,
            LiteralType::Number(_) => PrimitiveType::Number,
            LiteralType::Boolean(_) => PrimitiveType::Boolean,
            LiteralType::BigInt(_) => PrimitiveType::BigInt,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            LiteralType::String(_) => 0,
            LiteralType::Number(_) => 1,
            LiteralType::Boolean(_) => 2,
            LiteralType::BigInt(_) => 3,
        }
    }
}

// All NaNs are one literal; -0 and 0 stay distinct.
fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

fn canonical_f64(value: f64) -> f64 {
    f64::from_bits(canonical_bits(value))
}

impl PartialEq for LiteralType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LiteralType::String(a), LiteralType::String(b)) => a == b,
            (LiteralType::Number(a), LiteralType::Number(b)) => {
                canonical_bits(*a) == canonical_bits(*b)
            }
            (LiteralType::Boolean(a), LiteralType::Boolean(b)) => a == b,
            (LiteralType::BigInt(a), LiteralType::BigInt(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for LiteralType {}

impl Hash for LiteralType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            LiteralType::String(s) | LiteralType::BigInt(s) => s.hash(state),
            LiteralType::Number(n) => canonical_bits(*n).hash(state),
            LiteralType::Boolean(b) => b.hash(state),
        }
    }
}

impl PartialOrd for LiteralType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LiteralType {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (LiteralType::String(a), LiteralType::String(b)) => a.cmp(b),
            (LiteralType::Number(a), LiteralType::Number(b)) => {
                canonical_f64(*a).total_cmp(&canonical_f64(*b))
            }
            (LiteralType::Boolean(a), LiteralType::Boolean(b)) => a.cmp(b),
            (LiteralType::BigInt(a), LiteralType::BigInt(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralType::String(s) => write!(f, "{:?}", s),
            LiteralType::Number(n) => write!(f, "{}", n),
            LiteralType::Boolean(b) => write!(f, "{}", b),
            LiteralType::BigInt(d) => write!(f, "{}n", d),
        }
    }
}

impl From<&str> for LiteralType {
    fn from(value: &str) -> Self {
        LiteralType::String(value.to_string())
    }
}

impl From<String> for LiteralType {
    fn from(value: String) -> Self {
        LiteralType::String(value)
    }
}

impl From<f64> for LiteralType {
    fn from(value: f64) -> Self {
        LiteralType::Number(value)
    }
}

impl From<bool> for LiteralType {
    fn from(value: bool) -> Self {
        LiteralType::Boolean(value)
    }
}

/// Object type property
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Field {
    /// Property type
    pub ty: Type,
    /// Whether the property is optional (`name?: T`)
    pub optional: bool,
    /// Whether the property is readonly
    pub readonly: bool,
}

impl Field {
    /// A required, mutable property
    pub fn required(ty: Type) -> Self {
        Field {
            ty,
            optional: false,
            readonly: false,
        }
    }

    /// An optional property
    pub fn optional(ty: Type) -> Self {
        Field {
            ty,
            optional: true,
            readonly: false,
        }
    }

    /// Mark the property readonly
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }
}

/// Key kind of an index signature: `[key: string]: T`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexKey {
    /// `[key: string]`
    String,
    /// `[key: number]`
    Number,
    /// `[key: symbol]`
    Symbol,
}

impl IndexKey {
    /// Whether a named property falls under this index signature.
    ///
    /// Symbol-keyed properties are not modeled, so a symbol index never
    /// covers a named field.
    pub fn covers(&self, name: &str) -> bool {
        match self {
            IndexKey::String => true,
            IndexKey::Number => name.parse::<f64>().is_ok(),
            IndexKey::Symbol => false,
        }
    }

    /// The key as a type
    pub fn as_type(&self) -> Type {
        match self {
            IndexKey::String => Type::string(),
            IndexKey::Number => Type::number(),
            IndexKey::Symbol => Type::Primitive(PrimitiveType::Symbol),
        }
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::String => write!(f, "string"),
            IndexKey::Number => write!(f, "number"),
            IndexKey::Symbol => write!(f, "symbol"),
        }
    }
}

/// Index signature: `[key: K]: V`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexSignature {
    /// Key kind
    pub key: IndexKey,
    /// Value type every covered property must satisfy
    pub value: Box<Type>,
}

impl IndexSignature {
    /// Build an index signature from a key type.
    ///
    /// Only `string`, `number` and `symbol` are valid key types.
    pub fn new(key: Type, value: Type) -> Result<Self, TypeError> {
        let key = match key {
            Type::Primitive(PrimitiveType::String) => IndexKey::String,
            Type::Primitive(PrimitiveType::Number) => IndexKey::Number,
            Type::Primitive(PrimitiveType::Symbol) => IndexKey::Symbol,
            other => {
                return Err(TypeError::malformed(format!(
                    "index signature key must be string, number or symbol, got {}",
                    other
                )))
            }
        };
        Ok(IndexSignature {
            key,
            value: Box::new(value),
        })
    }
}

/// Object type: `{ prop1: T1, prop2?: T2, [key: string]: V }`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectType {
    fields: BTreeMap<String, Field>,
    index: Option<IndexSignature>,
}

impl ObjectType {
    /// The empty object type `{}`
    pub fn empty() -> Self {
        ObjectType {
            fields: BTreeMap::new(),
            index: None,
        }
    }

    /// Create an object type, rejecting duplicate property names and
    /// properties that contradict the index signature.
    pub fn new(
        fields: impl IntoIterator<Item = (String, Field)>,
        index: Option<IndexSignature>,
    ) -> Result<Self, TypeError> {
        let mut map = BTreeMap::new();
        for (name, field) in fields {
            if map.contains_key(&name) {
                return Err(TypeError::malformed(format!(
                    "duplicate property '{}' in object type",
                    name
                )));
            }
            map.insert(name, field);
        }

        let obj = ObjectType { fields: map, index };
        obj.validate_index_signature()?;
        Ok(obj)
    }

    /// Object type with required properties only
    pub fn with_required<N: Into<String>>(
        fields: impl IntoIterator<Item = (N, Type)>,
    ) -> Result<Self, TypeError> {
        Self::new(
            fields
                .into_iter()
                .map(|(name, ty)| (name.into(), Field::required(ty))),
            None,
        )
    }

    /// Build without validation; used by evaluators that produce objects
    /// from already-valid parts.
    pub(crate) fn from_parts(
        fields: BTreeMap<String, Field>,
        index: Option<IndexSignature>,
    ) -> Self {
        ObjectType { fields, index }
    }

    fn validate_index_signature(&self) -> Result<(), TypeError> {
        let Some(index) = &self.index else {
            return Ok(());
        };
        for (name, field) in &self.fields {
            if index.key.covers(name) && !is_assignable(&field.ty, &index.value) {
                return Err(TypeError::malformed(format!(
                    "property '{}' of type {} is not assignable to index signature [key: {}]: {}",
                    name, field.ty, index.key, index.value
                )));
            }
        }
        Ok(())
    }

    /// Return a new object type with `name` added, or replaced if already present
    pub fn with_field(&self, name: impl Into<String>, field: Field) -> Result<Self, TypeError> {
        let mut fields = self.fields.clone();
        fields.insert(name.into(), field);
        let obj = ObjectType {
            fields,
            index: self.index.clone(),
        };
        obj.validate_index_signature()?;
        Ok(obj)
    }

    /// Return a new object type carrying `index`
    pub fn with_index_signature(&self, index: IndexSignature) -> Result<Self, TypeError> {
        let obj = ObjectType {
            fields: self.fields.clone(),
            index: Some(index),
        };
        obj.validate_index_signature()?;
        Ok(obj)
    }

    /// Properties, ordered by name
    pub fn fields(&self) -> &BTreeMap<String, Field> {
        &self.fields
    }

    /// Look up a property
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// The index signature, if any
    pub fn index_signature(&self) -> Option<&IndexSignature> {
        self.index.as_ref()
    }

    /// Map every property, keeping the index signature
    pub(crate) fn map_fields(&self, mut f: impl FnMut(&Field) -> Field) -> Self {
        ObjectType {
            fields: self
                .fields
                .iter()
                .map(|(name, field)| (name.clone(), f(field)))
                .collect(),
            index: self.index.clone(),
        }
    }
}

/// Array type: `T[]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArrayType {
    /// Element type
    pub element: Box<Type>,
}

/// Tuple type: `[T1, T2, ..., Tn]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TupleType {
    /// Element types
    pub elements: Vec<Type>,
}

/// Function type: `(T1, T2, ..., Tn) => R`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionType {
    /// Parameter types
    pub params: Vec<Type>,
    /// Return type
    pub returns: Box<Type>,
}

impl FunctionType {
    /// Create a function type
    pub fn new(params: Vec<Type>, returns: Type) -> Self {
        FunctionType {
            params,
            returns: Box::new(returns),
        }
    }
}

/// Union type: `T1 | T2 | ... | Tn`
///
/// Members are flattened, deduplicated and sorted; there are always at least
/// two of them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnionType {
    members: Vec<Type>,
}

impl UnionType {
    /// Members of the union
    pub fn members(&self) -> &[Type] {
        &self.members
    }
}

/// Intersection type: `T1 & T2 & ... & Tn`
///
/// Same canonical form as [`UnionType`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntersectionType {
    members: Vec<Type>,
}

impl IntersectionType {
    /// Members of the intersection
    pub fn members(&self) -> &[Type] {
        &self.members
    }
}

/// Type parameter of a generic: `T extends C = D`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenericParam {
    /// Parameter name
    pub name: String,
    /// Constraint: `T extends C`
    pub constraint: Option<Box<Type>>,
    /// Default: `T = D`
    pub default: Option<Box<Type>>,
}

impl GenericParam {
    /// Unconstrained parameter
    pub fn new(name: impl Into<String>) -> Self {
        GenericParam {
            name: name.into(),
            constraint: None,
            default: None,
        }
    }

    /// Add an `extends` constraint
    pub fn with_constraint(mut self, constraint: Type) -> Self {
        self.constraint = Some(Box::new(constraint));
        self
    }

    /// Add a default argument
    pub fn with_default(mut self, default: Type) -> Self {
        self.default = Some(Box::new(default));
        self
    }
}

/// Generic type declaration: `type Box<T extends object> = { value: T }`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenericType {
    /// Declared name
    pub name: String,
    /// Type parameters, in declaration order
    pub params: Vec<GenericParam>,
    /// Body, referencing the parameters by name
    pub body: Box<Type>,
}

impl GenericType {
    /// Create a generic declaration, rejecting duplicate parameter names
    pub fn new(
        name: impl Into<String>,
        params: Vec<GenericParam>,
        body: Type,
    ) -> Result<Self, TypeError> {
        let name = name.into();
        for (i, param) in params.iter().enumerate() {
            if params[..i].iter().any(|p| p.name == param.name) {
                return Err(TypeError::malformed(format!(
                    "duplicate type parameter '{}' in generic '{}'",
                    param.name, name
                )));
            }
        }
        Ok(GenericType {
            name,
            params,
            body: Box::new(body),
        })
    }
}

/// By-name application of a generic: `Box<number>`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeReference {
    /// Name of the referenced generic
    pub name: String,
    /// Type arguments
    pub args: Vec<Type>,
}

/// The core type representation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Type {
    /// Primitive type (number, string, boolean, null, undefined, symbol, bigint)
    Primitive(PrimitiveType),

    /// Literal type: `"bird"`, `42`, `true`
    Literal(LiteralType),

    /// Object type: `{ prop: T }`
    Object(ObjectType),

    /// Array type: `T[]`
    Array(ArrayType),

    /// Tuple type: `[T1, T2, ..., Tn]`
    Tuple(TupleType),

    /// Function type: `(params) => return`
    Function(FunctionType),

    /// Union type: `T1 | T2 | ... | Tn`
    Union(UnionType),

    /// Intersection type: `T1 & T2 & ... & Tn`
    Intersection(IntersectionType),

    /// Bottom type
    Never,

    /// Escape hatch, assignable to and from everything
    Any,

    /// Top type
    Unknown,

    /// Generic parameter reference: `T`
    Param(GenericParam),

    /// Generic declaration
    Generic(GenericType),

    /// Generic application by name: `Box<number>`
    Reference(TypeReference),
}

impl Type {
    /// `number`
    pub fn number() -> Type {
        Type::Primitive(PrimitiveType::Number)
    }

    /// `string`
    pub fn string() -> Type {
        Type::Primitive(PrimitiveType::String)
    }

    /// `boolean`
    pub fn boolean() -> Type {
        Type::Primitive(PrimitiveType::Boolean)
    }

    /// `null`
    pub fn null() -> Type {
        Type::Primitive(PrimitiveType::Null)
    }

    /// `undefined`
    pub fn undefined() -> Type {
        Type::Primitive(PrimitiveType::Undefined)
    }

    /// `void`
    pub fn void() -> Type {
        Type::Primitive(PrimitiveType::Void)
    }

    /// String literal type
    pub fn string_literal(value: impl Into<String>) -> Type {
        Type::Literal(LiteralType::String(value.into()))
    }

    /// Number literal type
    pub fn number_literal(value: f64) -> Type {
        Type::Literal(LiteralType::Number(value))
    }

    /// Boolean literal type
    pub fn boolean_literal(value: bool) -> Type {
        Type::Literal(LiteralType::Boolean(value))
    }

    /// `T[]`
    pub fn array(element: Type) -> Type {
        Type::Array(ArrayType {
            element: Box::new(element),
        })
    }

    /// `[T1, ..., Tn]`
    pub fn tuple(elements: Vec<Type>) -> Type {
        Type::Tuple(TupleType { elements })
    }

    /// `(params) => returns`
    pub fn function(params: Vec<Type>, returns: Type) -> Type {
        Type::Function(FunctionType::new(params, returns))
    }

    /// Object type with required properties only
    pub fn object<N: Into<String>>(
        fields: impl IntoIterator<Item = (N, Type)>,
    ) -> Result<Type, TypeError> {
        ObjectType::with_required(fields).map(Type::Object)
    }

    /// Unconstrained generic parameter reference
    pub fn param(name: impl Into<String>) -> Type {
        Type::Param(GenericParam::new(name))
    }

    /// `Name<args>`
    pub fn reference(name: impl Into<String>, args: Vec<Type>) -> Type {
        Type::Reference(TypeReference {
            name: name.into(),
            args,
        })
    }

    /// Build a union from its members.
    ///
    /// Nested unions are flattened, duplicates and `never` members dropped.
    /// An empty member list is malformed; a single surviving member is
    /// returned as is. No reduction beyond that happens here (see [`crate::union_of`]).
    pub fn union(members: impl IntoIterator<Item = Type>) -> Result<Type, TypeError> {
        let mut flat = Vec::new();
        for member in members {
            flatten_union(member, &mut flat);
        }
        if flat.is_empty() {
            return Err(TypeError::malformed("union type must have at least one member"));
        }
        Ok(Type::union_from_flat(flat))
    }

    /// Build an intersection from its members.
    ///
    /// Same normalization as [`Type::union`]; see [`crate::intersection_of`]
    /// for the reducing evaluator.
    pub fn intersection(members: impl IntoIterator<Item = Type>) -> Result<Type, TypeError> {
        let mut flat = Vec::new();
        for member in members {
            flatten_intersection(member, &mut flat);
        }
        if flat.is_empty() {
            return Err(TypeError::malformed(
                "intersection type must have at least one member",
            ));
        }
        Ok(Type::intersection_from_flat(flat))
    }

    /// Canonicalize already-flattened, non-empty union members. `never`
    /// members contribute no values and are dropped.
    pub(crate) fn union_from_flat(mut members: Vec<Type>) -> Type {
        members.retain(|m| !m.is_never());
        members.sort();
        members.dedup();
        match members.len() {
            0 => return Type::Never,
            1 => return members.remove(0),
            _ => {}
        }
        Type::Union(UnionType { members })
    }

    /// Canonicalize already-flattened, non-empty intersection members
    pub(crate) fn intersection_from_flat(mut members: Vec<Type>) -> Type {
        members.sort();
        members.dedup();
        if members.len() == 1 {
            return members.remove(0);
        }
        Type::Intersection(IntersectionType { members })
    }

    /// Check if this type is the never type
    pub fn is_never(&self) -> bool {
        matches!(self, Type::Never)
    }

    /// Check if this type is a union type
    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union(_))
    }

    /// Get the object type if this is an object
    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Type::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get the union type if this is a union
    pub fn as_union(&self) -> Option<&UnionType> {
        match self {
            Type::Union(u) => Some(u),
            _ => None,
        }
    }

    /// Get the function type if this is a function
    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(f) => Some(f),
            _ => None,
        }
    }
}

pub(crate) fn flatten_union(ty: Type, out: &mut Vec<Type>) {
    match ty {
        Type::Union(u) => out.extend(u.members),
        other => out.push(other),
    }
}

pub(crate) fn flatten_intersection(ty: Type, out: &mut Vec<Type>) {
    match ty {
        Type::Intersection(i) => out.extend(i.members),
        other => out.push(other),
    }
}

impl From<PrimitiveType> for Type {
    fn from(p: PrimitiveType) -> Self {
        Type::Primitive(p)
    }
}

impl From<LiteralType> for Type {
    fn from(l: LiteralType) -> Self {
        Type::Literal(l)
    }
}

impl From<ObjectType> for Type {
    fn from(o: ObjectType) -> Self {
        Type::Object(o)
    }
}

impl From<FunctionType> for Type {
    fn from(func: FunctionType) -> Self {
        Type::Function(func)
    }
}

impl From<GenericType> for Type {
    fn from(g: GenericType) -> Self {
        Type::Generic(g)
    }
}

/// Structural equality: true iff `a` and `b` describe the same set of values.
///
/// Member and field order never matters because both are kept canonical.
pub fn equal_types(a: &Type, b: &Type) -> bool {
    a == b
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Type], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write_operand(f, item)?;
    }
    Ok(())
}

// Parenthesize composites inside `|`, `&` and `[]`.
fn write_operand(f: &mut fmt::Formatter<'_>, ty: &Type) -> fmt::Result {
    match ty {
        Type::Union(_) | Type::Intersection(_) | Type::Function(_) => write!(f, "({})", ty),
        _ => write!(f, "{}", ty),
    }
}

impl fmt::Display for GenericParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(constraint) = &self.constraint {
            write!(f, " extends {}", constraint)?;
        }
        if let Some(default) = &self.default {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "arg{}: {}", i, param)?;
        }
        write!(f, ") => {}", self.returns)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() && self.index.is_none() {
            return write!(f, "{{}}");
        }
        write!(f, "{{ ")?;
        let mut first = true;
        for (name, field) in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            if field.readonly {
                write!(f, "readonly ")?;
            }
            write!(f, "{}", name)?;
            if field.optional {
                write!(f, "?")?;
            }
            write!(f, ": {}", field.ty)?;
        }
        if let Some(index) = &self.index {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "[key: {}]: {}", index.key, index.value)?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(p) => write!(f, "{}", p),
            Type::Literal(l) => write!(f, "{}", l),
            Type::Object(o) => write!(f, "{}", o),
            Type::Array(a) => {
                write_operand(f, &a.element)?;
                write!(f, "[]")
            }
            Type::Tuple(t) => {
                write!(f, "[")?;
                for (i, elem) in t.elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", elem)?;
                }
                write!(f, "]")
            }
            Type::Function(func) => write!(f, "{}", func),
            Type::Union(u) => write_list(f, &u.members, " | "),
            Type::Intersection(i) => write_list(f, &i.members, " & "),
            Type::Never => write!(f, "never"),
            Type::Any => write!(f, "any"),
            Type::Unknown => write!(f, "unknown"),
            Type::Param(p) => write!(f, "{}", p.name),
            Type::Generic(g) => {
                write!(f, "{}<", g.name)?;
                for (i, param) in g.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, "> = {}", g.body)
            }
            Type::Reference(r) => {
                write!(f, "{}", r.name)?;
                if !r.args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in r.args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
        }
    }
}
