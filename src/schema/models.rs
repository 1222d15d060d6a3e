//! # Schema Document Models
//!
//! definition of Intermediate Representation (IR) structures for a parsed,
//! annotated schema document. A host parser (GraphQL or another IDL) produces
//! these values; the generator only reads them.

use crate::schema::markers::{has_marker, names};

/// A literal value carried by a marker argument.
///
/// Lookup returns the typed value node once; callers narrow with the
/// `as_*` accessors. Absence and kind mismatch both yield `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerValue {
    /// A quoted string literal.
    String(String),
    /// An integer literal.
    Int(i64),
    /// A floating point literal.
    Float(f64),
    /// A boolean literal.
    Boolean(bool),
    /// A bare enum-member name (e.g. `HIERARCHY`).
    Enum(String),
    /// An ordered list of literal values.
    List(Vec<MarkerValue>),
}

impl MarkerValue {
    /// Narrows to a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MarkerValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Narrows to an integer literal.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            MarkerValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Narrows to a float literal.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            MarkerValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Narrows to a boolean literal.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MarkerValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Narrows to an enum-member name.
    pub fn as_enum_name(&self) -> Option<&str> {
        match self {
            MarkerValue::Enum(name) => Some(name),
            _ => None,
        }
    }

    /// Narrows to a list of values.
    pub fn as_list(&self) -> Option<&[MarkerValue]> {
        match self {
            MarkerValue::List(values) => Some(values),
            _ => None,
        }
    }
}

/// A single named argument on a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerArgument {
    /// The argument name.
    pub name: String,
    /// The literal value.
    pub value: MarkerValue,
}

/// A declarative annotation attached to a type or field.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// The marker name (see [`crate::schema::markers::names`]).
    pub name: String,
    /// Named arguments in declaration order.
    pub arguments: Vec<MarkerArgument>,
}

impl Marker {
    /// Creates a marker with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Adds a named argument.
    pub fn with_argument(mut self, name: impl Into<String>, value: MarkerValue) -> Self {
        self.arguments.push(MarkerArgument {
            name: name.into(),
            value,
        });
        self
    }

    /// Looks up an argument's value node by name (first match in
    /// declaration order). No coercion is performed here.
    pub fn argument(&self, name: &str) -> Option<&MarkerValue> {
        self.arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }

    /// Looks up a string argument.
    pub fn string_argument(&self, name: &str) -> Option<&str> {
        self.argument(name).and_then(MarkerValue::as_str)
    }

    /// Looks up an integer argument.
    pub fn int_argument(&self, name: &str) -> Option<i64> {
        self.argument(name).and_then(MarkerValue::as_int)
    }

    /// Looks up a boolean argument.
    pub fn bool_argument(&self, name: &str) -> Option<bool> {
        self.argument(name).and_then(MarkerValue::as_bool)
    }

    /// Looks up an enum-member argument.
    pub fn enum_argument(&self, name: &str) -> Option<&str> {
        self.argument(name).and_then(MarkerValue::as_enum_name)
    }

    /// Looks up a list argument and collects its string entries.
    /// Entries of another literal kind are skipped.
    pub fn string_list_argument(&self, name: &str) -> Option<Vec<&str>> {
        self.argument(name)
            .and_then(MarkerValue::as_list)
            .map(|values| values.iter().filter_map(MarkerValue::as_str).collect())
    }
}

/// A field's declared type, possibly wrapped in list/required modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A reference to a named type (`String`, `Article`, ...).
    Named(String),
    /// A list of the inner type (`[T]`).
    List(Box<TypeRef>),
    /// A required (non-nullable) wrapper around the inner type (`T!`).
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Creates a named type reference.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// Wraps a type reference in a list.
    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    /// Wraps a type reference in a required modifier.
    pub fn non_null(inner: TypeRef) -> Self {
        TypeRef::NonNull(Box::new(inner))
    }
}

/// A field belonging to an object type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    /// The field name.
    pub name: String,
    /// The declared type reference.
    pub ty: TypeRef,
    /// The field-level description, if declared.
    pub description: Option<String>,
    /// Markers attached to the field, in declaration order.
    pub markers: Vec<Marker>,
}

impl FieldDefinition {
    /// Creates a field with the required name and type.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            description: None,
            markers: Vec::new(),
        }
    }

    /// Sets the field description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches a marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }
}

/// An object type definition with an ordered field list.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDefinition {
    /// The type name.
    pub name: String,
    /// The type-level description, if declared.
    pub description: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDefinition>,
    /// Markers attached to the type.
    pub markers: Vec<Marker>,
}

impl ObjectDefinition {
    /// Creates an object definition with the required name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Sets the type description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a field.
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Attaches a marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }
}

/// An enum type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDefinition {
    /// The type name.
    pub name: String,
    /// The type-level description, if declared.
    pub description: Option<String>,
    /// Member names in declaration order.
    pub values: Vec<String>,
    /// Markers attached to the type.
    pub markers: Vec<Marker>,
}

impl EnumDefinition {
    /// Creates an enum definition with the required name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Adds a member name.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }
}

/// A union type definition over named object types.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionDefinition {
    /// The type name.
    pub name: String,
    /// The type-level description, if declared.
    pub description: Option<String>,
    /// Member type names in declaration order.
    pub members: Vec<String>,
    /// Markers attached to the type.
    pub markers: Vec<Marker>,
}

impl UnionDefinition {
    /// Creates a union definition with the required name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            members: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Adds a member type name.
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.members.push(member.into());
        self
    }
}

/// A scalar type declaration (e.g. the `Image`/`Video` media scalars).
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarDefinition {
    /// The scalar name.
    pub name: String,
    /// The type-level description, if declared.
    pub description: Option<String>,
    /// Markers attached to the scalar.
    pub markers: Vec<Marker>,
}

impl ScalarDefinition {
    /// Creates a scalar definition with the required name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            markers: Vec::new(),
        }
    }
}

/// Enum wrapper over the type definition kinds.
///
/// Classification consumes this with exhaustive pattern matching, so an
/// unhandled kind is a compile error rather than a silent fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    /// An object type.
    Object(ObjectDefinition),
    /// An enum type.
    Enum(EnumDefinition),
    /// A union type.
    Union(UnionDefinition),
    /// A scalar type.
    Scalar(ScalarDefinition),
}

impl TypeDefinition {
    /// Returns the name of the definition.
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Object(def) => &def.name,
            TypeDefinition::Enum(def) => &def.name,
            TypeDefinition::Union(def) => &def.name,
            TypeDefinition::Scalar(def) => &def.name,
        }
    }
}

/// The full parsed set of type definitions forming a closed namespace.
///
/// Immutable for the duration of a generation run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaDocument {
    /// All type definitions in declaration order.
    pub definitions: Vec<TypeDefinition>,
}

impl SchemaDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type definition.
    pub fn with_definition(mut self, definition: TypeDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Adds an object type definition.
    pub fn with_object(self, object: ObjectDefinition) -> Self {
        self.with_definition(TypeDefinition::Object(object))
    }

    /// Adds an enum type definition.
    pub fn with_enum(self, def: EnumDefinition) -> Self {
        self.with_definition(TypeDefinition::Enum(def))
    }

    /// Adds a union type definition.
    pub fn with_union(self, def: UnionDefinition) -> Self {
        self.with_definition(TypeDefinition::Union(def))
    }

    /// Adds a scalar type definition.
    pub fn with_scalar(self, def: ScalarDefinition) -> Self {
        self.with_definition(TypeDefinition::Scalar(def))
    }

    /// Looks up a type definition by name.
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.definitions.iter().find(|def| def.name() == name)
    }

    /// Iterates over all object type definitions in declaration order.
    pub fn object_types(&self) -> impl Iterator<Item = &ObjectDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            TypeDefinition::Object(object) => Some(object),
            _ => None,
        })
    }

    /// Iterates over the object types carrying the content-type marker,
    /// i.e. the types that become generated documents.
    pub fn content_types(&self) -> impl Iterator<Item = &ObjectDefinition> {
        self.object_types()
            .filter(|object| has_marker(*object, names::CONTENT_TYPE))
    }
}
