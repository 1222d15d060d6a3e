#![deny(missing_docs)]

//! # Type Classification
//!
//! Resolves a field's declared type through list/required wrappers to its
//! base named type and classifies that base against the schema document.
//! Handles primitives, enums, unions and objects.

use crate::schema::models::{
    EnumDefinition, ObjectDefinition, SchemaDocument, TypeDefinition, TypeRef, UnionDefinition,
};

/// The classified base type of a field, borrowed from the schema document.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeClass<'a> {
    /// A primitive or scalar name (`String`, `Int`, `Float`, `Boolean`,
    /// the media scalars, or an undeclared name).
    Primitive(&'a str),
    /// An enum type defined in the document.
    Enum(&'a EnumDefinition),
    /// A union type defined in the document.
    Union(&'a UnionDefinition),
    /// An object type defined in the document.
    Object(&'a ObjectDefinition),
}

/// Unwraps required and list wrappers recursively to the innermost named
/// type reference. Defined for arbitrarily nested combinations.
pub fn base_type(ty: &TypeRef) -> &TypeRef {
    match ty {
        TypeRef::Named(_) => ty,
        TypeRef::List(inner) | TypeRef::NonNull(inner) => base_type(inner),
    }
}

/// Returns the name of the innermost named type reference.
pub fn type_name(ty: &TypeRef) -> &str {
    match ty {
        TypeRef::Named(name) => name,
        TypeRef::List(inner) | TypeRef::NonNull(inner) => type_name(inner),
    }
}

/// Dispatches on whether the type reference is list-shaped.
///
/// Exactly two shapes count as arrays: a bare list, or a required-wrapped
/// list. Everything else (scalar, required scalar, object, and notably a
/// list nested deeper than one required wrapper) falls through to `other`,
/// which receives the unmodified reference. Callers must treat the `other`
/// arm as the non-array case.
pub fn switch_array<'a, T>(
    ty: &'a TypeRef,
    if_array: impl FnOnce(&'a TypeRef) -> T,
    other: impl FnOnce(&'a TypeRef) -> T,
) -> T {
    match ty {
        TypeRef::List(item) => if_array(item),
        TypeRef::NonNull(inner) => match inner.as_ref() {
            TypeRef::List(item) => if_array(item),
            _ => other(ty),
        },
        _ => other(ty),
    }
}

/// Reports whether the reference is list-shaped per [`switch_array`].
pub fn is_list_type(ty: &TypeRef) -> bool {
    switch_array(ty, |_| true, |_| false)
}

/// Classifies the base type of a reference by looking up its definition
/// in the schema document. Scalar declarations and undeclared names both
/// classify as primitives.
pub fn classify<'a>(ty: &'a TypeRef, schema: &'a SchemaDocument) -> TypeClass<'a> {
    let name = type_name(ty);
    match schema.get_type(name) {
        Some(TypeDefinition::Enum(def)) => TypeClass::Enum(def),
        Some(TypeDefinition::Union(def)) => TypeClass::Union(def),
        Some(TypeDefinition::Object(def)) => TypeClass::Object(def),
        Some(TypeDefinition::Scalar(_)) | None => TypeClass::Primitive(name),
    }
}
