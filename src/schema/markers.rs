//! # Marker Lookup
//!
//! internal logic for reading declarative markers from schema nodes.
//! Presence checks and argument extraction are pure lookups; absence is a
//! valid, silent outcome throughout.

use crate::schema::models::{
    EnumDefinition, FieldDefinition, Marker, ObjectDefinition, ScalarDefinition, TypeDefinition,
    UnionDefinition,
};

/// The recognized marker vocabulary.
///
/// This is a contract the schema author must follow; unknown marker names
/// are ignored by the generator.
pub mod names {
    /// String constraints: `minLength`, `maxLength`, `format`, `pattern`, `examples`.
    pub const TEXT: &str = "text";
    /// Numeric constraints: `minimum`, `maximum`, `format`.
    pub const NUMBER: &str = "number";
    /// Array constraints: `minItems`, `maxItems`.
    pub const LIST: &str = "list";
    /// Constant values: `item` (scalar) or `items` (array-level).
    pub const CONST: &str = "const";
    /// Encode an object field as a content link.
    pub const LINK: &str = "link";
    /// Encode an object field as a content reference.
    pub const REFERENCE: &str = "reference";
    /// Wrap the field value for per-locale storage.
    pub const LOCALIZED: &str = "localized";
    /// Exclude the field from the generated document.
    pub const IGNORE: &str = "ignore";
    /// Include the field in the sortable trait.
    pub const SORTABLE: &str = "sortable";
    /// Include the field in the filterable trait (at most 5 per type).
    pub const FILTERABLE: &str = "filterable";
    /// Surface the field as the `_meta` delivery key: `title`,
    /// `description`, `pattern`.
    pub const DELIVERY_KEY: &str = "deliveryKey";
    /// Render the referenced object type through a UI extension.
    pub const EXTENSION: &str = "extension";
    /// Type marker electing the object into generation: `repository`,
    /// `kind`, `visualizations`, `icon`, `fieldOrder`, `autoSync`.
    pub const CONTENT_TYPE: &str = "contentType";
}

/// Values of the content-type marker's `kind` argument.
pub mod kinds {
    /// A regular content type (the default).
    pub const CONTENT_TYPE: &str = "CONTENT_TYPE";
    /// A slot.
    pub const SLOT: &str = "SLOT";
    /// A hierarchy node; its `children` field becomes the hierarchy trait.
    pub const HIERARCHY: &str = "HIERARCHY";
}

/// A schema node that can carry markers.
pub trait Annotated {
    /// The markers attached to this node, in declaration order.
    fn markers(&self) -> &[Marker];
}

impl Annotated for FieldDefinition {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl Annotated for ObjectDefinition {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl Annotated for EnumDefinition {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl Annotated for UnionDefinition {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl Annotated for ScalarDefinition {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl Annotated for TypeDefinition {
    fn markers(&self) -> &[Marker] {
        match self {
            TypeDefinition::Object(def) => &def.markers,
            TypeDefinition::Enum(def) => &def.markers,
            TypeDefinition::Union(def) => &def.markers,
            TypeDefinition::Scalar(def) => &def.markers,
        }
    }
}

/// Reports whether any marker on the node matches `name`.
pub fn has_marker<N: Annotated + ?Sized>(node: &N, name: &str) -> bool {
    node.markers().iter().any(|marker| marker.name == name)
}

/// Returns the first marker on the node matching `name`, in declaration
/// order.
pub fn find_marker<'a, N: Annotated + ?Sized>(node: &'a N, name: &str) -> Option<&'a Marker> {
    node.markers().iter().find(|marker| marker.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::models::{MarkerValue, TypeRef};

    #[test]
    fn test_has_marker() {
        let field = FieldDefinition::new("title", TypeRef::named("String"))
            .with_marker(Marker::new(names::SORTABLE));
        assert!(has_marker(&field, names::SORTABLE));
        assert!(!has_marker(&field, names::FILTERABLE));
    }

    #[test]
    fn test_find_marker_is_first_match() {
        let field = FieldDefinition::new("title", TypeRef::named("String"))
            .with_marker(
                Marker::new(names::TEXT)
                    .with_argument("minLength", MarkerValue::Int(1)),
            )
            .with_marker(
                Marker::new(names::TEXT)
                    .with_argument("minLength", MarkerValue::Int(9)),
            );

        let marker = find_marker(&field, names::TEXT).expect("marker missing");
        assert_eq!(marker.int_argument("minLength"), Some(1));
    }

    #[test]
    fn test_find_marker_absent() {
        let object = ObjectDefinition::new("Article");
        assert!(find_marker(&object, names::CONTENT_TYPE).is_none());
    }
}
