#![deny(missing_docs)]

//! # Content-Type Schema Generation
//!
//! Converts annotated object type definitions into content-type JSON
//! Schema documents for the delivery platform. This module assembles
//! identity, trait blocks (sortable/filterable/hierarchy), the property
//! map with ordering and required-field list, and recursively maps field
//! types: primitive constraints, enum values, array wrapping, object
//! inlining, content link/reference encoding and localization wrapping.
//!
//! The transform is pure: repeated invocation with the same inputs yields
//! byte-identical documents (`serde_json` preserves insertion order).

use crate::config::GeneratorConfig;
use crate::error::AppResult;
use crate::schema::markers::{find_marker, has_marker, kinds, names};
use crate::schema::models::{
    FieldDefinition, Marker, ObjectDefinition, SchemaDocument, TypeDefinition, TypeRef,
};
use crate::type_mapping::{classify, switch_array, type_name, TypeClass};
use crate::util::combinations;
use crate::validation::validate_document;
use heck::{ToKebabCase, ToTitleCase};
use serde_json::{json, Map, Value};
use tracing::warn;

/// The JSON Schema draft identifier emitted in every document.
pub const SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

/// Fixed reference targets understood by the delivery platform.
///
/// These are a static contract, not computed values.
pub mod uris {
    /// Base definition every content-type document extends.
    pub const CONTENT: &str = "http://bigcontent.io/cms/schema/v1/core#/definitions/content";
    /// Content-link reference wrapper.
    pub const CONTENT_LINK: &str =
        "http://bigcontent.io/cms/schema/v1/core#/definitions/content-link";
    /// Content-reference wrapper.
    pub const CONTENT_REFERENCE: &str =
        "http://bigcontent.io/cms/schema/v1/core#/definitions/content-reference";
    /// Core image link.
    pub const IMAGE_LINK: &str = "http://bigcontent.io/cms/schema/v1/core#/definitions/image-link";
    /// Core video link.
    pub const VIDEO_LINK: &str = "http://bigcontent.io/cms/schema/v1/core#/definitions/video-link";
    /// Generic localized-value wrapper.
    pub const LOCALIZED_VALUE: &str =
        "http://bigcontent.io/cms/schema/v1/core#/definitions/localized-value";
    /// Localized plain string.
    pub const LOCALIZED_STRING: &str =
        "http://bigcontent.io/cms/schema/v1/localization#/definitions/localized-string";
    /// Localized image link.
    pub const LOCALIZED_IMAGE: &str =
        "http://bigcontent.io/cms/schema/v1/localization#/definitions/localized-image";
    /// Localized video link.
    pub const LOCALIZED_VIDEO: &str =
        "http://bigcontent.io/cms/schema/v1/localization#/definitions/localized-video";
    /// Mixin for hierarchy node documents.
    pub const HIERARCHY_NODE: &str =
        "http://bigcontent.io/cms/schema/v2/hierarchy#/definitions/hierarchy-node";
}

/// Derives the schema URI for a type name under the configured hostname.
pub fn type_uri(type_name: &str, hostname: &str) -> String {
    format!("{}/{}", hostname, type_name.to_kebab_case())
}

/// One generated document plus the file stem the caller should write it
/// under (kebab-cased type name, with the configured suffix appended).
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSchema {
    /// Output file stem (without extension).
    pub name: String,
    /// The document body, ready for serialization.
    pub body: Value,
}

/// Validates the configuration and the schema document, then builds one
/// output document per content-type-marked object type, in declaration
/// order. The caller serializes the bodies; no I/O happens here.
pub fn generate_schemas(
    schema: &SchemaDocument,
    config: &GeneratorConfig,
) -> AppResult<Vec<GeneratedSchema>> {
    config.validate()?;
    validate_document(schema)?;

    Ok(schema
        .content_types()
        .map(|ty| GeneratedSchema {
            name: output_name(&ty.name, config),
            body: content_type_schema_body(ty, schema, config),
        })
        .collect())
}

fn output_name(type_name: &str, config: &GeneratorConfig) -> String {
    match &config.schema_suffix {
        Some(suffix) => format!("{}-{}", type_name.to_kebab_case(), suffix),
        None => type_name.to_kebab_case(),
    }
}

/// Builds the complete content-type document for one object type.
pub fn content_type_schema_body(
    ty: &ObjectDefinition,
    schema: &SchemaDocument,
    config: &GeneratorConfig,
) -> Value {
    let mut body = Map::new();

    // 1. Identity
    body.insert(
        "$id".to_string(),
        json!(type_uri(&ty.name, &config.hostname)),
    );
    body.insert("$schema".to_string(), json!(SCHEMA_DRAFT));
    body.insert("type".to_string(), json!("object"));

    // 2. Base reference wrappers; hierarchies mix in the node definition
    let mut all_of = vec![json!({ "$ref": uris::CONTENT })];
    if is_hierarchy(ty) {
        all_of.push(json!({ "$ref": uris::HIERARCHY_NODE }));
    }
    body.insert("allOf".to_string(), Value::Array(all_of));

    let title = ty.name.to_title_case();
    body.insert("title".to_string(), json!(title));

    // 3. Properties; the synthetic _meta delivery key goes first
    let mut properties = Map::new();
    if let Some(marker) = delivery_key_marker(ty) {
        properties.insert("_meta".to_string(), delivery_key_meta_property(marker));
    }
    for (name, value) in object_properties(ty, schema, config) {
        properties.insert(name, value);
    }
    body.insert("properties".to_string(), Value::Object(properties));
    body.insert(
        "description".to_string(),
        json!(ty.description.clone().unwrap_or(title)),
    );

    // 4. Traits, omitted when no field qualifies
    if let Some(sortable) = sortable_trait(ty) {
        body.insert("trait:sortable".to_string(), sortable);
    }
    if is_hierarchy(ty) {
        body.insert(
            "trait:hierarchy".to_string(),
            hierarchy_trait(ty, schema, config),
        );
    }
    if let Some(filterable) = filterable_trait(ty) {
        body.insert("trait:filterable".to_string(), filterable);
    }

    // 5. Ordering and required-field list
    let mut order: Vec<Value> = Vec::new();
    if delivery_key_marker(ty).is_some() {
        order.push(json!("_meta"));
    }
    order.extend(property_fields(ty).map(|field| json!(field.name)));
    body.insert("propertyOrder".to_string(), Value::Array(order));

    let required: Vec<Value> = property_fields(ty)
        .filter(|field| is_required(field))
        .map(|field| json!(field.name))
        .collect();
    body.insert("required".to_string(), Value::Array(required));

    Value::Object(body)
}

/// Returns the properties map for an object type, one entry per field
/// surviving the property filter.
pub fn object_properties(
    ty: &ObjectDefinition,
    schema: &SchemaDocument,
    config: &GeneratorConfig,
) -> Map<String, Value> {
    let mut properties = Map::new();

    for field in property_fields(ty) {
        let mut property = Map::new();
        property.insert("title".to_string(), json!(field.name.to_title_case()));
        if let Some(description) = &field.description {
            property.insert("description".to_string(), json!(description));
        }

        let descriptor = switch_array(
            &field.ty,
            |item| array_property(field, item, schema, config),
            |other| property_type(field, other, schema, config),
        );
        property.extend(descriptor);

        properties.insert(field.name.clone(), Value::Object(property));
    }

    properties
}

/// The fields of a type that surface as ordinary properties: not ignored,
/// not the children field of a hierarchy, not a delivery key.
fn property_fields(ty: &ObjectDefinition) -> impl Iterator<Item = &FieldDefinition> {
    let hierarchy = is_hierarchy(ty);
    ty.fields.iter().filter(move |field| {
        !has_marker(*field, names::IGNORE)
            && !(hierarchy && field.name == "children")
            && !has_marker(*field, names::DELIVERY_KEY)
    })
}

/// Required fields are the non-nullable ones plus every localized field:
/// the localized wrapper is itself the nullable container, so the wrapper
/// property is always listed.
fn is_required(field: &FieldDefinition) -> bool {
    matches!(field.ty, TypeRef::NonNull(_)) || has_marker(field, names::LOCALIZED)
}

fn is_hierarchy(ty: &ObjectDefinition) -> bool {
    find_marker(ty, names::CONTENT_TYPE)
        .and_then(|marker| marker.enum_argument("kind"))
        .is_some_and(|kind| kind == kinds::HIERARCHY)
}

fn delivery_key_marker(ty: &ObjectDefinition) -> Option<&Marker> {
    ty.fields
        .iter()
        .find_map(|field| find_marker(field, names::DELIVERY_KEY))
}

fn delivery_key_meta_property(marker: &Marker) -> Value {
    let mut delivery_key = Map::new();
    delivery_key.insert("type".to_string(), json!("string"));
    delivery_key.insert(
        "title".to_string(),
        json!(marker.string_argument("title").unwrap_or("Delivery Key")),
    );
    delivery_key.insert(
        "description".to_string(),
        json!(marker
            .string_argument("description")
            .unwrap_or("Set a delivery key for this content item")),
    );
    if let Some(pattern) = marker.string_argument("pattern") {
        delivery_key.insert("pattern".to_string(), json!(pattern));
    }

    json!({
        "type": "object",
        "title": "Delivery Key",
        "properties": {
            "deliveryKey": Value::Object(delivery_key),
        },
    })
}

/// Maps a list-shaped field to an array descriptor wrapping the element
/// descriptor computed against the list's item type.
fn array_property(
    field: &FieldDefinition,
    item_type: &TypeRef,
    schema: &SchemaDocument,
    config: &GeneratorConfig,
) -> Map<String, Value> {
    let mut descriptor = Map::new();
    descriptor.insert("type".to_string(), json!("array"));

    if let Some(marker) = find_marker(field, names::LIST) {
        if let Some(min_items) = marker.int_argument("minItems") {
            descriptor.insert("minItems".to_string(), json!(min_items));
        }
        if let Some(max_items) = marker.int_argument("maxItems") {
            descriptor.insert("maxItems".to_string(), json!(max_items));
        }
    }

    descriptor.insert(
        "items".to_string(),
        Value::Object(property_type(field, item_type, schema, config)),
    );

    // An array-level const comes from the const marker's item list
    let const_items = find_marker(field, names::CONST)
        .and_then(|marker| marker.string_list_argument("items"));
    if let Some(items) = const_items {
        descriptor.insert("const".to_string(), json!(items));
    }

    descriptor
}

/// Maps one field type reference to its property descriptor, dispatching
/// on the classified base type.
pub fn property_type(
    field: &FieldDefinition,
    ty: &TypeRef,
    schema: &SchemaDocument,
    config: &GeneratorConfig,
) -> Map<String, Value> {
    match classify(ty, schema) {
        TypeClass::Union(def) => {
            let targets = def
                .members
                .iter()
                .map(|member| type_uri(member, &config.hostname))
                .collect();
            content_link(targets)
        }

        TypeClass::Enum(def) => {
            let mut descriptor = Map::new();
            descriptor.insert("type".to_string(), json!("string"));
            descriptor.insert("enum".to_string(), json!(def.values));
            descriptor
        }

        TypeClass::Object(def) => {
            let target = vec![type_uri(&def.name, &config.hostname)];
            if has_marker(field, names::LINK) {
                content_link(target)
            } else if has_marker(field, names::REFERENCE) {
                content_reference(target)
            } else if has_marker(def, names::CONTENT_TYPE) {
                inline_content_reference(def, config)
            } else {
                inline_object(def, schema, config)
            }
        }

        TypeClass::Primitive(name) => match name {
            "String" => {
                // A single-item const short-circuits all other string options
                let const_value = find_marker(field, names::CONST)
                    .and_then(|marker| marker.string_argument("item"));
                if let Some(value) = const_value {
                    let mut descriptor = Map::new();
                    descriptor.insert("type".to_string(), json!("string"));
                    descriptor.insert("const".to_string(), json!(value));
                    return descriptor;
                }

                check_localized(field, ty, string_property(field))
            }

            "Boolean" => {
                let mut descriptor = Map::new();
                descriptor.insert("type".to_string(), json!("boolean"));
                check_localized(field, ty, descriptor)
            }

            "Int" | "Float" => check_localized(field, ty, number_property(field, name)),

            // The media scalars resolve through a fixed lookup
            "Image" => ref_type(if has_marker(field, names::LOCALIZED) {
                uris::LOCALIZED_IMAGE
            } else {
                uris::IMAGE_LINK
            }),
            "Video" => ref_type(if has_marker(field, names::LOCALIZED) {
                uris::LOCALIZED_VIDEO
            } else {
                uris::VIDEO_LINK
            }),

            other => {
                warn!(
                    field = field.name.as_str(),
                    base_type = other,
                    "unmapped base type; emitting empty property descriptor"
                );
                Map::new()
            }
        },
    }
}

fn string_property(field: &FieldDefinition) -> Map<String, Value> {
    let mut descriptor = Map::new();
    descriptor.insert("type".to_string(), json!("string"));

    if let Some(marker) = find_marker(field, names::TEXT) {
        if let Some(format) = marker.string_argument("format") {
            descriptor.insert("format".to_string(), json!(format));
        }
        if let Some(pattern) = marker.string_argument("pattern") {
            descriptor.insert("pattern".to_string(), json!(pattern));
        }
        if let Some(min_length) = marker.int_argument("minLength") {
            descriptor.insert("minLength".to_string(), json!(min_length));
        }
        if let Some(max_length) = marker.int_argument("maxLength") {
            descriptor.insert("maxLength".to_string(), json!(max_length));
        }
        if let Some(examples) = marker.string_list_argument("examples") {
            descriptor.insert("examples".to_string(), json!(examples));
        }
    }

    descriptor
}

fn number_property(field: &FieldDefinition, base_type: &str) -> Map<String, Value> {
    let mut descriptor = Map::new();
    descriptor.insert(
        "type".to_string(),
        json!(if base_type == "Float" {
            "number"
        } else {
            "integer"
        }),
    );

    if let Some(marker) = find_marker(field, names::NUMBER) {
        if let Some(format) = marker.string_argument("format") {
            descriptor.insert("format".to_string(), json!(format));
        }
        if let Some(minimum) = marker.int_argument("minimum") {
            descriptor.insert("minimum".to_string(), json!(minimum));
        }
        if let Some(maximum) = marker.int_argument("maximum") {
            descriptor.insert("maximum".to_string(), json!(maximum));
        }
    }

    descriptor
}

/// Applies localization wrapping to a primitive descriptor.
///
/// A bare localized String with no other markers substitutes the fixed
/// localized-string reference; any other localized primitive nests the
/// computed descriptor inside the generic localized-value wrapper.
fn check_localized(
    field: &FieldDefinition,
    ty: &TypeRef,
    descriptor: Map<String, Value>,
) -> Map<String, Value> {
    if !has_marker(field, names::LOCALIZED) {
        return descriptor;
    }

    if field.markers.len() == 1 && type_name(ty) == "String" {
        return ref_type(uris::LOCALIZED_STRING);
    }

    localized(descriptor)
}

fn localized(value: Map<String, Value>) -> Map<String, Value> {
    let mut descriptor = ref_type(uris::LOCALIZED_VALUE);
    descriptor.insert(
        "properties".to_string(),
        json!({
            "values": {
                "items": {
                    "properties": {
                        "value": Value::Object(value),
                    },
                },
            },
        }),
    );
    descriptor
}

/// A reference wrapper: `allOf` with a single `$ref` entry.
fn ref_type(uri: &str) -> Map<String, Value> {
    let mut descriptor = Map::new();
    descriptor.insert("allOf".to_string(), json!([{ "$ref": uri }]));
    descriptor
}

/// A reference wrapper constrained to an allowed-type-URI enum.
fn ref_type_with_targets(uri: &str, targets: Vec<String>) -> Map<String, Value> {
    let mut descriptor = Map::new();
    descriptor.insert(
        "allOf".to_string(),
        json!([
            { "$ref": uri },
            {
                "properties": {
                    "contentType": { "enum": targets },
                },
            },
        ]),
    );
    descriptor
}

fn content_link(targets: Vec<String>) -> Map<String, Value> {
    ref_type_with_targets(uris::CONTENT_LINK, targets)
}

fn content_reference(targets: Vec<String>) -> Map<String, Value> {
    ref_type_with_targets(uris::CONTENT_REFERENCE, targets)
}

/// Points at the target's own generated document instead of restating its
/// schema text inline.
fn inline_content_reference(ty: &ObjectDefinition, config: &GeneratorConfig) -> Map<String, Value> {
    let mut descriptor = Map::new();
    descriptor.insert("type".to_string(), json!("object"));
    descriptor.insert(
        "allOf".to_string(),
        json!([{ "$ref": type_uri(&ty.name, &config.hostname) }]),
    );
    descriptor
}

/// Nests the target type's property map directly, without identity or
/// trait fields.
fn inline_object(
    ty: &ObjectDefinition,
    schema: &SchemaDocument,
    config: &GeneratorConfig,
) -> Map<String, Value> {
    let mut descriptor = Map::new();
    descriptor.insert("type".to_string(), json!("object"));
    descriptor.insert(
        "properties".to_string(),
        Value::Object(object_properties(ty, schema, config)),
    );
    descriptor.insert(
        "propertyOrder".to_string(),
        json!(property_fields(ty)
            .map(|field| field.name.as_str())
            .collect::<Vec<_>>()),
    );
    descriptor.insert(
        "required".to_string(),
        json!(property_fields(ty)
            .filter(|field| is_required(field))
            .map(|field| field.name.as_str())
            .collect::<Vec<_>>()),
    );
    descriptor
}

/// The sortable trait: one default sort key listing every sortable field
/// path in declaration order.
fn sortable_trait(ty: &ObjectDefinition) -> Option<Value> {
    let paths: Vec<String> = ty
        .fields
        .iter()
        .filter(|field| has_marker(*field, names::SORTABLE))
        .map(|field| format!("/{}", field.name))
        .collect();

    if paths.is_empty() {
        return None;
    }

    Some(json!({
        "sortBy": [
            {
                "key": "default",
                "paths": paths,
            },
        ],
    }))
}

/// The filterable trait: every non-empty ordered combination of the
/// filterable field paths, supporting multi-path filtering. The platform
/// caps multi-path filters at 5 paths, which validation enforces upstream.
fn filterable_trait(ty: &ObjectDefinition) -> Option<Value> {
    let paths: Vec<String> = ty
        .fields
        .iter()
        .filter(|field| has_marker(*field, names::FILTERABLE))
        .map(|field| format!("/{}", field.name))
        .collect();

    if paths.is_empty() {
        return None;
    }

    Some(json!({
        "filterBy": combinations(&paths)
            .into_iter()
            .map(|paths| json!({ "paths": paths }))
            .collect::<Vec<_>>(),
    }))
}

/// The hierarchy trait: the children field's target types, expanding a
/// union target to every member.
fn hierarchy_trait(
    ty: &ObjectDefinition,
    schema: &SchemaDocument,
    config: &GeneratorConfig,
) -> Value {
    let child_content_types: Vec<String> = ty
        .fields
        .iter()
        .filter(|field| field.name == "children")
        .map(|field| type_name(&field.ty))
        .flat_map(|name| match schema.get_type(name) {
            Some(TypeDefinition::Union(def)) => {
                def.members.iter().map(String::as_str).collect::<Vec<_>>()
            }
            _ => vec![name],
        })
        .map(|name| type_uri(name, &config.hostname))
        .collect();

    json!({ "childContentTypes": child_content_types })
}
