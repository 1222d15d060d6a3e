#![deny(missing_docs)]

//! # Schema Validation
//!
//! Rule checks enforced over the full set of object type definitions
//! before any document is generated. The engine fails fast: the first
//! violated rule produces a single descriptive error carrying a report of
//! every offending type/field pair, and later rules are not evaluated.

use crate::error::{AppError, AppResult};
use crate::schema::markers::{find_marker, has_marker, names};
use crate::schema::models::{FieldDefinition, ObjectDefinition, SchemaDocument, TypeRef};

/// Validates the schema document against all generation rules, in order.
///
/// Rule order is part of the contract: a schema violating several rules
/// reports only the first one.
pub fn validate_document(schema: &SchemaDocument) -> AppResult<()> {
    let types: Vec<&ObjectDefinition> = schema.object_types().collect();

    let report = fields_report(&types, |field, _| is_non_null_localized(field));
    if !report.is_empty() {
        return Err(validation_error(
            "Fields with '@localized' must be nullable.",
            &report,
        ));
    }

    let report = fields_report(&types, |field, ty| {
        filterable_count(ty) > 5 && has_marker(field, names::FILTERABLE)
    });
    if !report.is_empty() {
        return Err(validation_error(
            "Types can have no more than 5 fields with '@filterable'.",
            &report,
        ));
    }

    let report = fields_report(&types, |field, ty| {
        delivery_key_count(ty) > 1 && has_marker(field, names::DELIVERY_KEY)
    });
    if !report.is_empty() {
        return Err(validation_error(
            "Types can only have 1 field with '@deliveryKey'.",
            &report,
        ));
    }

    let report = fields_report(&types, |field, _| {
        has_marker(field, names::DELIVERY_KEY) && !is_nullable_string(field)
    });
    if !report.is_empty() {
        return Err(validation_error(
            "Fields with '@deliveryKey' must be of nullable type String.",
            &report,
        ));
    }

    let report = fields_report(&types, |field, _| {
        has_marker(field, names::EXTENSION) && !is_nullable_object(&field.ty, &types)
    });
    if !report.is_empty() {
        return Err(validation_error(
            "Fields with '@extension' must be of a nullable Object type.",
            &report,
        ));
    }

    let report = fields_report(&types, |field, _| {
        has_marker(field, names::EXTENSION)
            && is_nullable_object(&field.ty, &types)
            && references_content_type(&field.ty, &types)
    });
    if !report.is_empty() {
        return Err(validation_error(
            "Types referenced by fields with '@extension' must not have the '@contentType' marker.",
            &report,
        ));
    }

    let report = fields_report(&types, |field, ty| {
        field_order(ty).is_some_and(|order| {
            order.contains(&field.name.as_str()) && is_excluded_from_field_order(field)
        })
    });
    if !report.is_empty() {
        return Err(validation_error(
            "Fields with '@ignore' or '@deliveryKey' must not appear in the '@contentType' fieldOrder argument.",
            &report,
        ));
    }

    let report = fields_report(&types, |field, ty| {
        field_order(ty).is_some_and(|order| {
            !is_excluded_from_field_order(field) && !order.contains(&field.name.as_str())
        })
    });
    if !report.is_empty() {
        return Err(validation_error(
            "The '@contentType' fieldOrder argument must list every field without '@ignore' or '@deliveryKey' markers.",
            &report,
        ));
    }

    let report = unknown_field_order_report(&types);
    if !report.is_empty() {
        return Err(validation_error(
            "The '@contentType' fieldOrder argument must only reference known fields.",
            &report,
        ));
    }

    Ok(())
}

fn validation_error(head: &str, report: &str) -> AppError {
    AppError::Validation(format!("{head}\n\n{report}"))
}

/// A localized field is only valid on a nullable shape. The flagged shapes
/// are exactly: required scalar, list of required items, and required list
/// of required items.
fn is_non_null_localized(field: &FieldDefinition) -> bool {
    if !has_marker(field, names::LOCALIZED) {
        return false;
    }
    match &field.ty {
        TypeRef::NonNull(inner) => match inner.as_ref() {
            TypeRef::Named(_) => true,
            TypeRef::List(item) => matches!(item.as_ref(), TypeRef::NonNull(_)),
            _ => false,
        },
        TypeRef::List(item) => matches!(item.as_ref(), TypeRef::NonNull(_)),
        _ => false,
    }
}

fn filterable_count(ty: &ObjectDefinition) -> usize {
    ty.fields
        .iter()
        .filter(|field| has_marker(*field, names::FILTERABLE))
        .count()
}

fn delivery_key_count(ty: &ObjectDefinition) -> usize {
    ty.fields
        .iter()
        .filter(|field| has_marker(*field, names::DELIVERY_KEY))
        .count()
}

/// A delivery key must be a bare (nullable) String with no wrappers.
fn is_nullable_string(field: &FieldDefinition) -> bool {
    matches!(&field.ty, TypeRef::Named(name) if name == "String")
}

/// A bare named reference to an object type defined in the document.
fn is_nullable_object(ty: &TypeRef, types: &[&ObjectDefinition]) -> bool {
    matches!(ty, TypeRef::Named(name) if types.iter().any(|t| &t.name == name))
}

fn references_content_type(ty: &TypeRef, types: &[&ObjectDefinition]) -> bool {
    let TypeRef::Named(name) = ty else {
        return false;
    };
    types
        .iter()
        .find(|t| &t.name == name)
        .is_some_and(|t| has_marker(*t, names::CONTENT_TYPE))
}

/// The explicit field-order list from the content-type marker, if declared.
fn field_order(ty: &ObjectDefinition) -> Option<Vec<&str>> {
    find_marker(ty, names::CONTENT_TYPE)
        .and_then(|marker| marker.string_argument("fieldOrder"))
        .map(|value| value.split_whitespace().collect())
}

fn is_excluded_from_field_order(field: &FieldDefinition) -> bool {
    has_marker(field, names::IGNORE) || has_marker(field, names::DELIVERY_KEY)
}

/// Converts the types whose fields match the filter into a simple string
/// report:
///
/// ```text
/// type Name
///     prop1
///     prop2
/// ```
fn fields_report(
    types: &[&ObjectDefinition],
    field_filter: impl Fn(&FieldDefinition, &ObjectDefinition) -> bool,
) -> String {
    types
        .iter()
        .filter_map(|ty| {
            let fields: Vec<&str> = ty
                .fields
                .iter()
                .filter(|field| field_filter(field, ty))
                .map(|field| field.name.as_str())
                .collect();
            if fields.is_empty() {
                return None;
            }
            Some(format!(
                "type {}\n{}",
                ty.name,
                fields
                    .iter()
                    .map(|name| format!("\t{name}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            ))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Field-order entries that name no field on the type. The offending
/// entries themselves are reported in place of field names.
fn unknown_field_order_report(types: &[&ObjectDefinition]) -> String {
    types
        .iter()
        .filter_map(|ty| {
            let order = field_order(ty)?;
            let unknown: Vec<&str> = order
                .into_iter()
                .filter(|name| !ty.fields.iter().any(|field| &field.name == name))
                .collect();
            if unknown.is_empty() {
                return None;
            }
            Some(format!(
                "type {}\n{}",
                ty.name,
                unknown
                    .iter()
                    .map(|name| format!("\t{name}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            ))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::models::{Marker, MarkerValue};

    fn string() -> TypeRef {
        TypeRef::named("String")
    }

    fn localized_field(name: &str, ty: TypeRef) -> FieldDefinition {
        FieldDefinition::new(name, ty).with_marker(Marker::new(names::LOCALIZED))
    }

    #[test]
    fn test_localized_nullability_shapes() {
        // Violations
        assert!(is_non_null_localized(&localized_field(
            "a",
            TypeRef::non_null(string())
        )));
        assert!(is_non_null_localized(&localized_field(
            "b",
            TypeRef::list(TypeRef::non_null(string()))
        )));
        assert!(is_non_null_localized(&localized_field(
            "c",
            TypeRef::non_null(TypeRef::list(TypeRef::non_null(string())))
        )));

        // Valid shapes
        assert!(!is_non_null_localized(&localized_field("d", string())));
        assert!(!is_non_null_localized(&localized_field(
            "e",
            TypeRef::list(string())
        )));
        assert!(!is_non_null_localized(&localized_field(
            "f",
            TypeRef::non_null(TypeRef::list(string()))
        )));
        // Not localized at all
        assert!(!is_non_null_localized(&FieldDefinition::new(
            "g",
            TypeRef::non_null(string())
        )));
    }

    #[test]
    fn test_report_format() {
        let schema = SchemaDocument::new().with_object(
            ObjectDefinition::new("Test")
                .with_field(localized_field("bad", TypeRef::non_null(string())))
                .with_field(localized_field("worse", TypeRef::non_null(string())))
                .with_field(localized_field("fine", string())),
        );

        let err = validate_document(&schema).expect_err("should report");
        assert_eq!(
            err.to_string(),
            "Validation Error: Fields with '@localized' must be nullable.\n\ntype Test\n\tbad\n\tworse"
        );
    }

    #[test]
    fn test_report_spans_multiple_types() {
        let schema = SchemaDocument::new()
            .with_object(
                ObjectDefinition::new("First")
                    .with_field(localized_field("a", TypeRef::non_null(string()))),
            )
            .with_object(
                ObjectDefinition::new("Second")
                    .with_field(localized_field("b", TypeRef::non_null(string()))),
            );

        let err = validate_document(&schema).expect_err("should report");
        assert!(err
            .to_string()
            .ends_with("type First\n\ta\n\ntype Second\n\tb"));
    }

    #[test]
    fn test_field_order_parsing() {
        let ty = ObjectDefinition::new("Test").with_marker(
            Marker::new(names::CONTENT_TYPE).with_argument(
                "fieldOrder",
                MarkerValue::String("title body  footer".into()),
            ),
        );
        assert_eq!(field_order(&ty), Some(vec!["title", "body", "footer"]));

        let unordered = ObjectDefinition::new("Test").with_marker(Marker::new(names::CONTENT_TYPE));
        assert_eq!(field_order(&unordered), None);
    }
}
