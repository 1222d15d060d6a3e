use cms_schemagen::schema_generator::uris;
use cms_schemagen::{
    content_type_schema_body, generate_schemas, EnumDefinition, FieldDefinition, GeneratorConfig,
    Marker, MarkerValue, ObjectDefinition, SchemaDocument, TypeRef, UnionDefinition,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn config() -> GeneratorConfig {
    GeneratorConfig::new()
}

fn string() -> TypeRef {
    TypeRef::named("String")
}

fn article() -> ObjectDefinition {
    ObjectDefinition::new("Article")
        .with_marker(Marker::new("contentType"))
        .with_field(
            FieldDefinition::new("title", TypeRef::non_null(string()))
                .with_marker(Marker::new("sortable")),
        )
        .with_field(
            FieldDefinition::new("tags", TypeRef::list(TypeRef::non_null(string())))
                .with_marker(Marker::new("filterable")),
        )
        .with_field(FieldDefinition::new("subtitle", string()).with_marker(Marker::new("localized")))
}

#[test]
fn article_document() {
    let schema = SchemaDocument::new().with_object(article());
    let body = content_type_schema_body(&article(), &schema, &config());

    let expected = json!({
        "$id": "https://schema-examples.com/article",
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "allOf": [{ "$ref": uris::CONTENT }],
        "title": "Article",
        "properties": {
            "title": { "title": "Title", "type": "string" },
            "tags": {
                "title": "Tags",
                "type": "array",
                "items": { "type": "string" },
            },
            "subtitle": {
                "title": "Subtitle",
                "allOf": [{ "$ref": uris::LOCALIZED_STRING }],
            },
        },
        "description": "Article",
        "trait:sortable": {
            "sortBy": [{ "key": "default", "paths": ["/title"] }],
        },
        "trait:filterable": {
            "filterBy": [{ "paths": ["/tags"] }],
        },
        "propertyOrder": ["title", "tags", "subtitle"],
        "required": ["title", "subtitle"],
    });

    assert_eq!(body, expected);
    // Key order is part of the contract; compare serialized text too.
    assert_eq!(
        serde_json::to_string_pretty(&body).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap()
    );
}

#[test]
fn generation_is_deterministic() {
    let schema = SchemaDocument::new().with_object(article());
    let first = content_type_schema_body(&article(), &schema, &config());
    let second = content_type_schema_body(&article(), &schema, &config());
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn delivery_key_surfaces_as_meta_property() {
    let ty = ObjectDefinition::new("Page")
        .with_marker(Marker::new("contentType"))
        .with_field(FieldDefinition::new("key", string()).with_marker(Marker::new("deliveryKey")));
    let schema = SchemaDocument::new().with_object(ty.clone());

    let body = content_type_schema_body(&ty, &schema, &config());

    assert_eq!(
        body["properties"]["_meta"]["properties"]["deliveryKey"]["type"],
        json!("string")
    );
    assert_eq!(body["propertyOrder"][0], json!("_meta"));
    assert_eq!(body["propertyOrder"], json!(["_meta"]));
    // The delivery key field never surfaces as an ordinary property.
    assert!(body["properties"].get("key").is_none());
    assert_eq!(body["required"], json!([]));
}

#[test]
fn filterable_trait_lists_all_ordered_combinations() {
    let ty = ObjectDefinition::new("Product")
        .with_marker(Marker::new("contentType"))
        .with_field(FieldDefinition::new("a", string()).with_marker(Marker::new("filterable")))
        .with_field(FieldDefinition::new("b", string()).with_marker(Marker::new("filterable")))
        .with_field(FieldDefinition::new("c", string()).with_marker(Marker::new("filterable")));
    let schema = SchemaDocument::new().with_object(ty.clone());

    let body = content_type_schema_body(&ty, &schema, &config());

    let filter_by = body["trait:filterable"]["filterBy"]
        .as_array()
        .expect("filterBy missing");
    assert_eq!(filter_by.len(), 7);

    let lengths: Vec<usize> = filter_by
        .iter()
        .map(|entry| entry["paths"].as_array().unwrap().len())
        .collect();
    assert_eq!(lengths, vec![1, 1, 1, 2, 2, 2, 3]);

    assert_eq!(filter_by[0]["paths"], json!(["/a"]));
    assert_eq!(filter_by[3]["paths"], json!(["/a", "/b"]));
    assert_eq!(filter_by[6]["paths"], json!(["/a", "/b", "/c"]));
}

#[test]
fn hierarchy_children_project_into_trait() {
    let ty = ObjectDefinition::new("Category")
        .with_marker(
            Marker::new("contentType")
                .with_argument("kind", MarkerValue::Enum("HIERARCHY".into())),
        )
        .with_field(FieldDefinition::new("name", TypeRef::non_null(string())))
        .with_field(FieldDefinition::new(
            "children",
            TypeRef::list(TypeRef::non_null(TypeRef::named("Leaf"))),
        ));
    let leaf = ObjectDefinition::new("Leaf").with_marker(Marker::new("contentType"));
    let schema = SchemaDocument::new()
        .with_object(ty.clone())
        .with_object(leaf);

    let body = content_type_schema_body(&ty, &schema, &config());

    assert!(body["properties"].get("children").is_none());
    assert_eq!(
        body["trait:hierarchy"]["childContentTypes"],
        json!(["https://schema-examples.com/leaf"])
    );
    assert_eq!(
        body["allOf"],
        json!([{ "$ref": uris::CONTENT }, { "$ref": uris::HIERARCHY_NODE }])
    );
    assert_eq!(body["propertyOrder"], json!(["name"]));
    assert_eq!(body["required"], json!(["name"]));
}

#[test]
fn hierarchy_union_children_expand_to_members() {
    let ty = ObjectDefinition::new("Menu")
        .with_marker(
            Marker::new("contentType")
                .with_argument("kind", MarkerValue::Enum("HIERARCHY".into())),
        )
        .with_field(FieldDefinition::new(
            "children",
            TypeRef::list(TypeRef::named("MenuEntry")),
        ));
    let schema = SchemaDocument::new()
        .with_object(ty.clone())
        .with_object(ObjectDefinition::new("MenuItem").with_marker(Marker::new("contentType")))
        .with_object(ObjectDefinition::new("MenuSection").with_marker(Marker::new("contentType")))
        .with_union(
            UnionDefinition::new("MenuEntry")
                .with_member("MenuItem")
                .with_member("MenuSection"),
        );

    let body = content_type_schema_body(&ty, &schema, &config());
    assert_eq!(
        body["trait:hierarchy"]["childContentTypes"],
        json!([
            "https://schema-examples.com/menu-item",
            "https://schema-examples.com/menu-section",
        ])
    );
}

#[test]
fn ignored_fields_are_absent_everywhere() {
    let ty = ObjectDefinition::new("Page")
        .with_marker(Marker::new("contentType"))
        .with_field(FieldDefinition::new("title", TypeRef::non_null(string())))
        .with_field(
            FieldDefinition::new("internal", TypeRef::non_null(string()))
                .with_marker(Marker::new("ignore")),
        );
    let schema = SchemaDocument::new().with_object(ty.clone());

    let body = content_type_schema_body(&ty, &schema, &config());

    assert!(body["properties"].get("internal").is_none());
    assert_eq!(body["propertyOrder"], json!(["title"]));
    assert_eq!(body["required"], json!(["title"]));
}

#[test]
fn localized_substitution_ignores_description_text() {
    // A bare localized String maps to the fixed reference regardless of
    // any description on the field.
    let ty = ObjectDefinition::new("Page")
        .with_marker(Marker::new("contentType"))
        .with_field(
            FieldDefinition::new("subtitle", string())
                .with_description("Shown below the title")
                .with_marker(Marker::new("localized")),
        );
    let schema = SchemaDocument::new().with_object(ty.clone());

    let body = content_type_schema_body(&ty, &schema, &config());
    assert_eq!(
        body["properties"]["subtitle"],
        json!({
            "title": "Subtitle",
            "description": "Shown below the title",
            "allOf": [{ "$ref": uris::LOCALIZED_STRING }],
        })
    );
}

#[test]
fn declared_description_overrides_default() {
    let ty = ObjectDefinition::new("Page")
        .with_marker(Marker::new("contentType"))
        .with_description("A routable page");
    let schema = SchemaDocument::new().with_object(ty.clone());

    let body = content_type_schema_body(&ty, &schema, &config());
    assert_eq!(body["title"], json!("Page"));
    assert_eq!(body["description"], json!("A routable page"));
}

#[test]
fn enum_union_and_media_fields_compose() {
    let ty = ObjectDefinition::new("Banner")
        .with_marker(Marker::new("contentType"))
        .with_field(FieldDefinition::new("tone", TypeRef::named("Tone")))
        .with_field(
            FieldDefinition::new("target", TypeRef::named("Target"))
                .with_marker(Marker::new("filterable")),
        )
        .with_field(
            FieldDefinition::new("background", TypeRef::named("Image"))
                .with_marker(Marker::new("localized")),
        );
    let schema = SchemaDocument::new()
        .with_object(ty.clone())
        .with_object(ObjectDefinition::new("Article").with_marker(Marker::new("contentType")))
        .with_object(ObjectDefinition::new("Page").with_marker(Marker::new("contentType")))
        .with_enum(
            EnumDefinition::new("Tone")
                .with_value("LIGHT")
                .with_value("DARK"),
        )
        .with_union(
            UnionDefinition::new("Target")
                .with_member("Article")
                .with_member("Page"),
        );

    let body = content_type_schema_body(&ty, &schema, &config());

    assert_eq!(
        body["properties"]["tone"],
        json!({
            "title": "Tone",
            "type": "string",
            "enum": ["LIGHT", "DARK"],
        })
    );
    assert_eq!(
        body["properties"]["target"],
        json!({
            "title": "Target",
            "allOf": [
                { "$ref": uris::CONTENT_LINK },
                {
                    "properties": {
                        "contentType": {
                            "enum": [
                                "https://schema-examples.com/article",
                                "https://schema-examples.com/page",
                            ],
                        },
                    },
                },
            ],
        })
    );
    assert_eq!(
        body["properties"]["background"],
        json!({
            "title": "Background",
            "allOf": [{ "$ref": uris::LOCALIZED_IMAGE }],
        })
    );
}

#[test]
fn property_order_matches_properties_and_required_is_subset() {
    let schema = SchemaDocument::new()
        .with_object(article())
        .with_object(
            ObjectDefinition::new("Page")
                .with_marker(Marker::new("contentType"))
                .with_field(
                    FieldDefinition::new("key", string()).with_marker(Marker::new("deliveryKey")),
                )
                .with_field(FieldDefinition::new("title", TypeRef::non_null(string()))),
        );

    for generated in generate_schemas(&schema, &config()).expect("should generate") {
        let body = generated.body;
        let order: Vec<&str> = body["propertyOrder"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        let mut property_names: Vec<&str> = body["properties"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut sorted_order = order.clone();
        property_names.sort_unstable();
        sorted_order.sort_unstable();
        assert_eq!(sorted_order, property_names);

        for name in body["required"].as_array().unwrap() {
            assert!(order.contains(&name.as_str().unwrap()));
        }
    }
}

#[test]
fn generate_schemas_covers_marked_types_only() {
    let schema = SchemaDocument::new()
        .with_object(article())
        .with_object(ObjectDefinition::new("BlogPost").with_marker(Marker::new("contentType")))
        .with_object(ObjectDefinition::new("Inline"));
    let config = GeneratorConfig::new().with_schema_suffix("dev");

    let generated = generate_schemas(&schema, &config).expect("should generate");
    let names: Vec<&str> = generated.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["article-dev", "blog-post-dev"]);
}

#[test]
fn generate_schemas_rejects_invalid_hostname() {
    let schema = SchemaDocument::new().with_object(article());
    let config = GeneratorConfig::new().with_hostname("no scheme");

    let err = generate_schemas(&schema, &config).expect_err("should fail");
    assert!(err.to_string().starts_with("Config Error:"));
}

#[test]
fn inline_object_nests_filtered_properties() {
    let ty = ObjectDefinition::new("Page")
        .with_marker(Marker::new("contentType"))
        .with_field(FieldDefinition::new("meta", TypeRef::named("Seo")));
    let seo = ObjectDefinition::new("Seo")
        .with_field(FieldDefinition::new(
            "keywords",
            TypeRef::non_null(string()),
        ))
        .with_field(FieldDefinition::new("robots", string()).with_marker(Marker::new("ignore")));
    let schema = SchemaDocument::new()
        .with_object(ty.clone())
        .with_object(seo);

    let body = content_type_schema_body(&ty, &schema, &config());
    assert_eq!(
        body["properties"]["meta"],
        json!({
            "title": "Meta",
            "type": "object",
            "properties": {
                "keywords": { "title": "Keywords", "type": "string" },
            },
            "propertyOrder": ["keywords"],
            "required": ["keywords"],
        })
    );
}

#[test]
fn slot_kind_is_not_a_hierarchy() {
    // A children field on a non-hierarchy kind stays an ordinary property.
    let ty = ObjectDefinition::new("HeroSlot")
        .with_marker(
            Marker::new("contentType").with_argument("kind", MarkerValue::Enum("SLOT".into())),
        )
        .with_field(FieldDefinition::new("children", string()));
    let schema = SchemaDocument::new().with_object(ty.clone());

    let body = content_type_schema_body(&ty, &schema, &config());
    assert!(body.get("trait:hierarchy").is_none());
    assert_eq!(body["propertyOrder"], json!(["children"]));
    assert_eq!(body["allOf"], json!([{ "$ref": uris::CONTENT }]));
}

#[test]
fn empty_type_has_empty_collections() {
    let ty = ObjectDefinition::new("Marker").with_marker(Marker::new("contentType"));
    let schema = SchemaDocument::new().with_object(ty.clone());

    let body = content_type_schema_body(&ty, &schema, &config());
    assert_eq!(body["properties"], Value::Object(Default::default()));
    assert_eq!(body["propertyOrder"], json!([]));
    assert_eq!(body["required"], json!([]));
    assert!(body.get("trait:sortable").is_none());
    assert!(body.get("trait:filterable").is_none());
}
