#![deny(missing_docs)]

//! # CMS Schemagen
//!
//! Core library translating annotated schema documents into content-type
//! JSON Schema documents and Terraform provisioning declarations for a
//! headless CMS. The transformation is a pure function of
//! (schema, type, config); all I/O belongs to the caller.

/// Shared error types.
pub mod error;

/// Generator configuration.
pub mod config;

/// Annotated schema document IR and marker lookup.
pub mod schema;

/// Type reference resolution and classification.
pub mod type_mapping;

/// Schema rule validation.
pub mod validation;

/// Content-type JSON Schema generation.
pub mod schema_generator;

/// Terraform resource generation.
pub mod terraform;

/// Small shared helpers.
pub mod util;

pub use config::{GeneratorConfig, DEFAULT_HOSTNAME};
pub use error::{AppError, AppResult};
pub use schema::{
    find_marker, has_marker, Annotated, EnumDefinition, FieldDefinition, Marker, MarkerArgument,
    MarkerValue, ObjectDefinition, ScalarDefinition, SchemaDocument, TypeDefinition, TypeRef,
    UnionDefinition,
};
pub use schema_generator::{
    content_type_schema_body, generate_schemas, type_uri, GeneratedSchema, SCHEMA_DRAFT,
};
pub use terraform::{generate_resources, TerraformConfig, Visualization};
pub use type_mapping::{base_type, classify, is_list_type, switch_array, type_name, TypeClass};
pub use validation::validate_document;
