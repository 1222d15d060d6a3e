#![deny(missing_docs)]

//! # Schema Module
//!
//! The annotated schema document consumed by the generator.
//!
//! - **models**: Intermediate Representation definitions.
//! - **markers**: marker presence checks and argument extraction.

pub mod markers;
pub mod models;

// Re-export major types and functions to keep call sites short
pub use markers::{find_marker, has_marker, Annotated};
pub use models::{
    EnumDefinition, FieldDefinition, Marker, MarkerArgument, MarkerValue, ObjectDefinition,
    ScalarDefinition, SchemaDocument, TypeDefinition, TypeRef, UnionDefinition,
};
