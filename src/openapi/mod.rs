//! Typed intermediate model of the input document
//!
//! The raw document arrives as one `serde_json::Value` tree (YAML input is
//! parsed into the same shape); the extraction entry points here validate it
//! into the discriminated schema and service grammars.

pub mod schema;
pub mod service;

pub use schema::{
    ArraySchema, BooleanSchema, IntegerSchema, NumberSchema, ObjectSchema, Schema, SchemaOrRef,
    SchemaRef, StringSchema, extract_schemas,
};
pub use service::{MediaObject, Parameter, Response, Service, extract_services};
