//! apigen - schema-driven Actix Web scaffolding generator
//!
//! Reads one OpenAPI-style document (YAML or JSON), validates it into a typed
//! intermediate model, resolves every node to a Rust type expression, and
//! emits renderable units (model types, per-operation error enums, route
//! descriptors, shared default-value providers) that a tera template turns
//! into a single generated server module.
#![deny(unsafe_code)]

pub mod generation;
pub mod openapi;
pub mod renderer;
