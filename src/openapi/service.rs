//! Typed service grammar for the document's `paths` section
//!
//! One service is one path x method pair. Parameter references into the
//! shared `components.parameters` table are resolved eagerly here, so a
//! [`Service`] never retains an unresolved reference.

use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::generation::GenerationError;
use crate::openapi::schema::SchemaOrRef;

/// HTTP methods recognized in a path item; other keys are ignored.
const HTTP_METHODS: [&str; 7] = ["get", "post", "put", "delete", "patch", "head", "options"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaObject {
    pub schema: SchemaOrRef,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Response {
    pub description: String,
    pub content: IndexMap<String, MediaObject>,
}

/// One operation parameter, with any `$ref` already resolved.
///
/// `location` is kept as raw text; the operation emitter owns the closed
/// `path`/`query` vocabulary and the rejection of anything else.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    pub schema: SchemaOrRef,
    /// Literal default lifted out of the scalar schema during extraction.
    #[serde(skip)]
    pub default: Option<JsonValue>,
}

/// One HTTP operation of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub path: String,
    pub method: String,
    pub summary: String,
    pub operation_id: String,
    pub responses: IndexMap<String, Response>,
    pub parameters: Vec<Parameter>,
}

/// Derives a fallback operation id from the path when `operationId` is absent.
fn path_to_slug(path: &str) -> String {
    path.trim_matches('/')
        .replace('-', "_")
        .replace('/', "_")
        .replace(['{', '}'], "")
        .to_lowercase()
        .replace("__", "_")
}

/// Builds the shared parameter lookup table from `components.parameters`,
/// keyed by the pointer form inline references use.
fn shared_parameter_table(doc: &JsonValue) -> IndexMap<String, JsonValue> {
    let mut table = IndexMap::new();
    if let Some(entries) = doc
        .pointer("/components/parameters")
        .and_then(JsonValue::as_object)
    {
        for (name, definition) in entries {
            table.insert(format!("#/components/parameters/{name}"), definition.clone());
        }
    }
    table
}

fn parse_parameter(
    raw: &JsonValue,
    table: &IndexMap<String, JsonValue>,
) -> anyhow::Result<Parameter> {
    let definition = match raw.get("$ref").and_then(JsonValue::as_str) {
        Some(pointer) => table.get(pointer).ok_or_else(|| {
            GenerationError::ReferenceResolutionError(pointer.to_string())
        })?,
        None => raw,
    };

    let mut parameter: Parameter = serde_json::from_value(definition.clone())
        .map_err(|e| GenerationError::GrammarError(e.to_string()))?;
    parameter.default = parameter
        .schema
        .as_inline()
        .and_then(|schema| schema.default_value());
    Ok(parameter)
}

fn parse_service(
    path: &str,
    method: &str,
    operation: &JsonValue,
    table: &IndexMap<String, JsonValue>,
) -> anyhow::Result<Service> {
    let mut parameters = Vec::new();
    if let Some(raw_parameters) = operation.get("parameters").and_then(JsonValue::as_array) {
        for raw in raw_parameters {
            let parameter = parse_parameter(raw, table).with_context(|| {
                format!("could not resolve parameter {raw}")
            })?;
            parameters.push(parameter);
        }
    }

    let responses_value = operation.get("responses").ok_or_else(|| {
        GenerationError::GrammarError("operation has no responses".to_string())
    })?;
    let responses: IndexMap<String, Response> = serde_json::from_value(responses_value.clone())
        .map_err(|e| GenerationError::GrammarError(e.to_string()))
        .context("could not parse responses")?;

    let operation_id = operation
        .get("operationId")
        .and_then(JsonValue::as_str)
        .map(String::from)
        .unwrap_or_else(|| path_to_slug(path));

    let summary = operation
        .get("summary")
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Service {
        path: path.to_string(),
        method: method.to_string(),
        summary,
        operation_id,
        responses,
        parameters,
    })
}

/// Extracts every path x method operation of the document, in document order.
///
/// An absent `paths` section yields zero services. A parameter expressed as a
/// `$ref` is resolved against the shared parameter table; an unknown name is
/// a fatal lookup error.
pub fn extract_services(doc: &JsonValue) -> anyhow::Result<Vec<Service>> {
    let table = shared_parameter_table(doc);

    let Some(paths) = doc.get("paths").and_then(JsonValue::as_object) else {
        return Ok(Vec::new());
    };

    let mut services = Vec::new();
    for (path, path_item) in paths {
        for method in HTTP_METHODS {
            let Some(operation) = path_item.get(method) else {
                continue;
            };
            let service = parse_service(path, method, operation, &table)
                .with_context(|| format!("processing operation `{method} {path}`"))?;
            services.push(service);
        }
    }

    tracing::debug!(operations = services.len(), "services extracted");
    Ok(services)
}
