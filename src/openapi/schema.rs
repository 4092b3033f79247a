//! Typed schema grammar for the document's `components.schemas` section
//!
//! One node of the type grammar is a closed tagged union discriminated by the
//! `type` field; anything that does not fit one of the variants is rejected at
//! the grammar boundary instead of surfacing later as a loosely-typed lookup
//! failure.

use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;

use crate::generation::GenerationError;

/// A `$ref` pointer to a named top-level schema. Never owns data; resolution
/// is by trailing-name lookup only, so reference cycles are permitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRef {
    #[serde(rename = "$ref")]
    pub target: String,
}

impl SchemaRef {
    /// The referenced schema name, i.e. the trailing segment of the pointer.
    pub fn name(&self) -> &str {
        self.target.rsplit('/').next().unwrap_or(self.target.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberSchema {
    pub title: Option<String>,
    pub description: Option<String>,
    pub example: Option<f64>,
    pub default: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegerSchema {
    pub title: Option<String>,
    pub description: Option<String>,
    pub example: Option<i64>,
    pub default: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringSchema {
    pub title: Option<String>,
    pub description: Option<String>,
    pub example: Option<String>,
    /// A closed list of admissible literals; only string scalars carry one.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanSchema {
    pub title: Option<String>,
    pub description: Option<String>,
    pub example: Option<bool>,
    pub default: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Property names that must be present; absent in the document means empty.
    #[serde(default)]
    pub required: BTreeSet<String>,
    /// `properties` and `additional_properties` are mutually exclusive
    /// emission modes; neither being present is rejected at emission time.
    pub properties: Option<IndexMap<String, SchemaOrRef>>,
    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<SchemaOrRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArraySchema {
    pub title: Option<String>,
    pub description: Option<String>,
    pub items: SchemaOrRef,
}

/// One node in the description's type grammar, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Schema {
    Number(NumberSchema),
    Integer(IntegerSchema),
    String(StringSchema),
    Boolean(BooleanSchema),
    Object(ObjectSchema),
    Array(ArraySchema),
}

impl Schema {
    /// The grammar kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::Number(_) => "number",
            Schema::Integer(_) => "integer",
            Schema::String(_) => "string",
            Schema::Boolean(_) => "boolean",
            Schema::Object(_) => "object",
            Schema::Array(_) => "array",
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Schema::Number(_) | Schema::Integer(_) | Schema::String(_) | Schema::Boolean(_)
        )
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Schema::Number(s) => s.title.as_deref(),
            Schema::Integer(s) => s.title.as_deref(),
            Schema::String(s) => s.title.as_deref(),
            Schema::Boolean(s) => s.title.as_deref(),
            Schema::Object(s) => s.title.as_deref(),
            Schema::Array(s) => s.title.as_deref(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Schema::Number(s) => s.description.as_deref(),
            Schema::Integer(s) => s.description.as_deref(),
            Schema::String(s) => s.description.as_deref(),
            Schema::Boolean(s) => s.description.as_deref(),
            Schema::Object(s) => s.description.as_deref(),
            Schema::Array(s) => s.description.as_deref(),
        }
    }

    /// The scalar's literal default, if it carries one. Container shapes
    /// never do.
    pub fn default_value(&self) -> Option<JsonValue> {
        match self {
            Schema::Number(s) => s.default.map(JsonValue::from),
            Schema::Integer(s) => s.default.map(JsonValue::from),
            Schema::String(s) => s.default.clone().map(JsonValue::from),
            Schema::Boolean(s) => s.default.map(JsonValue::from),
            Schema::Object(_) | Schema::Array(_) => None,
        }
    }
}

/// Either an inline schema node or a reference to a named one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref(SchemaRef),
    Inline(Box<Schema>),
}

impl SchemaOrRef {
    pub fn as_inline(&self) -> Option<&Schema> {
        match self {
            SchemaOrRef::Inline(schema) => Some(schema),
            SchemaOrRef::Ref(_) => None,
        }
    }

    pub fn is_ref(&self) -> bool {
        matches!(self, SchemaOrRef::Ref(_))
    }
}

/// Extracts the named top-level schemas from a document, in document order.
///
/// An absent `components` (or `components.schemas`) section yields an empty
/// map rather than an error. Every entry is validated against the
/// discriminated grammar; a failure carries the schema name in its context.
pub fn extract_schemas(doc: &JsonValue) -> anyhow::Result<IndexMap<String, Schema>> {
    let Some(section) = doc.pointer("/components/schemas") else {
        return Ok(IndexMap::new());
    };

    let entries = section.as_object().ok_or_else(|| {
        GenerationError::GrammarError("components.schemas must be a mapping".to_string())
    })?;

    let mut schemas = IndexMap::with_capacity(entries.len());
    for (name, raw) in entries {
        let schema: Schema = serde_json::from_value(raw.clone())
            .map_err(|e| GenerationError::GrammarError(e.to_string()))
            .with_context(|| format!("processing schema `{name}`"))?;
        schemas.insert(name.clone(), schema);
    }

    Ok(schemas)
}
