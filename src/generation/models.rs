//! Struct/enum emitter: named schema entries to renderable model units
//!
//! Exactly four shapes are emittable as named top-level units: sequence
//! wrappers, property structs, string-keyed map wrappers, and closed string
//! enumerations. Everything else is rejected here rather than half-rendered.

use anyhow::Context;
use indexmap::IndexMap;
use std::collections::BTreeSet;

use crate::generation::GenerationError;
use crate::generation::resolver::{render_inline, resolve};
use crate::generation::sanitizers::sanitize_doc;
use crate::generation::types::{EnumVariantUnit, FieldUnit, ModelUnit};
use crate::generation::utils::{sanitize_rust_field_name, to_proper_case};
use crate::openapi::{Schema, SchemaOrRef};

fn emit_fields(
    properties: &IndexMap<String, SchemaOrRef>,
    required: &BTreeSet<String>,
) -> anyhow::Result<Vec<FieldUnit>> {
    let mut fields = Vec::with_capacity(properties.len());
    for (property, node) in properties {
        let rust_type = resolve(node, required.contains(property))
            .with_context(|| format!("could not serialize property `{property}`"))?;

        let name = sanitize_rust_field_name(property);
        let wire_name = (name != *property).then(|| property.clone());
        let doc = node
            .as_inline()
            .and_then(Schema::description)
            .map(sanitize_doc);

        fields.push(FieldUnit {
            name,
            wire_name,
            doc,
            rust_type,
        });
    }
    Ok(fields)
}

/// Turns one named schema entry into a renderable model unit.
///
/// A declared `title` must equal the registration key; when absent no check
/// is performed.
pub fn emit_model(name: &str, schema: &Schema) -> anyhow::Result<ModelUnit> {
    if let Some(title) = schema.title() {
        if title != name {
            return Err(GenerationError::ConsistencyError(format!(
                "schema `{name}` declares title `{title}`"
            ))
            .into());
        }
    }

    let doc = schema.description().map(sanitize_doc);

    match schema {
        Schema::Array(array) => {
            let item_type =
                render_inline(&array.items).context("could not resolve sequence item type")?;
            Ok(ModelUnit::Vec {
                name: name.to_string(),
                doc,
                item_type,
            })
        }
        Schema::Object(object) => {
            if let Some(properties) = &object.properties {
                let fields = emit_fields(properties, &object.required)
                    .context("could not serialize properties")?;
                Ok(ModelUnit::Struct {
                    name: name.to_string(),
                    doc,
                    fields,
                })
            } else if let Some(value) = &object.additional_properties {
                let value_type =
                    render_inline(value).context("could not resolve map value type")?;
                Ok(ModelUnit::Map {
                    name: name.to_string(),
                    doc,
                    value_type,
                })
            } else {
                Err(GenerationError::UnsupportedShapeError(
                    "unsupported schema type: object with neither properties nor additionalProperties"
                        .to_string(),
                )
                .into())
            }
        }
        Schema::String(string) => match string.enum_values.as_deref() {
            Some(literals) if !literals.is_empty() => {
                let variants = literals
                    .iter()
                    .map(|literal| EnumVariantUnit {
                        name: to_proper_case(literal),
                        literal: literal.clone(),
                    })
                    .collect();
                Ok(ModelUnit::Enum {
                    name: name.to_string(),
                    doc,
                    variants,
                })
            }
            _ => Err(GenerationError::UnsupportedShapeError(
                "unsupported schema type: string without a closed enum".to_string(),
            )
            .into()),
        },
        other => Err(GenerationError::UnsupportedShapeError(format!(
            "unsupported schema type: {}",
            other.kind()
        ))
        .into()),
    }
}
