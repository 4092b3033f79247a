//! Type resolution: schema nodes to Rust type expressions
//!
//! Every target type expression in the emitted units comes from this module,
//! so the scalar mapping and the inlining rules live in exactly one place.

use crate::generation::GenerationError;
use crate::openapi::{Schema, SchemaOrRef};

/// Renders a schema node as a type usable inline inside another type.
///
/// Scalars use the fixed primitive mapping, references resolve to the
/// referenced name verbatim, arrays become `Vec<..>` and pure-map objects
/// become `HashMap<String, ..>`. A property-bearing object (or one with
/// neither properties nor a value schema) may only appear as a named
/// top-level entry, never inlined inside a container.
pub fn render_inline(node: &SchemaOrRef) -> Result<String, GenerationError> {
    match node {
        SchemaOrRef::Ref(reference) => Ok(reference.name().to_string()),
        SchemaOrRef::Inline(schema) => match schema.as_ref() {
            Schema::Integer(_) => Ok("i64".to_string()),
            Schema::Number(_) => Ok("f64".to_string()),
            Schema::String(_) => Ok("String".to_string()),
            Schema::Boolean(_) => Ok("bool".to_string()),
            Schema::Array(array) => Ok(format!("Vec<{}>", render_inline(&array.items)?)),
            Schema::Object(object) => match &object.additional_properties {
                Some(value) if object.properties.is_none() => {
                    Ok(format!("HashMap<String, {}>", render_inline(value)?))
                }
                _ => Err(GenerationError::UnsupportedShapeError(format!(
                    "cannot render `{}` schema as inline type",
                    schema.kind()
                ))),
            },
        },
    }
}

/// Resolves a schema node to its final type expression, wrapping in
/// `Option<..>` when the node is not required.
///
/// Optionality is applied only here, never inside container recursion.
pub fn resolve(node: &SchemaOrRef, required: bool) -> Result<String, GenerationError> {
    let inline = render_inline(node)?;
    if required {
        Ok(inline)
    } else {
        Ok(format!("Option<{inline}>"))
    }
}
