//! Renderable unit records handed to the template renderer
//!
//! Everything here is a plain field-value record: the renderer consumes the
//! serialized form and knows nothing about the schema grammar these were
//! derived from.

use serde::Serialize;

pub use crate::generation::providers::Provider;

/// One field of a struct unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldUnit {
    pub name: String,
    /// The original document name, kept when sanitizing changed it so the
    /// wire-level key survives as a serde rename.
    pub wire_name: Option<String>,
    pub doc: Option<String>,
    pub rust_type: String,
}

/// One variant of a closed string enumeration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumVariantUnit {
    pub name: String,
    pub literal: String,
}

/// One named model, tagged by shape for the template's dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelUnit {
    Struct {
        name: String,
        doc: Option<String>,
        fields: Vec<FieldUnit>,
    },
    Vec {
        name: String,
        doc: Option<String>,
        item_type: String,
    },
    Map {
        name: String,
        doc: Option<String>,
        value_type: String,
    },
    Enum {
        name: String,
        doc: Option<String>,
        variants: Vec<EnumVariantUnit>,
    },
}

impl ModelUnit {
    pub fn name(&self) -> &str {
        match self {
            ModelUnit::Struct { name, .. }
            | ModelUnit::Vec { name, .. }
            | ModelUnit::Map { name, .. }
            | ModelUnit::Enum { name, .. } => name,
        }
    }
}

/// One variant of a per-operation error enumeration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorVariantUnit {
    pub name: String,
    /// The literal detail string from the error body enumeration.
    pub detail: String,
    pub code: String,
    /// `StatusCode` constant name from the status registry.
    pub code_name: &'static str,
}

/// The dedicated error enumeration of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorUnit {
    pub name: String,
    pub operation_id: String,
    pub variants: Vec<ErrorVariantUnit>,
}

/// One handler parameter of a route descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamUnit {
    pub name: String,
    pub wire_name: Option<String>,
    pub rust_type: String,
    /// Provider function name when the parameter carries a literal default.
    pub provider: Option<String>,
}

/// One route descriptor: everything the template needs for a handler
/// signature and its registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteUnit {
    pub doc: String,
    pub operation_id: String,
    pub method: String,
    pub path: String,
    pub response_type: String,
    pub error_type: Option<String>,
    /// Exactly one synthetic entry in full-request mode, empty otherwise.
    pub request_params: Vec<ParamUnit>,
    pub path_params: Vec<ParamUnit>,
    pub query_params: Vec<ParamUnit>,
}

/// The ordered output of one document's emission, in renderer form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApiContext {
    pub models: Vec<ModelUnit>,
    pub errors: Vec<ErrorUnit>,
    pub methods: Vec<RouteUnit>,
    pub providers: Vec<Provider>,
}
