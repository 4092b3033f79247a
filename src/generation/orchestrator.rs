//! Emission driver: orchestrates extraction and emission over one document
//!
//! Runs the whole pipeline synchronously and aborts on the first fatal
//! error; the provider table is owned here for exactly one document's
//! lifetime.

use anyhow::Context;
use serde_json::Value as JsonValue;

use crate::generation::models::emit_model;
use crate::generation::operations::emit_operation;
use crate::generation::providers::ProviderSet;
use crate::generation::types::ApiContext;
use crate::openapi::{extract_schemas, extract_services};

/// Resolves one document into the ordered renderable collections.
pub fn build_api_context(doc: &JsonValue) -> anyhow::Result<ApiContext> {
    let schemas = extract_schemas(doc).context("could not extract schemas")?;
    let services = extract_services(doc).context("could not extract services")?;
    tracing::debug!(
        schemas = schemas.len(),
        operations = services.len(),
        "document extracted"
    );

    let mut models = Vec::with_capacity(schemas.len());
    for (name, schema) in &schemas {
        let unit = emit_model(name, schema)
            .with_context(|| format!("error processing schema `{name}`"))?;
        models.push(unit);
    }

    let mut providers = ProviderSet::new();
    let mut errors = Vec::new();
    let mut methods = Vec::with_capacity(services.len());
    for service in &services {
        let (error, method) = emit_operation(service, &mut providers).with_context(|| {
            format!(
                "error processing operation `{} {}`",
                service.method, service.path
            )
        })?;
        if let Some(error) = error {
            errors.push(error);
        }
        methods.push(method);
    }

    tracing::debug!(
        models = models.len(),
        errors = errors.len(),
        methods = methods.len(),
        "emission complete"
    );

    Ok(ApiContext {
        models,
        errors,
        methods,
        providers: providers.into_units(),
    })
}
