//! Operation emitter: service entries to route descriptors and error enums
//!
//! Per operation this derives the handler return type from the `200`
//! response, an optional dedicated error enumeration from the non-2xx
//! responses, and the parameter groupings (full-request fallback, path,
//! query), promoting literal defaults into the shared provider table.

use anyhow::Context;

use crate::generation::GenerationError;
use crate::generation::providers::ProviderSet;
use crate::generation::resolver::{render_inline, resolve};
use crate::generation::sanitizers::sanitize_doc;
use crate::generation::status::status_code_name;
use crate::generation::types::{ErrorUnit, ErrorVariantUnit, ParamUnit, RouteUnit};
use crate::generation::utils::{sanitize_rust_field_name, to_proper_case};
use crate::openapi::{Parameter, Schema, SchemaOrRef, Service};

/// The only media type the generator recognizes in response content.
pub const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParameterLocation {
    Path,
    Query,
}

fn parameter_location(raw: &str) -> Result<ParameterLocation, GenerationError> {
    match raw {
        "path" => Ok(ParameterLocation::Path),
        "query" => Ok(ParameterLocation::Query),
        other => Err(GenerationError::UnsupportedShapeError(format!(
            "unrecognized parameter location `{other}`"
        ))),
    }
}

/// Scalar response bodies stay bare; everything else arrives as a JSON body.
fn render_response_type(node: &SchemaOrRef) -> Result<String, GenerationError> {
    match node.as_inline() {
        Some(schema) if schema.is_scalar() => render_inline(node),
        _ => Ok(format!("web::Json<{}>", render_inline(node)?)),
    }
}

fn emit_error(service: &Service) -> anyhow::Result<Option<ErrorUnit>> {
    let mut variants = Vec::new();

    for (code, response) in &service.responses {
        if code.starts_with('2') {
            continue;
        }

        let media = response.content.get(JSON_MEDIA_TYPE).ok_or_else(|| {
            GenerationError::GrammarError(format!(
                "response `{code}` has no {JSON_MEDIA_TYPE} content"
            ))
        })?;

        let literals = match media.schema.as_inline() {
            Some(Schema::String(string)) => string
                .enum_values
                .as_deref()
                .filter(|values| !values.is_empty())
                .ok_or_else(|| {
                    GenerationError::UnsupportedShapeError(format!(
                        "error response `{code}` must enumerate its variants"
                    ))
                })?,
            _ => {
                return Err(GenerationError::UnsupportedShapeError(
                    "only enumerated string bodies are allowed in error responses".to_string(),
                )
                .into());
            }
        };

        let code_name = status_code_name(code)
            .ok_or_else(|| {
                GenerationError::UnsupportedShapeError(format!("unmapped status code `{code}`"))
            })
            .with_context(|| format!("processing error response `{code}`"))?;

        for literal in literals {
            variants.push(ErrorVariantUnit {
                name: to_proper_case(literal),
                detail: literal.clone(),
                code: code.clone(),
                code_name,
            });
        }
    }

    if variants.is_empty() {
        return Ok(None);
    }

    Ok(Some(ErrorUnit {
        name: format!("{}Error", to_proper_case(&service.operation_id)),
        operation_id: service.operation_id.clone(),
        variants,
    }))
}

fn emit_parameter(parameter: &Parameter, providers: &mut ProviderSet) -> anyhow::Result<ParamUnit> {
    let mut required = parameter.required;
    let mut provider = None;

    // A default stands in for absence, so the parameter is treated as
    // required even when the source marked it optional.
    if let Some(default) = &parameter.default {
        let rust_type = render_inline(&parameter.schema)?;
        provider = Some(providers.intern(default, &rust_type)?);
        required = true;
    }

    let rust_type = resolve(&parameter.schema, required)
        .with_context(|| format!("could not resolve parameter `{}`", parameter.name))?;

    let name = sanitize_rust_field_name(&parameter.name);
    let wire_name = (name != parameter.name).then(|| parameter.name.clone());

    Ok(ParamUnit {
        name,
        wire_name,
        rust_type,
        provider,
    })
}

fn full_request_parameter() -> ParamUnit {
    ParamUnit {
        name: "request".to_string(),
        wire_name: None,
        rust_type: "HttpRequest".to_string(),
        provider: None,
    }
}

/// Turns one service entry into its optional error unit and route descriptor.
pub fn emit_operation(
    service: &Service,
    providers: &mut ProviderSet,
) -> anyhow::Result<(Option<ErrorUnit>, RouteUnit)> {
    let success = service.responses.get("200").ok_or_else(|| {
        GenerationError::GrammarError("operation has no \"200\" response".to_string())
    })?;
    let media = success.content.get(JSON_MEDIA_TYPE).ok_or_else(|| {
        GenerationError::GrammarError(format!(
            "\"200\" response has no {JSON_MEDIA_TYPE} content"
        ))
    })?;
    let response_type =
        render_response_type(&media.schema).context("could not resolve response type")?;

    let error = emit_error(service)?;

    let mut request_params = Vec::new();
    let mut path_params = Vec::new();
    let mut query_params = Vec::new();

    // Classification runs ahead of emission: a query parameter backed by a
    // named reference cannot be given an individual extractor type, and once
    // it forces full-request mode the earlier parameters must leave no trace
    // in the shared provider table either.
    let mut locations = Vec::with_capacity(service.parameters.len());
    let mut fallback_at = None;
    for (index, parameter) in service.parameters.iter().enumerate() {
        let location = parameter_location(&parameter.location)
            .with_context(|| format!("could not classify parameter `{}`", parameter.name))?;
        if location == ParameterLocation::Query && parameter.schema.is_ref() {
            fallback_at = Some(index);
            break;
        }
        locations.push(location);
    }

    if let Some(discarded) = fallback_at {
        if discarded > 0 {
            tracing::warn!(
                operation = %service.operation_id,
                discarded,
                "query reference parameter forces full-request mode, dropping already classified parameters"
            );
        }
        request_params.push(full_request_parameter());
    } else {
        for (parameter, location) in service.parameters.iter().zip(locations) {
            let unit = emit_parameter(parameter, providers)?;
            match location {
                ParameterLocation::Path => path_params.push(unit),
                ParameterLocation::Query => query_params.push(unit),
            }
        }
    }

    let route = RouteUnit {
        doc: sanitize_doc(&service.summary),
        operation_id: service.operation_id.clone(),
        method: service.method.clone(),
        path: service.path.clone(),
        response_type,
        error_type: error.as_ref().map(|unit| unit.name.clone()),
        request_params,
        path_params,
        query_params,
    };

    Ok((error, route))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::extract_services;
    use serde_json::json;

    fn service_from(doc: serde_json::Value) -> Service {
        extract_services(&doc)
            .unwrap()
            .into_iter()
            .next()
            .expect("one service")
    }

    fn responses_200_string() -> serde_json::Value {
        json!({
            "200": {
                "description": "ok",
                "content": {
                    "application/json": { "schema": { "type": "string" } }
                }
            }
        })
    }

    #[test]
    fn test_success_only_operation_has_no_error_type() {
        let service = service_from(json!({
            "paths": {
                "/ping": { "get": { "responses": responses_200_string() } }
            }
        }));

        let mut providers = ProviderSet::new();
        let (error, route) = emit_operation(&service, &mut providers).unwrap();
        assert!(error.is_none());
        assert_eq!(route.error_type, None);
        assert_eq!(route.response_type, "String");
        assert!(route.request_params.is_empty());
        assert!(providers.is_empty());
    }

    #[test]
    fn test_reference_response_is_json_wrapped() {
        let service = service_from(json!({
            "paths": {
                "/widgets": {
                    "get": {
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/WidgetList" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }));

        let mut providers = ProviderSet::new();
        let (_, route) = emit_operation(&service, &mut providers).unwrap();
        assert_eq!(route.response_type, "web::Json<WidgetList>");
    }

    #[test]
    fn test_error_enum_from_non_2xx_responses() {
        let service = service_from(json!({
            "paths": {
                "/widgets/{id}": {
                    "get": {
                        "operationId": "get_widget",
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": { "schema": { "type": "string" } }
                                }
                            },
                            "404": {
                                "description": "missing",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "string",
                                            "enum": ["no-such-widget", "tombstoned"]
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }));

        let mut providers = ProviderSet::new();
        let (error, route) = emit_operation(&service, &mut providers).unwrap();
        let error = error.expect("error unit");
        assert_eq!(error.name, "GetWidgetError");
        assert_eq!(route.error_type.as_deref(), Some("GetWidgetError"));
        assert_eq!(error.variants.len(), 2);
        assert_eq!(error.variants[0].name, "NoSuchWidget");
        assert_eq!(error.variants[0].code, "404");
        assert_eq!(error.variants[0].code_name, "NOT_FOUND");
    }

    #[test]
    fn test_non_string_error_body_is_rejected() {
        let service = service_from(json!({
            "paths": {
                "/widgets": {
                    "get": {
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": { "schema": { "type": "string" } }
                                }
                            },
                            "400": {
                                "description": "bad",
                                "content": {
                                    "application/json": { "schema": { "type": "integer" } }
                                }
                            }
                        }
                    }
                }
            }
        }));

        let mut providers = ProviderSet::new();
        let err = emit_operation(&service, &mut providers).unwrap_err();
        assert!(
            err.to_string()
                .contains("only enumerated string bodies are allowed in error responses")
        );
    }

    #[test]
    fn test_unmapped_status_code_is_rejected() {
        let service = service_from(json!({
            "paths": {
                "/widgets": {
                    "get": {
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": { "schema": { "type": "string" } }
                                }
                            },
                            "499": {
                                "description": "nonstandard",
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "string", "enum": ["nope"] }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }));

        let mut providers = ProviderSet::new();
        let err = emit_operation(&service, &mut providers).unwrap_err();
        let report = format!("{err:?}");
        assert!(report.contains("unmapped status code `499`"));
        assert!(report.contains("processing error response `499`"));
    }

    #[test]
    fn test_parameters_are_split_by_location() {
        let service = service_from(json!({
            "paths": {
                "/widgets/{id}": {
                    "get": {
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer" }
                            },
                            {
                                "name": "verbose",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "boolean" }
                            }
                        ],
                        "responses": responses_200_string()
                    }
                }
            }
        }));

        let mut providers = ProviderSet::new();
        let (_, route) = emit_operation(&service, &mut providers).unwrap();
        assert_eq!(route.path_params.len(), 1);
        assert_eq!(route.path_params[0].rust_type, "i64");
        assert_eq!(route.query_params.len(), 1);
        assert_eq!(route.query_params[0].rust_type, "Option<bool>");
    }

    #[test]
    fn test_unrecognized_location_is_rejected() {
        let service = service_from(json!({
            "paths": {
                "/widgets": {
                    "get": {
                        "parameters": [
                            {
                                "name": "token",
                                "in": "header",
                                "required": true,
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": responses_200_string()
                    }
                }
            }
        }));

        let mut providers = ProviderSet::new();
        let err = emit_operation(&service, &mut providers).unwrap_err();
        assert!(format!("{err:?}").contains("unrecognized parameter location `header`"));
    }

    #[test]
    fn test_query_reference_forces_full_request_mode() {
        let service = service_from(json!({
            "paths": {
                "/widgets/{id}": {
                    "get": {
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer" }
                            },
                            {
                                "name": "filter",
                                "in": "query",
                                "required": false,
                                "schema": { "$ref": "#/components/schemas/Filter" }
                            }
                        ],
                        "responses": responses_200_string()
                    }
                }
            }
        }));

        let mut providers = ProviderSet::new();
        let (_, route) = emit_operation(&service, &mut providers).unwrap();
        assert!(route.path_params.is_empty());
        assert!(route.query_params.is_empty());
        assert_eq!(route.request_params.len(), 1);
        assert_eq!(route.request_params[0].name, "request");
        assert_eq!(route.request_params[0].rust_type, "HttpRequest");
    }

    #[test]
    fn test_full_request_mode_interns_no_providers() {
        let service = service_from(json!({
            "paths": {
                "/widgets": {
                    "get": {
                        "parameters": [
                            {
                                "name": "limit",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "integer", "default": 20 }
                            },
                            {
                                "name": "filter",
                                "in": "query",
                                "required": false,
                                "schema": { "$ref": "#/components/schemas/Filter" }
                            }
                        ],
                        "responses": responses_200_string()
                    }
                }
            }
        }));

        let mut providers = ProviderSet::new();
        let (_, route) = emit_operation(&service, &mut providers).unwrap();
        assert_eq!(route.request_params.len(), 1);
        // The discarded defaulted parameter must not leave a dead provider
        // function behind.
        assert!(providers.is_empty());
    }

    #[test]
    fn test_default_promotes_provider_and_required() {
        let service = service_from(json!({
            "paths": {
                "/widgets": {
                    "get": {
                        "parameters": [
                            {
                                "name": "limit",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "integer", "default": 20 }
                            }
                        ],
                        "responses": responses_200_string()
                    }
                }
            }
        }));

        let mut providers = ProviderSet::new();
        let (_, route) = emit_operation(&service, &mut providers).unwrap();
        let parameter = &route.query_params[0];
        // The default stands in for absence: no Option wrapping.
        assert_eq!(parameter.rust_type, "i64");
        assert_eq!(parameter.provider.as_deref(), Some("default_i64_20"));
        assert_eq!(providers.into_units().len(), 1);
    }

    #[test]
    fn test_parameter_name_sanitizing_keeps_wire_name() {
        let service = service_from(json!({
            "paths": {
                "/widgets": {
                    "get": {
                        "parameters": [
                            {
                                "name": "sortOrder",
                                "in": "query",
                                "required": true,
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": responses_200_string()
                    }
                }
            }
        }));

        let mut providers = ProviderSet::new();
        let (_, route) = emit_operation(&service, &mut providers).unwrap();
        let parameter = &route.query_params[0];
        assert_eq!(parameter.name, "sort_order");
        assert_eq!(parameter.wire_name.as_deref(), Some("sortOrder"));
    }
}
