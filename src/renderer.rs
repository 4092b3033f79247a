//! Tera-based rendering of the emitted units
//!
//! The renderer is a pure function from the serialized [`ApiContext`] to one
//! Rust source file; it knows nothing about the schema grammar. The template
//! is embedded in the binary.

use anyhow::Context;
use tera::Tera;

use crate::generation::ApiContext;

const API_TEMPLATE_NAME: &str = "api.rs.tera";
const API_TEMPLATE: &str = include_str!("../templates/api.rs.tera");

/// Renders the emitted collections into the generated API module source.
pub fn render_api(api: &ApiContext) -> anyhow::Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(API_TEMPLATE_NAME, API_TEMPLATE)
        .with_context(|| format!("could not render `{API_TEMPLATE_NAME}`"))?;

    let context =
        tera::Context::from_serialize(api).context("could not serialize render context")?;
    let rendered = tera
        .render(API_TEMPLATE_NAME, &context)
        .with_context(|| format!("could not render `{API_TEMPLATE_NAME}`"))?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::build_api_context;
    use serde_json::json;

    #[test]
    fn test_render_empty_document() {
        let api = build_api_context(&json!({})).unwrap();
        let rendered = render_api(&api).unwrap();
        assert!(rendered.contains("pub trait ApiService"));
        assert!(rendered.contains("pub async fn run_service"));
    }

    #[test]
    fn test_render_struct_and_route() {
        let api = build_api_context(&json!({
            "components": {
                "schemas": {
                    "Widget": {
                        "type": "object",
                        "required": ["id"],
                        "properties": {
                            "id": { "type": "integer" },
                            "label": { "type": "string" }
                        }
                    }
                }
            },
            "paths": {
                "/widgets/{id}": {
                    "get": {
                        "operationId": "get_widget",
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Widget" }
                                    }
                                }
                            },
                            "404": {
                                "description": "missing",
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "string", "enum": ["not-found"] }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }))
        .unwrap();

        let rendered = render_api(&api).unwrap();
        assert!(rendered.contains("pub struct Widget"));
        assert!(rendered.contains("pub id: i64,"));
        assert!(rendered.contains("pub label: Option<String>,"));
        assert!(rendered.contains("pub enum GetWidgetError"));
        assert!(rendered.contains("StatusCode::NOT_FOUND"));
        assert!(rendered.contains("async fn get_widget"));
        assert!(rendered.contains("web::Json<Widget>"));
        assert!(rendered.contains("\"/widgets/{id}\""));
    }

    #[test]
    fn test_render_providers() {
        let api = build_api_context(&json!({
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
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": { "schema": { "type": "string" } }
                                }
                            }
                        }
                    }
                }
            }
        }))
        .unwrap();

        let rendered = render_api(&api).unwrap();
        assert!(rendered.contains("pub fn default_i64_20() -> i64"));
    }
}
