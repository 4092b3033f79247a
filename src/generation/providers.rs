//! Shared default-value providers
//!
//! A parameter default becomes a small generated function returning the
//! literal. Two parameters with the same literal value share one provider, so
//! the accumulator deduplicates across the whole document. It is owned by the
//! emission driver for one run and discarded afterwards.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::generation::GenerationError;
use crate::generation::utils::to_snake_case;

/// One deduplicated default-value function in the generated output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provider {
    pub name: String,
    pub rust_type: String,
    pub literal: String,
}

/// Accumulates default literals in first-seen order, deduplicated by value.
#[derive(Debug, Default)]
pub struct ProviderSet {
    entries: IndexMap<String, Provider>,
}

impl ProviderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a literal default and returns the provider function name.
    ///
    /// The name is a pure function of the literal's value and type, so
    /// repeated occurrences land on the same entry no matter where in the
    /// document they appear. Distinct literals may slug to the same base
    /// name (`"a-b"` and `"a b"` both slug to `a_b`); those get a numeric
    /// suffix so every entry keeps a unique function name.
    pub fn intern(&mut self, value: &JsonValue, rust_type: &str) -> Result<String, GenerationError> {
        let literal = render_literal(value, rust_type)?;
        let key = format!("{rust_type}:{literal}");
        if let Some(existing) = self.entries.get(&key) {
            return Ok(existing.name.clone());
        }

        let base = provider_name(value, rust_type);
        let mut name = base.clone();
        let mut suffix = 2;
        while self.entries.values().any(|provider| provider.name == name) {
            name = format!("{base}_{suffix}");
            suffix += 1;
        }

        self.entries.insert(
            key,
            Provider {
                name: name.clone(),
                rust_type: rust_type.to_string(),
                literal,
            },
        );
        Ok(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the set, yielding providers in first-seen order.
    pub fn into_units(self) -> Vec<Provider> {
        self.entries.into_values().collect()
    }
}

fn provider_name(value: &JsonValue, rust_type: &str) -> String {
    let value_slug = match value {
        JsonValue::String(s) => to_snake_case(s),
        JsonValue::Number(n) => n.to_string().replace('-', "neg").replace('.', "_"),
        JsonValue::Bool(b) => b.to_string(),
        _ => "value".to_string(),
    };
    format!("default_{}_{}", rust_type.to_lowercase(), value_slug)
}

fn render_literal(value: &JsonValue, rust_type: &str) -> Result<String, GenerationError> {
    match (rust_type, value) {
        ("String", JsonValue::String(s)) => Ok(format!("{s:?}.to_string()")),
        ("i64", JsonValue::Number(n)) if n.is_i64() => Ok(n.to_string()),
        ("f64", JsonValue::Number(n)) => {
            let float = n.as_f64().ok_or_else(|| {
                GenerationError::UnsupportedShapeError(format!("default `{n}` is not a valid f64"))
            })?;
            if float.fract() == 0.0 {
                Ok(format!("{float:.1}"))
            } else {
                Ok(float.to_string())
            }
        }
        ("bool", JsonValue::Bool(b)) => Ok(b.to_string()),
        _ => Err(GenerationError::UnsupportedShapeError(format!(
            "default `{value}` cannot be rendered as a `{rust_type}` literal"
        ))),
    }
}
