//! Shared JSON settings
//!
//! Every class container carries one [`JsonSettings`] singleton so fixtures
//! serialize payloads the same way across a run. Object keys are written in
//! camelCase unless configured otherwise.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tcv_domain::error::Result;

/// How object keys are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyNaming {
    /// `snake_case`, `kebab-case` and `PascalCase` keys become `camelCase`
    #[default]
    CamelCase,
    /// Keys are kept as the serializer produced them
    AsDeclared,
}

/// JSON serialization settings shared by the fixtures of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonSettings {
    /// Naming applied to object keys
    pub key_naming: KeyNaming,

    /// Indent serialized text
    pub pretty: bool,
}

impl JsonSettings {
    /// Convert `value` to a JSON value with the configured key naming
    pub fn to_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value> {
        let value = serde_json::to_value(value)?;
        Ok(match self.key_naming {
            KeyNaming::CamelCase => camel_case_keys(value),
            KeyNaming::AsDeclared => value,
        })
    }

    /// Serialize `value` to JSON text
    pub fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let value = self.to_value(value)?;
        let text = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }
}

fn camel_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (camel_case(&key), camel_case_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(camel_case_keys).collect()),
        other => other,
    }
}

fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.chars() {
        if ch == '_' || ch == '-' {
            upper_next = !out.is_empty();
            continue;
        }
        if out.is_empty() {
            out.extend(ch.to_lowercase());
        } else if upper_next {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        upper_next = false;
    }
    out
}
