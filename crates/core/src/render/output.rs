//! Defensive access to host-injected tool output.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool output injected by the host into the widget page.
///
/// The shape is not guaranteed: hosts may pass the full call result
/// (`result.structuredContent`), the structured content object itself, or
/// flat fields. Lookups never fail, they return `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolOutput(Map<String, Value>);

impl ToolOutput {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Accepts any JSON value; non-objects yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Look up a string field in priority order:
    /// `result.structuredContent.<key>`, `structuredContent.<key>`, `<key>`.
    ///
    /// Empty strings count as absent.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.nested_structured(key)
            .or_else(|| self.structured(key))
            .or_else(|| self.top_level(key))
    }

    fn nested_structured(&self, key: &str) -> Option<&str> {
        let result = self.0.get("result")?;
        non_empty_str(result.get("structuredContent")?.get(key)?)
    }

    fn structured(&self, key: &str) -> Option<&str> {
        non_empty_str(self.0.get("structuredContent")?.get(key)?)
    }

    fn top_level(&self, key: &str) -> Option<&str> {
        non_empty_str(self.0.get(key)?)
    }
}

impl From<Map<String, Value>> for ToolOutput {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}
