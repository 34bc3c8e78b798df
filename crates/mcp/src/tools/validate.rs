// Argument validation against a tool's declared JSON input schema.
//
// Covers the subset of JSON Schema used by tool declarations: an object
// with typed properties, a `required` list and `additionalProperties`.

use crate::error::{McpError, McpResult};
use serde_json::Value;

pub fn validate_arguments(tool: &str, schema: &Value, arguments: &Value) -> McpResult<()> {
    let invalid = |message: String| McpError::InvalidArguments {
        tool: tool.to_string(),
        message,
    };

    let args = arguments
        .as_object()
        .ok_or_else(|| invalid(format!("arguments must be an object, got {}", type_name(arguments))))?;

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for field in required.iter().filter_map(Value::as_str) {
            if !args.contains_key(field) {
                return Err(invalid(format!("missing required field '{}'", field)));
            }
        }
    }

    let properties = schema.get("properties").and_then(Value::as_object);
    let closed = schema.get("additionalProperties") == Some(&Value::Bool(false));

    for (key, value) in args {
        let Some(property) = properties.and_then(|p| p.get(key)) else {
            if closed {
                return Err(invalid(format!("unexpected field '{}'", key)));
            }
            continue;
        };

        if let Some(expected) = property.get("type").and_then(Value::as_str) {
            if !matches_type(expected, value) {
                return Err(invalid(format!(
                    "field '{}' must be {}, got {}",
                    key,
                    expected,
                    type_name(value)
                )));
            }
        }
    }

    Ok(())
}

fn matches_type(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
