// MCP tool trait and registry

use super::validate::validate_arguments;
use crate::error::{McpError, McpResult};
use crate::protocol::{CallToolResult, ToolSchema};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with arguments that already passed schema validation
    async fn execute(&self, arguments: Value) -> McpResult<CallToolResult>;
}

/// Tool registry for managing available tools
///
/// Listing preserves registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. Names must be unique.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> McpResult<()> {
        let name = tool.schema().name;
        if self.index.contains_key(&name) {
            return Err(McpError::DuplicateTool(name));
        }
        tracing::info!(tool = %name, "Registered tool");
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| self.tools[i].clone())
    }

    /// List all tool schemas
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validate arguments against the tool's input schema, then run it.
    ///
    /// Missing arguments are treated as an empty object. Validation failures
    /// return before the tool body executes.
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> McpResult<CallToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))?;

        let arguments = arguments.unwrap_or_else(|| Value::Object(Default::default()));
        let schema = tool.schema();
        validate_arguments(&schema.name, &schema.input_schema, &arguments)?;

        tracing::debug!(tool = %name, "Executing tool");
        tool.execute(arguments).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "$schema": "http://json-schema.org/draft-07/schema#"
    })
}

pub fn json_schema_string(description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}
