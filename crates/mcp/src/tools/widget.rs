// Widget-backed tools: each returns structured content for the page
// template it is bound to, plus that widget's fixed metadata.

use crate::error::{McpError, McpResult};
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use appsdk_core::Widget;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Literal payload returned by `retrieve_abc`
pub const ABC_DATA: &str = "abc";

/// ISO-8601 UTC timestamp with millisecond precision
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_args<T: serde::de::DeserializeOwned>(tool: &str, arguments: Value) -> McpResult<T> {
    serde_json::from_value(arguments).map_err(|e| McpError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

/// Widget descriptor plus its metadata, serialized once.
struct Binding {
    widget: Arc<Widget>,
    meta: Value,
}

impl Binding {
    fn new(widget: Arc<Widget>) -> McpResult<Self> {
        widget.validate()?;
        let meta = serde_json::to_value(widget.tool_meta())?;
        Ok(Self { widget, meta })
    }

    fn schema(&self, description: &str, input_schema: Value) -> ToolSchema {
        ToolSchema {
            name: self.widget.id.clone(),
            title: Some(self.widget.title.clone()),
            description: description.to_string(),
            input_schema,
            meta: Some(self.meta.clone()),
        }
    }
}

/// Echoes the user's name into the homepage widget
pub struct ShowContentTool {
    binding: Binding,
}

impl ShowContentTool {
    pub fn new(widget: Arc<Widget>) -> McpResult<Self> {
        Ok(Self {
            binding: Binding::new(widget)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ShowContentArgs {
    name: String,
}

#[async_trait::async_trait]
impl Tool for ShowContentTool {
    fn schema(&self) -> ToolSchema {
        self.binding.schema(
            "Fetch and display the homepage content with the name of the user",
            json_schema_object(
                json!({
                    "name": json_schema_string("The name of the user to display on the homepage")
                }),
                vec!["name"],
            ),
        )
    }

    async fn execute(&self, arguments: Value) -> McpResult<CallToolResult> {
        let args: ShowContentArgs = parse_args(&self.binding.widget.id, arguments)?;

        Ok(CallToolResult::text(args.name.clone())
            .with_structured_content(json!({
                "name": args.name,
                "timestamp": timestamp(),
            }))
            .with_meta(self.binding.meta.clone()))
    }
}

/// Returns the ABC payload, echoing the optional query
pub struct RetrieveAbcTool {
    binding: Binding,
}

impl RetrieveAbcTool {
    pub fn new(widget: Arc<Widget>) -> McpResult<Self> {
        Ok(Self {
            binding: Binding::new(widget)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RetrieveAbcArgs {
    #[serde(default)]
    query: Option<String>,
}

#[async_trait::async_trait]
impl Tool for RetrieveAbcTool {
    fn schema(&self) -> ToolSchema {
        self.binding.schema(
            "Retrieve and display ABC content with optional query parameter",
            json_schema_object(
                json!({
                    "query": json_schema_string("Optional query parameter for ABC retrieval")
                }),
                vec![],
            ),
        )
    }

    async fn execute(&self, arguments: Value) -> McpResult<CallToolResult> {
        let args: RetrieveAbcArgs = parse_args(&self.binding.widget.id, arguments)?;
        let query = args.query.filter(|q| !q.is_empty());

        let text = match &query {
            Some(q) => format!("ABC data retrieved with query: {}", q),
            None => "ABC data retrieved".to_string(),
        };

        Ok(CallToolResult::text(text)
            .with_structured_content(json!({
                "query": query,
                "data": ABC_DATA,
                "timestamp": timestamp(),
            }))
            .with_meta(self.binding.meta.clone()))
    }
}
