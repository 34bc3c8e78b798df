// MCP server: dispatches JSON-RPC requests into the tool and resource
// registries. Transport-agnostic; the HTTP binding lives in the server crate.

use crate::error::McpError;
use crate::protocol::*;
use crate::resources::ResourceRegistry;
use crate::tools::ToolRegistry;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub struct McpServer {
    info: ServerInfo,
    instructions: Option<String>,
    tools: ToolRegistry,
    resources: ResourceRegistry,
}

impl McpServer {
    pub fn new(info: ServerInfo, tools: ToolRegistry, resources: ResourceRegistry) -> Self {
        Self {
            info,
            instructions: None,
            tools,
            resources,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// Handle a raw JSON-RPC message: a single request or a batch.
    ///
    /// Returns `None` when nothing needs to be sent back (notifications only).
    pub async fn handle_message(&self, message: Value) -> Option<Value> {
        match message {
            Value::Array(items) if items.is_empty() => Some(error_value(
                Value::Null,
                JsonRpcError::invalid_request(),
            )),
            Value::Array(items) => {
                let mut responses = Vec::new();
                for item in items {
                    if let Some(response) = self.handle_value(item).await {
                        responses.push(response);
                    }
                }
                (!responses.is_empty()).then_some(Value::Array(responses))
            }
            single => self.handle_value(single).await,
        }
    }

    /// Handle a message body that may not be valid JSON.
    pub async fn handle_bytes(&self, body: &[u8]) -> Option<Value> {
        match serde_json::from_slice::<Value>(body) {
            Ok(message) => self.handle_message(message).await,
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable MCP message");
                Some(error_value(Value::Null, JsonRpcError::parse_error()))
            }
        }
    }

    async fn handle_value(&self, value: Value) -> Option<Value> {
        // Responses from the client need no reply
        if is_response(&value) {
            tracing::debug!(id = ?value.get("id"), "Received client response");
            return None;
        }

        // A present but null id is not a notification
        if value.get("id") == Some(&Value::Null) {
            return Some(error_value(Value::Null, JsonRpcError::invalid_request()));
        }

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(_) => return Some(error_value(id, JsonRpcError::invalid_request())),
        };

        let response = self.handle(request).await?;
        match serde_json::to_value(&response) {
            Ok(value) => Some(value),
            Err(e) => Some(error_value(id, JsonRpcError::internal_error(e.to_string()))),
        }
    }

    /// Handle one request. Notifications produce no response.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            let id = request.id.unwrap_or(Value::Null);
            return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
        }

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Received notification");
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        let result = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(request.params).await,
            "resources/list" => self.list_resources(),
            "resources/read" => self.read_resource(request.params),
            "resources/templates/list" => to_value(ListResourceTemplatesResult::default()),
            method => Err(JsonRpcError::method_not_found(method)),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => {
                tracing::warn!(
                    method = %request.method,
                    code = error.code,
                    message = %error.message,
                    "MCP request failed"
                );
                JsonRpcResponse::error(id, error)
            }
        })
    }

    /// Summary of the registry, served on `GET /mcp`
    pub fn manifest(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": self.info,
            "tools": self.tools.list_schemas(),
            "resources": self.resources.list(),
        })
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = parse_params(params)?;
        tracing::info!(
            client = %params.client_info.name,
            client_version = %params.client_info.version,
            requested = %params.protocol_version,
            "MCP client initializing"
        );

        let result = InitializeResult {
            protocol_version: negotiate_version(&params.protocol_version).to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
            },
            server_info: self.info.clone(),
        };

        let mut value = to_value(result)?;
        if let Some(instructions) = &self.instructions {
            value["instructions"] = Value::String(instructions.clone());
        }
        Ok(value)
    }

    fn list_tools(&self) -> Result<Value, JsonRpcError> {
        to_value(ListToolsResult {
            tools: self.tools.list_schemas(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = parse_params(params)?;
        let result = self
            .tools
            .call(&params.name, params.arguments)
            .await
            .map_err(|e| e.to_rpc_error())?;
        to_value(result)
    }

    fn list_resources(&self) -> Result<Value, JsonRpcError> {
        to_value(ListResourcesResult {
            resources: self.resources.list(),
        })
    }

    fn read_resource(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: ReadResourceParams = parse_params(params)?;
        let result = self
            .resources
            .read(&params.uri)
            .map_err(|e| e.to_rpc_error())?;
        to_value(result)
    }
}

/// A message with no method carrying a result or error
fn is_response(value: &Value) -> bool {
    value.get("method").is_none() && (value.get("result").is_some() || value.get("error").is_some())
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    let params = params.unwrap_or(Value::Null);
    serde_json::from_value(params)
        .map_err(|e| McpError::InvalidParams(e.to_string()).to_rpc_error())
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| McpError::Serialization(e).to_rpc_error())
}

fn error_value(id: Value, error: JsonRpcError) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "error": error,
    })
}
