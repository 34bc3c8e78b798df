//! Error types for appsdk-mcp

use crate::protocol::{JsonRpcError, INTERNAL_ERROR, RESOURCE_NOT_FOUND};
use thiserror::Error;

/// Result type alias for MCP operations
pub type McpResult<T> = std::result::Result<T, McpError>;

/// Error type for registry construction and protocol handling
#[derive(Error, Debug)]
pub enum McpError {
    /// Tool arguments failed schema validation
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    /// Request params could not be decoded
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Tool not found
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// A tool with this name is already registered
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// A resource with this URI is already registered
    #[error("Resource already registered: {0}")]
    DuplicateResource(String),

    /// Fetching a page to pre-render a widget failed
    #[error("Failed to pre-render {url}: {source}")]
    Prerender {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The hosting application answered a pre-render fetch with an error status
    #[error("Failed to pre-render {url}: HTTP {status}")]
    PrerenderStatus { url: String, status: u16 },

    /// Base URL for pre-rendering is malformed
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Widget descriptor error
    #[error(transparent)]
    Widget(#[from] appsdk_core::CoreError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl McpError {
    /// Map onto the JSON-RPC error object returned to the caller
    pub fn to_rpc_error(&self) -> JsonRpcError {
        match self {
            Self::InvalidArguments { .. } | Self::InvalidParams(_) | Self::ToolNotFound(_) => {
                JsonRpcError::invalid_params(self.to_string())
            }
            Self::ResourceNotFound(uri) => JsonRpcError::custom(RESOURCE_NOT_FOUND, self.to_string())
                .with_data(serde_json::json!({ "uri": uri })),
            _ => JsonRpcError::custom(INTERNAL_ERROR, self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::INVALID_PARAMS;

    #[test]
    fn test_rpc_error_codes() {
        let err = McpError::InvalidArguments {
            tool: "show_content".to_string(),
            message: "missing required field 'name'".to_string(),
        };
        assert_eq!(err.to_rpc_error().code, INVALID_PARAMS);
        assert_eq!(McpError::ToolNotFound("x".into()).to_rpc_error().code, INVALID_PARAMS);

        let not_found = McpError::ResourceNotFound("ui://widget/missing.html".into()).to_rpc_error();
        assert_eq!(not_found.code, RESOURCE_NOT_FOUND);
        assert_eq!(not_found.data.unwrap()["uri"], "ui://widget/missing.html");

        let internal = McpError::DuplicateTool("t".into()).to_rpc_error();
        assert_eq!(internal.code, INTERNAL_ERROR);
    }
}
