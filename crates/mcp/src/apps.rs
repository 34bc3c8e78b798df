// Registration of the two widget tools and their HTML resources.

use crate::error::McpResult;
use crate::prerender::{prerender_widget, HtmlSource};
use crate::protocol::ServerInfo;
use crate::resources::ResourceRegistry;
use crate::server::McpServer;
use crate::tools::{RetrieveAbcTool, ShowContentTool, ToolRegistry};
use appsdk_core::{Widget, ABC_WIDGET, CONTENT_WIDGET};
use std::sync::Arc;

pub const SERVER_NAME: &str = "appsdk";

const INSTRUCTIONS: &str = "Call show_content to greet a user by name on the homepage widget. \
Call retrieve_abc to fetch ABC data, optionally filtered by a query.";

/// Overrides applied to the built-in widget descriptors
#[derive(Debug, Clone, Default)]
pub struct WidgetOptions {
    pub content_domain: Option<String>,
    pub abc_domain: Option<String>,
}

fn with_domain(widget: Widget, domain: Option<&str>) -> Widget {
    match domain {
        Some(domain) => widget.with_domain(domain),
        None => widget,
    }
}

/// Pre-render both widget pages and build the server.
///
/// Pages are fetched sequentially; any fetch failure aborts registration,
/// since a resource cannot be served without its HTML body.
pub async fn build_server(source: &dyn HtmlSource, options: &WidgetOptions) -> McpResult<McpServer> {
    let content = prerender_widget(source, &CONTENT_WIDGET).await?;
    let abc = prerender_widget(source, &ABC_WIDGET).await?;

    let content = Arc::new(with_domain(content, options.content_domain.as_deref()));
    let abc = Arc::new(with_domain(abc, options.abc_domain.as_deref()));

    let mut resources = ResourceRegistry::new();
    resources.register(content.clone())?;
    resources.register(abc.clone())?;

    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(ShowContentTool::new(content)?))?;
    tools.register(Arc::new(RetrieveAbcTool::new(abc)?))?;

    tracing::info!(
        tools = tools.len(),
        resources = resources.len(),
        "Widget registry ready"
    );

    let info = ServerInfo {
        name: SERVER_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Ok(McpServer::new(info, tools, resources).with_instructions(INSTRUCTIONS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::McpError;
    use crate::protocol::*;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Serves canned page bodies and records fetch order
    struct StaticPages {
        fetched: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl StaticPages {
        fn new() -> Self {
            Self {
                fetched: Mutex::new(Vec::new()),
                fail_on: None,
            }
        }
    }

    #[async_trait::async_trait]
    impl HtmlSource for StaticPages {
        async fn fetch_html(&self, path: &str) -> McpResult<String> {
            self.fetched.lock().unwrap().push(path.to_string());
            if self.fail_on == Some(path) {
                return Err(McpError::PrerenderStatus {
                    url: format!("http://localhost{}", path),
                    status: 502,
                });
            }
            Ok(format!("<body>page {}</body>", path))
        }
    }

    async fn server() -> McpServer {
        build_server(&StaticPages::new(), &WidgetOptions::default())
            .await
            .unwrap()
    }

    async fn call(server: &McpServer, id: i64, method: &str, params: Value) -> Value {
        let message = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        server.handle_message(message).await.unwrap()
    }

    #[tokio::test]
    async fn test_pages_fetched_sequentially() {
        let pages = StaticPages::new();
        build_server(&pages, &WidgetOptions::default()).await.unwrap();
        assert_eq!(*pages.fetched.lock().unwrap(), vec!["/", "/abc"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_registration() {
        let pages = StaticPages {
            fail_on: Some("/"),
            ..StaticPages::new()
        };
        let err = build_server(&pages, &WidgetOptions::default()).await.err().unwrap();
        assert!(matches!(err, McpError::PrerenderStatus { status: 502, .. }));
        // nothing after the failed fetch is attempted
        assert_eq!(*pages.fetched.lock().unwrap(), vec!["/"]);
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = server().await;
        let response = call(
            &server,
            1,
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "test", "version": "0.0.1" }
            }),
        )
        .await;

        let result = &response["result"];
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(result["capabilities"]["resources"]["subscribe"], false);
        assert!(result["instructions"].as_str().unwrap().contains("retrieve_abc"));
    }

    #[tokio::test]
    async fn test_list_tools_carries_meta() {
        let server = server().await;
        let response = call(&server, 2, "tools/list", json!({})).await;
        let tools = response["result"]["tools"].as_array().unwrap();

        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "show_content");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["name"]));
        assert_eq!(
            tools[0]["_meta"]["openai/outputTemplate"],
            "ui://widget/content-template.html"
        );
        assert_eq!(tools[1]["name"], "retrieve_abc");
        assert_eq!(tools[1]["inputSchema"]["required"], json!([]));
    }

    #[tokio::test]
    async fn test_call_tool_binds_to_resource() {
        let server = server().await;
        let response = call(
            &server,
            3,
            "tools/call",
            json!({ "name": "retrieve_abc", "arguments": { "query": "foo" } }),
        )
        .await;

        let result = &response["result"];
        assert_eq!(result["structuredContent"]["data"], "abc");
        assert_eq!(result["structuredContent"]["query"], "foo");
        assert_eq!(result["content"][0]["text"], "ABC data retrieved with query: foo");

        let template = result["_meta"]["openai/outputTemplate"].as_str().unwrap();
        let read = call(&server, 4, "resources/read", json!({ "uri": template })).await;
        let contents = &read["result"]["contents"][0];
        assert_eq!(contents["mimeType"], "text/html+skybridge");
        assert_eq!(contents["text"], "<html><body>page /abc</body></html>");
    }

    #[tokio::test]
    async fn test_missing_argument_is_invalid_params() {
        let server = server().await;
        let response = call(
            &server,
            5,
            "tools/call",
            json!({ "name": "show_content", "arguments": {} }),
        )
        .await;

        assert!(response.get("result").is_none());
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
        assert_eq!(response["id"], 5);
    }

    #[tokio::test]
    async fn test_unknown_method_and_resource() {
        let server = server().await;

        let response = call(&server, 6, "prompts/list", json!({})).await;
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);

        let response = call(&server, 7, "resources/read", json!({ "uri": "ui://widget/x.html" })).await;
        assert_eq!(response["error"]["code"], RESOURCE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_notifications_and_batches() {
        let server = server().await;

        let note = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
        assert!(server.handle_message(note.clone()).await.is_none());

        let batch = json!([
            note,
            { "jsonrpc": "2.0", "id": "a", "method": "ping" },
            { "jsonrpc": "2.0", "id": "b", "method": "resources/templates/list" }
        ]);
        let responses = server.handle_message(batch).await.unwrap();
        let responses = responses.as_array().unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], "a");
        assert_eq!(responses[1]["result"]["resourceTemplates"], json!([]));
    }

    #[tokio::test]
    async fn test_null_id_is_not_a_notification() {
        let server = server().await;
        let response = server
            .handle_message(json!({ "jsonrpc": "2.0", "id": null, "method": "ping" }))
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], INVALID_REQUEST);
        assert_eq!(response["id"], Value::Null);
    }

    #[tokio::test]
    async fn test_client_responses_get_no_reply() {
        let server = server().await;

        let reply = json!({ "jsonrpc": "2.0", "id": 9, "result": {} });
        assert!(server.handle_message(reply.clone()).await.is_none());

        let failed = json!({ "jsonrpc": "2.0", "id": 10, "error": { "code": -1, "message": "no" } });
        assert!(server.handle_message(failed).await.is_none());

        let batch = json!([reply, { "jsonrpc": "2.0", "id": 11, "method": "ping" }]);
        let responses = server.handle_message(batch).await.unwrap();
        assert_eq!(responses.as_array().unwrap().len(), 1);
        assert_eq!(responses[0]["id"], 11);
    }

    #[tokio::test]
    async fn test_malformed_messages() {
        let server = server().await;

        let response = server.handle_bytes(b"{not json").await.unwrap();
        assert_eq!(response["error"]["code"], PARSE_ERROR);

        let response = server
            .handle_message(json!({ "jsonrpc": "1.0", "id": 1, "method": "ping" }))
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], INVALID_REQUEST);

        let response = server.handle_message(json!({ "id": 2 })).await.unwrap();
        assert_eq!(response["error"]["code"], INVALID_REQUEST);
        assert_eq!(response["id"], 2);

        let response = server.handle_message(json!([])).await.unwrap();
        assert_eq!(response["error"]["code"], INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_domain_override() {
        let options = WidgetOptions {
            abc_domain: Some("https://abc.example.org".to_string()),
            ..Default::default()
        };
        let server = build_server(&StaticPages::new(), &options).await.unwrap();
        let read = server.resources().read(ABC_WIDGET.template_uri).unwrap();
        assert_eq!(
            read.contents[0].meta.as_ref().unwrap()["openai/widgetDomain"],
            "https://abc.example.org"
        );
    }

    #[tokio::test]
    async fn test_manifest() {
        let manifest = server().await.manifest();
        assert_eq!(manifest["tools"].as_array().unwrap().len(), 2);
        assert_eq!(manifest["resources"].as_array().unwrap().len(), 2);
        assert_eq!(manifest["protocolVersion"], PROTOCOL_VERSION);
    }
}
