// MCP (Model Context Protocol) server for Apps SDK widgets.
// Exposes widget tools and their HTML resources to chat clients.

pub mod apps;
pub mod error;
pub mod prerender;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use apps::{build_server, WidgetOptions};
pub use error::{McpError, McpResult};
pub use prerender::{HtmlSource, HttpHtmlSource};
pub use server::McpServer;
