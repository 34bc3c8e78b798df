// Widget pre-rendering: fetch page HTML from the hosting application
// before the registry is built

use crate::error::{McpError, McpResult};
use appsdk_core::{Widget, WidgetTemplate};
use std::time::Duration;
use url::Url;

/// Source of page HTML for widget bodies
#[async_trait::async_trait]
pub trait HtmlSource: Send + Sync {
    /// Fetch the HTML served at `path`
    async fn fetch_html(&self, path: &str) -> McpResult<String>;
}

/// Fetches pages over HTTP from the application's own base URL
pub struct HttpHtmlSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpHtmlSource {
    /// Create a source for `base_url`. Without a timeout a hung fetch blocks
    /// startup indefinitely.
    ///
    /// Page paths are resolved below the base path, so a base of
    /// `https://host/app` fetches `/abc` from `https://host/app/abc`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> McpResult<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("appsdk-mcp/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| McpError::Prerender {
            url: base_url.to_string(),
            source,
        })?;

        Ok(Self { client, base_url })
    }
}

#[async_trait::async_trait]
impl HtmlSource for HttpHtmlSource {
    async fn fetch_html(&self, path: &str) -> McpResult<String> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        tracing::debug!(url = %url, "Fetching widget HTML");

        let prerender_error = |source| McpError::Prerender {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(prerender_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(McpError::PrerenderStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(prerender_error)
    }
}

/// Fetch a template's page and build the widget around it.
pub async fn prerender_widget(
    source: &dyn HtmlSource,
    template: &WidgetTemplate,
) -> McpResult<Widget> {
    let html = source.fetch_html(template.page_path).await?;
    tracing::info!(
        widget = template.id,
        path = template.page_path,
        bytes = html.len(),
        "Pre-rendered widget"
    );
    Ok(Widget::from_template(template, html))
}
