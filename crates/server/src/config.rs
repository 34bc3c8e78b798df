use anyhow::{Context, Result};
use appsdk_core::PageRenderer;
use appsdk_mcp::{McpServer, WidgetOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub prerender: PrerenderConfig,

    #[serde(default)]
    pub widgets: WidgetsConfig,
}

/// Settings for fetching widget bodies from this application at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrerenderConfig {
    /// Base URL the application is reachable at; defaults to the bind address
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-fetch timeout; unset means wait indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WidgetsConfig {
    #[serde(default)]
    pub content_domain: Option<String>,

    #[serde(default)]
    pub abc_domain: Option<String>,
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if !config_path.exists() {
            tracing::info!("Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(config_path).context("Failed to read configuration file")?;
        toml::from_str(&content).context("Failed to parse configuration file")
    }

    /// Resolve the self-fetch base URL, falling back to the bind address
    pub fn base_url(&self, host: &str, port: u16) -> String {
        match &self.prerender.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", host, port),
        }
    }

    pub fn prerender_timeout(&self) -> Option<Duration> {
        self.prerender.timeout_secs.map(Duration::from_secs)
    }

    pub fn widget_options(&self) -> WidgetOptions {
        WidgetOptions {
            content_domain: self.widgets.content_domain.clone(),
            abc_domain: self.widgets.abc_domain.clone(),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<PageRenderer>,
    /// Set once the widget registry has been built
    pub mcp: Arc<OnceCell<Arc<McpServer>>>,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let renderer = PageRenderer::new().context("Failed to load page templates")?;
        Ok(Self {
            renderer: Arc::new(renderer),
            mcp: Arc::new(OnceCell::new()),
        })
    }

    /// The registry, if startup has completed
    pub fn mcp(&self) -> Option<Arc<McpServer>> {
        self.mcp.get().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ServerConfig::load(Path::new("/nonexistent/appsdk.toml")).unwrap();
        assert!(config.prerender.base_url.is_none());
        assert_eq!(config.base_url("127.0.0.1", 3000), "http://127.0.0.1:3000");
        assert!(config.prerender_timeout().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[prerender]
base_url = "https://widgets.example.com/"
timeout_secs = 5

[widgets]
abc_domain = "https://abc.example.com"
"#
        )
        .unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.base_url("0.0.0.0", 80), "https://widgets.example.com");
        assert_eq!(config.prerender_timeout(), Some(Duration::from_secs(5)));

        let options = config.widget_options();
        assert_eq!(options.abc_domain.as_deref(), Some("https://abc.example.com"));
        assert!(options.content_domain.is_none());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[prerender\nbase_url = 1").unwrap();
        assert!(ServerConfig::load(file.path()).is_err());
    }
}
