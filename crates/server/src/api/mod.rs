use crate::config::{AppState, ServerConfig};
use anyhow::{anyhow, Context, Result};
use appsdk_mcp::HttpHtmlSource;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::future::IntoFuture;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

mod mcp;
mod pages;

/// Start the HTTP server and build the widget registry.
///
/// Pages are served immediately so the registry can fetch them from this
/// same process. A registry build failure stops the server.
pub async fn serve(addr: &str, base_url: &str, config: ServerConfig) -> Result<()> {
    let state = Arc::new(AppState::new()?);

    let app = create_router(state.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    let server = axum::serve(listener, app).into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            result?;
            return Ok(());
        }
        result = initialize_registry(&state, base_url, &config) => result?,
    }

    server.await?;

    Ok(())
}

/// Pre-render the widget pages and publish the registry to `state`.
pub async fn initialize_registry(
    state: &AppState,
    base_url: &str,
    config: &ServerConfig,
) -> Result<()> {
    let source = HttpHtmlSource::new(base_url, config.prerender_timeout())
        .context("Invalid pre-render base URL")?;

    let server = appsdk_mcp::build_server(&source, &config.widget_options())
        .await
        .context("Failed to register widgets")?;

    state
        .mcp
        .set(Arc::new(server))
        .map_err(|_| anyhow!("Widget registry already initialized"))?;

    tracing::info!("MCP endpoint ready at /mcp");
    Ok(())
}

/// Create the router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // API routes
        .route("/api/health", get(health_check))
        .route("/mcp", get(mcp::manifest).post(mcp::handle))
        // Widget pages
        .route("/", get(pages::home))
        .route("/abc", get(pages::abc))
        // Middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "appsdk",
        "version": env!("CARGO_PKG_VERSION"),
        "ready": state.mcp().is_some(),
    }))
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Custom error type for API handlers
pub struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_msg = self.0.to_string();
        let details = self.0.chain().skip(1).map(|e| e.to_string()).collect::<Vec<_>>().join(": ");

        tracing::error!(error = %error_msg, details = %details, "Request failed");

        let response = if details.is_empty() {
            ErrorResponse::new(error_msg)
        } else {
            ErrorResponse::with_details(error_msg, details)
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_readiness() {
        let response = create_router(pending_state())
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["ready"], false);

        let response = create_router(ready_state().await)
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["ready"], true);
        assert_eq!(body["service"], "appsdk");
    }

    #[tokio::test]
    async fn test_self_fetch_registers_live_pages() {
        let state = pending_state();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = create_router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base_url = format!("http://{}", addr);
        initialize_registry(&state, &base_url, &ServerConfig::default())
            .await
            .unwrap();

        let mcp = state.mcp().unwrap();
        let read = mcp.resources().read("ui://widget/abc-template.html").unwrap();
        let text = &read.contents[0].text;
        assert!(text.starts_with("<html><!DOCTYPE html>"));
        assert!(text.contains("ABC Data Retrieval"));
        assert!(text.ends_with("</html>"));

        // registry is published exactly once
        let err = initialize_registry(&state, &base_url, &ServerConfig::default()).await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_failed_self_fetch_is_fatal() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let state = pending_state();
        let result =
            initialize_registry(&state, &format!("http://{}", addr), &ServerConfig::default())
                .await;

        assert!(result.is_err());
        assert!(state.mcp().is_none());
    }
}
