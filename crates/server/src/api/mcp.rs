// HTTP binding for the MCP endpoint: POST carries JSON-RPC messages,
// GET returns the registry manifest.

use super::ErrorResponse;
use crate::config::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

fn not_ready() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse::new("MCP server is still registering widgets")),
    )
        .into_response()
}

/// Handle a JSON-RPC message or batch
pub async fn handle(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let Some(server) = state.mcp() else {
        return not_ready();
    };

    match server.handle_bytes(&body).await {
        Some(response) => Json(response).into_response(),
        // Notifications or client responses: accepted, nothing to return
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Describe the registered tools and resources
pub async fn manifest(State(state): State<Arc<AppState>>) -> Response {
    match state.mcp() {
        Some(server) => Json(server.manifest()).into_response(),
        None => not_ready(),
    }
}
