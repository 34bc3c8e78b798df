// Widget page routes. These are also the pages fetched at startup to
// become the widget resource bodies.

use super::ApiResult;
use crate::config::AppState;
use appsdk_core::ToolOutput;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Optional preview values, injected as top-level tool output fields
#[derive(Debug, Default, Deserialize)]
pub struct PreviewParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

impl PreviewParams {
    fn into_output(self) -> Option<ToolOutput> {
        let mut fields = Map::new();
        if let Some(name) = self.name {
            fields.insert("name".to_string(), Value::String(name));
        }
        if let Some(query) = self.query {
            fields.insert("query".to_string(), Value::String(query));
        }
        (!fields.is_empty()).then(|| ToolOutput::new(fields))
    }
}

pub async fn home(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PreviewParams>,
) -> ApiResult<Html<String>> {
    let output = params.into_output();
    let html = state.renderer.home_page(output.as_ref(), None)?;
    Ok(Html(html))
}

pub async fn abc(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PreviewParams>,
) -> ApiResult<Html<String>> {
    let output = params.into_output();
    let html = state.renderer.abc_page(output.as_ref(), None)?;
    Ok(Html(html))
}
