// Widget resource registry
//
// Stores widget HTML resources keyed by their `ui://` template URI and
// answers `resources/list` and `resources/read`.

use crate::error::{McpError, McpResult};
use crate::protocol::{ReadResourceResult, ResourceContents, ResourceDescriptor};
use appsdk_core::{Widget, SKYBRIDGE_MIME_TYPE};
use std::collections::HashMap;
use std::sync::Arc;

/// A registered widget resource with its listing and content metadata
/// serialized once at registration.
struct WidgetResource {
    widget: Arc<Widget>,
    listing_meta: serde_json::Value,
    content_meta: serde_json::Value,
}

/// Registry of widget resources, listed in registration order.
#[derive(Default)]
pub struct ResourceRegistry {
    resources: Vec<WidgetResource>,
    index: HashMap<String, usize>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget under its template URI. URIs must be unique.
    pub fn register(&mut self, widget: Arc<Widget>) -> McpResult<()> {
        widget.validate()?;
        if self.index.contains_key(&widget.template_uri) {
            return Err(McpError::DuplicateResource(widget.template_uri.clone()));
        }

        let resource = WidgetResource {
            listing_meta: serde_json::to_value(widget.listing_meta())?,
            content_meta: serde_json::to_value(widget.content_meta())?,
            widget,
        };

        tracing::info!(
            name = %resource.widget.resource_name,
            uri = %resource.widget.template_uri,
            "Registered widget resource"
        );
        self.index
            .insert(resource.widget.template_uri.clone(), self.resources.len());
        self.resources.push(resource);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn list(&self) -> Vec<ResourceDescriptor> {
        self.resources
            .iter()
            .map(|r| ResourceDescriptor {
                uri: r.widget.template_uri.clone(),
                name: r.widget.resource_name.clone(),
                title: Some(r.widget.title.clone()),
                description: Some(r.widget.description.clone()),
                mime_type: Some(SKYBRIDGE_MIME_TYPE.to_string()),
                meta: Some(r.listing_meta.clone()),
            })
            .collect()
    }

    /// Resolve a URI to its widget body wrapped in `<html>`.
    pub fn read(&self, uri: &str) -> McpResult<ReadResourceResult> {
        let resource = self
            .index
            .get(uri)
            .map(|&i| &self.resources[i])
            .ok_or_else(|| McpError::ResourceNotFound(uri.to_string()))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents {
                uri: uri.to_string(),
                mime_type: Some(SKYBRIDGE_MIME_TYPE.to_string()),
                text: resource.widget.document(),
                meta: Some(resource.content_meta.clone()),
            }],
        })
    }
}
