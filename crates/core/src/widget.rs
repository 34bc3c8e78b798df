//! Widget descriptors and the fixed metadata that binds a tool to its
//! HTML resource template.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// MIME type signalling an embeddable widget body rather than generic HTML.
pub const SKYBRIDGE_MIME_TYPE: &str = "text/html+skybridge";

/// URI scheme used for widget resource templates.
pub const UI_SCHEME: &str = "ui://";

/// Static description of a widget, known before its HTML body is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetTemplate {
    /// Tool identifier
    pub id: &'static str,
    /// Resource registration name
    pub resource_name: &'static str,
    pub title: &'static str,
    pub template_uri: &'static str,
    pub invoking: &'static str,
    pub invoked: &'static str,
    pub description: &'static str,
    pub widget_domain: &'static str,
    /// Page path on the hosting application whose HTML becomes the widget body
    pub page_path: &'static str,
}

/// Homepage widget, bound to the `show_content` tool.
pub const CONTENT_WIDGET: WidgetTemplate = WidgetTemplate {
    id: "show_content",
    resource_name: "content-widget",
    title: "Show Content",
    template_uri: "ui://widget/content-template.html",
    invoking: "Loading content...",
    invoked: "Content loaded",
    description: "Displays the homepage content",
    widget_domain: "https://nextjs.org/docs",
    page_path: "/",
};

/// ABC widget, bound to the `retrieve_abc` tool.
pub const ABC_WIDGET: WidgetTemplate = WidgetTemplate {
    id: "retrieve_abc",
    resource_name: "abc-widget",
    title: "Retrieve ABC",
    template_uri: "ui://widget/abc-template.html",
    invoking: "Retrieving ABC data...",
    invoked: "ABC data retrieved",
    description: "Retrieves and displays ABC content",
    widget_domain: "https://example.com/abc",
    page_path: "/abc",
};

/// A widget with its pre-rendered HTML body.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: String,
    pub resource_name: String,
    pub title: String,
    pub template_uri: String,
    pub invoking: String,
    pub invoked: String,
    pub html: String,
    pub description: String,
    pub widget_domain: String,
}

impl Widget {
    /// Build a widget from its template and the fetched HTML body.
    pub fn from_template(template: &WidgetTemplate, html: impl Into<String>) -> Self {
        Self {
            id: template.id.to_string(),
            resource_name: template.resource_name.to_string(),
            title: template.title.to_string(),
            template_uri: template.template_uri.to_string(),
            invoking: template.invoking.to_string(),
            invoked: template.invoked.to_string(),
            html: html.into(),
            description: template.description.to_string(),
            widget_domain: template.widget_domain.to_string(),
        }
    }

    /// Override the origin domain advertised for this widget.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.widget_domain = domain.into();
        self
    }

    /// Check that the descriptor can be served as a resource.
    pub fn validate(&self) -> CoreResult<()> {
        if self.id.is_empty() {
            return Err(CoreError::InvalidWidget("widget id is empty".to_string()));
        }
        match self.template_uri.strip_prefix(UI_SCHEME) {
            Some(rest) if !rest.is_empty() => Ok(()),
            _ => Err(CoreError::InvalidWidget(format!(
                "template URI for {} must use the {} scheme: {}",
                self.id, UI_SCHEME, self.template_uri
            ))),
        }
    }

    /// Tool metadata linking invocations of this widget's tool to its template.
    pub fn tool_meta(&self) -> WidgetMeta {
        WidgetMeta {
            output_template: self.template_uri.clone(),
            invoking: self.invoking.clone(),
            invoked: self.invoked.clone(),
            widget_accessible: false,
            result_can_produce_widget: true,
        }
    }

    /// Metadata advertised in `resources/list`.
    pub fn listing_meta(&self) -> WidgetResourceMeta {
        WidgetResourceMeta {
            widget_description: self.description.clone(),
            widget_prefers_border: true,
            widget_domain: None,
        }
    }

    /// Metadata attached to the resource body in `resources/read`.
    pub fn content_meta(&self) -> WidgetResourceMeta {
        WidgetResourceMeta {
            widget_domain: Some(self.widget_domain.clone()),
            ..self.listing_meta()
        }
    }

    /// The resource body: the fetched page wrapped in an `<html>` element.
    pub fn document(&self) -> String {
        format!("<html>{}</html>", self.html)
    }
}

/// Fixed `_meta` annotations attached to a widget tool and its results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetMeta {
    #[serde(rename = "openai/outputTemplate")]
    pub output_template: String,
    #[serde(rename = "openai/toolInvocation/invoking")]
    pub invoking: String,
    #[serde(rename = "openai/toolInvocation/invoked")]
    pub invoked: String,
    #[serde(rename = "openai/widgetAccessible")]
    pub widget_accessible: bool,
    #[serde(rename = "openai/resultCanProduceWidget")]
    pub result_can_produce_widget: bool,
}

/// `_meta` annotations on a widget resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetResourceMeta {
    #[serde(rename = "openai/widgetDescription")]
    pub widget_description: String,
    #[serde(rename = "openai/widgetPrefersBorder")]
    pub widget_prefers_border: bool,
    #[serde(rename = "openai/widgetDomain", skip_serializing_if = "Option::is_none")]
    pub widget_domain: Option<String>,
}
