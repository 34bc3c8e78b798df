//! Host-provided rendering context.
//!
//! A chat host exposes its environment (display mode, height limit) to the
//! embedded widget. The host may be absent entirely, so every field is
//! optional and read through accessors with safe defaults.

use serde::{Deserialize, Serialize};

/// How the host is currently presenting the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Inline,
    Fullscreen,
    Pip,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Fullscreen => "fullscreen",
            Self::Pip => "pip",
        }
    }
}

/// Environment injected by the host. Treated as untrusted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostContext {
    #[serde(default)]
    pub max_height: Option<u32>,
    #[serde(default)]
    pub display_mode: Option<DisplayMode>,
    /// Whether the page runs inside a host that provides the widget API
    #[serde(default)]
    pub is_host_app: Option<bool>,
}

impl HostContext {
    /// Context of a page running inside a host app.
    pub fn hosted(display_mode: DisplayMode) -> Self {
        Self {
            max_height: None,
            display_mode: Some(display_mode),
            is_host_app: Some(true),
        }
    }

    pub fn with_max_height(mut self, max_height: u32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode.unwrap_or_default()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.display_mode() == DisplayMode::Fullscreen
    }

    pub fn is_host_app(&self) -> bool {
        self.is_host_app.unwrap_or(false)
    }
}

/// Callback used to ask the host for a different display mode.
///
/// The request is one-way: the host may or may not honor it.
pub trait DisplayModeRequester {
    fn request_display_mode(&self, mode: DisplayMode);
}

impl<F> DisplayModeRequester for F
where
    F: Fn(DisplayMode),
{
    fn request_display_mode(&self, mode: DisplayMode) {
        self(mode)
    }
}
