//! View models derived from tool output and host context.

use super::output::ToolOutput;
use crate::context::{DisplayMode, DisplayModeRequester, HostContext};
use serde::Serialize;

/// Value shown on the ABC page when no data was injected.
pub const ABC_FALLBACK: &str = "abc";

/// Page elements that depend only on the host context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageChrome {
    /// Advisory shown when the page is opened outside a host app
    pub show_banner: bool,
    pub show_fullscreen_control: bool,
    pub display_mode: DisplayMode,
    pub max_height: Option<u32>,
}

impl PageChrome {
    pub fn derive(ctx: Option<&HostContext>) -> Self {
        let ctx = ctx.cloned().unwrap_or_default();
        Self {
            show_banner: !ctx.is_host_app(),
            show_fullscreen_control: !ctx.is_fullscreen(),
            display_mode: ctx.display_mode(),
            max_height: ctx.max_height,
        }
    }

    /// Inline style for the page container.
    pub fn container_style(&self) -> Option<String> {
        let max_height = self.max_height?;
        if self.display_mode == DisplayMode::Fullscreen {
            Some(format!("max-height: {max_height}px; height: {max_height}px"))
        } else {
            Some(format!("max-height: {max_height}px"))
        }
    }

    /// Activate the fullscreen control.
    ///
    /// Returns false without calling the host when the control is not shown.
    pub fn request_fullscreen(&self, requester: &dyn DisplayModeRequester) -> bool {
        if !self.show_fullscreen_control {
            return false;
        }
        requester.request_display_mode(DisplayMode::Fullscreen);
        true
    }
}

/// View of the `/abc` page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbcView {
    pub data: String,
    pub query: Option<String>,
    pub chrome: PageChrome,
}

impl AbcView {
    pub fn derive(output: Option<&ToolOutput>, ctx: Option<&HostContext>) -> Self {
        let data = output
            .and_then(|o| o.field("data"))
            .unwrap_or(ABC_FALLBACK)
            .to_string();
        let query = output.and_then(|o| o.field("query")).map(str::to_string);

        Self {
            data,
            query,
            chrome: PageChrome::derive(ctx),
        }
    }
}

/// View of the `/` page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeView {
    pub name: Option<String>,
    pub chrome: PageChrome,
}

impl HomeView {
    pub fn derive(output: Option<&ToolOutput>, ctx: Option<&HostContext>) -> Self {
        Self {
            name: output.and_then(|o| o.field("name")).map(str::to_string),
            chrome: PageChrome::derive(ctx),
        }
    }
}
