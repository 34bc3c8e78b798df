// Core types for the Apps SDK widget server: widget descriptors,
// tool metadata, host context and page rendering

pub mod context;
pub mod error;
pub mod render;
pub mod widget;

pub use context::{DisplayMode, DisplayModeRequester, HostContext};
pub use error::{CoreError, CoreResult};
pub use render::{AbcView, HomeView, PageChrome, PageRenderer, ToolOutput};
pub use widget::{Widget, WidgetMeta, WidgetTemplate, ABC_WIDGET, CONTENT_WIDGET, SKYBRIDGE_MIME_TYPE};
