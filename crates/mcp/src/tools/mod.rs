mod registry;
mod validate;
pub mod widget;

pub use registry::{json_schema_object, json_schema_string, Tool, ToolRegistry};
pub use validate::validate_arguments;
pub use widget::{RetrieveAbcTool, ShowContentTool, ABC_DATA};
