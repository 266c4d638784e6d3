//! Tool contract layer: the four note operations as named, self-describing
//! tools that any agent runtime can select and call.

pub mod builtin;
pub mod registry;
pub mod types;

pub use registry::ToolRegistry;
pub use types::{ToolContext, ToolDefinition};
