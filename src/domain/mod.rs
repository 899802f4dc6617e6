//! Domain layer: tools, their arguments, and the shapes returned to callers.

pub mod errors;
pub mod models;

pub use errors::{ToolError, ToolResult};
