//! Service layer: tool registry and dispatch.

pub mod dispatcher;
pub mod tool_registry;

pub use dispatcher::Dispatcher;
pub use tool_registry::ToolRegistry;
