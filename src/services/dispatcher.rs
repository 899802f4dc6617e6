//! Dispatcher Service
//!
//! Resolves a tool name, runs the tool, and folds every outcome into a
//! [`DispatchResponse`]. Nothing here returns `Err`: transports always have a
//! payload to serialize.

use tracing::debug;

use crate::domain::errors::ToolError;
use crate::domain::models::{ArgumentSet, CapabilityDescriptor, DispatchResponse};
use crate::services::tool_registry::ToolRegistry;

/// Stateless front door shared by the stdio and HTTP transports.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    registry: ToolRegistry,
}

impl Dispatcher {
    pub const fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Execute `name` against `args`.
    pub fn execute(&self, name: &str, args: &ArgumentSet) -> DispatchResponse {
        let outcome = self
            .registry
            .lookup(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
            .and_then(|tool| tool.apply(args));

        match outcome {
            Ok(value) => DispatchResponse::value(value),
            Err(err) => {
                debug!(tool = name, error = %err, "tool invocation failed");
                DispatchResponse::error(err.to_string())
            }
        }
    }

    pub const fn describe(&self) -> &CapabilityDescriptor {
        self.registry.describe()
    }
}
