//! Tool Registry Service
//!
//! Holds the fixed set of tools and the capability descriptor derived from it.
//! Both are built together from one list, so every registered tool is
//! advertised and nothing is advertised that cannot be executed.

use crate::domain::models::{CapabilityDescriptor, Tool};

/// Read-only registry of executable tools.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
    descriptor: CapabilityDescriptor,
}

impl ToolRegistry {
    /// Registry of the four built-in arithmetic tools.
    pub fn builtin() -> Self {
        Self::with_tools(Tool::ALL.to_vec())
    }

    /// Registry restricted to `tools`, advertised in the given order.
    /// Duplicates keep their first position.
    pub fn with_tools(tools: Vec<Tool>) -> Self {
        let mut unique = Vec::with_capacity(tools.len());
        for tool in tools {
            if !unique.contains(&tool) {
                unique.push(tool);
            }
        }
        let descriptor = CapabilityDescriptor::from_tools(&unique);
        Self {
            tools: unique,
            descriptor,
        }
    }

    /// Resolve a tool by its wire name.
    pub fn lookup(&self, name: &str) -> Option<Tool> {
        Tool::from_name(name).filter(|tool| self.tools.contains(tool))
    }

    /// Discovery payload for every registered tool.
    pub const fn describe(&self) -> &CapabilityDescriptor {
        &self.descriptor
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
