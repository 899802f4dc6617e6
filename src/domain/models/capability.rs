//! Capability descriptor advertised to clients for tool discovery.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::tool::{Tool, REQUIRED_PARAMS};

/// Declared type and help text for a single tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub param_type: String,
    pub description: String,
}

/// Input schema of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub parameters: BTreeMap<String, ParameterSpec>,
    pub required: Vec<String>,
}

/// One discoverable tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

impl From<Tool> for ToolDefinition {
    fn from(tool: Tool) -> Self {
        let parameters = REQUIRED_PARAMS
            .iter()
            .zip(["First Number", "Second Number"])
            .map(|(name, description)| {
                (
                    (*name).to_string(),
                    ParameterSpec {
                        param_type: "number".to_string(),
                        description: description.to_string(),
                    },
                )
            })
            .collect();

        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            input_schema: InputSchema {
                schema_type: "OBJECT".to_string(),
                parameters,
                required: REQUIRED_PARAMS.iter().map(ToString::to_string).collect(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub tools: Vec<ToolDefinition>,
}

/// Discovery payload: `{"capabilites": {"tools": [...]}}`.
///
/// The key keeps the spelling existing clients already parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    #[serde(rename = "capabilites")]
    pub capabilities: Capabilities,
}

impl CapabilityDescriptor {
    /// Describe `tools`, preserving their order.
    pub fn from_tools(tools: &[Tool]) -> Self {
        Self {
            capabilities: Capabilities {
                tools: tools.iter().copied().map(ToolDefinition::from).collect(),
            },
        }
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.capabilities.tools
    }
}
