//! `tools` command: print the capability descriptor.

use anyhow::{Context, Result};

use crate::cli::output::table::TableFormatter;
use crate::cli::types::{ToolsArgs, ToolsFormat};
use crate::domain::models::CapabilityDescriptor;
use crate::services::Dispatcher;

/// Render the descriptor in the requested format.
pub fn render(descriptor: &CapabilityDescriptor, format: ToolsFormat) -> Result<String> {
    match format {
        ToolsFormat::Json => serde_json::to_string_pretty(descriptor)
            .context("Failed to serialize tool definitions as JSON"),
        ToolsFormat::Yaml => {
            serde_yaml::to_string(descriptor).context("Failed to serialize tool definitions as YAML")
        }
        ToolsFormat::Table => Ok(TableFormatter::new().format_tools(descriptor.tools())),
    }
}

pub fn execute(args: &ToolsArgs, dispatcher: &Dispatcher) -> Result<()> {
    println!("{}", render(dispatcher.describe(), args.format)?);
    Ok(())
}
