//! Table output formatting for CLI commands
//!
//! Renders tool definitions using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::ToolDefinition;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Format tool definitions as a table
    pub fn format_tools(&self, tools: &[ToolDefinition]) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Tool").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("Parameters").add_attribute(Attribute::Bold),
        ]);

        for tool in tools {
            let params = tool
                .input_schema
                .parameters
                .iter()
                .map(|(name, spec)| {
                    let marker = if tool.input_schema.required.contains(name) {
                        "*"
                    } else {
                        ""
                    };
                    format!("{name}{marker}: {} ({})", spec.param_type, spec.description)
                })
                .collect::<Vec<_>>()
                .join("\n");

            let name_cell = if self.use_colors {
                Cell::new(&tool.name).fg(Color::Cyan)
            } else {
                Cell::new(&tool.name)
            };
            table.add_row(vec![name_cell, Cell::new(&tool.description), Cell::new(params)]);
        }

        table.to_string()
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if terminal supports colors
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}
