//! Domain errors for tool execution.

use thiserror::Error;

/// Render the arguments a caller did supply, for missing-argument diagnostics.
fn format_provided(provided: &[(String, f64)]) -> String {
    if provided.is_empty() {
        return "none".to_string();
    }
    provided
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failures a tool invocation can produce.
///
/// The `Display` text of each variant is exactly the message carried in the
/// `{"error": ...}` payload returned to callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("No such tool. Please recheck.")]
    UnknownTool(String),

    #[error(
        "Missing required argument(s): {}. Provided: {}",
        .missing.join(", "),
        format_provided(.provided)
    )]
    MissingArguments {
        missing: Vec<String>,
        provided: Vec<(String, f64)>,
    },

    #[error("Divisior cannot be zero")]
    DivisionByZero,
}

pub type ToolResult<T> = Result<T, ToolError>;
