//! MCP Calculator - arithmetic tools over stdio and HTTP/SSE
//!
//! A small, fixed set of arithmetic tools (`add`, `sub`, `mul`, `div`)
//! exposed to clients over two transports:
//!
//! - a line-delimited JSON-RPC protocol on stdin/stdout
//! - an HTTP server whose responses are single server-sent events
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): tools, arguments, and response shapes
//! - **Service Layer** (`services`): tool registry and dispatcher
//! - **Adapters** (`adapters`): stdio and HTTP/SSE transports
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use mcp_calculator::{ArgumentSet, DispatchResponse, Dispatcher};
//!
//! let dispatcher = Dispatcher::default();
//! let args = ArgumentSet::new().with("a", 2.0).with("b", 3.0);
//! assert_eq!(dispatcher.execute("add", &args), DispatchResponse::value(5.0));
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::mcp::{SseHttpServer, StdioServer};
pub use domain::models::{
    ArgumentSet, CapabilityDescriptor, Config, DispatchResponse, ExecuteParams, HttpConfig,
    LoggingConfig, Tool, ToolDefinition,
};
pub use domain::{ToolError, ToolResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{Dispatcher, ToolRegistry};
