//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mcp-calculator")]
#[command(about = "Arithmetic MCP tool server over stdio and HTTP/SSE", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to .mcp-calculator/config.yaml when present)
    #[arg(short, long, global = true, env = "MCP_CALCULATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output errors in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve line-delimited JSON-RPC on stdin/stdout until end of input
    Stdio,

    /// Serve the /tools and /execute endpoints over HTTP with SSE framing
    Http(HttpArgs),

    /// Print the tool definitions advertised to clients
    Tools(ToolsArgs),
}

#[derive(Args, Debug, Default)]
pub struct HttpArgs {
    /// Host to bind to (overrides configuration)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides configuration)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct ToolsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = ToolsFormat::Json)]
    pub format: ToolsFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolsFormat {
    Json,
    Yaml,
    Table,
}
