//! MCP Calculator CLI entry point.

use clap::Parser;
use std::sync::Arc;

use mcp_calculator::cli::{commands, Cli, Commands};
use mcp_calculator::infrastructure::logging::LoggerImpl;
use mcp_calculator::{ConfigLoader, Dispatcher, ToolRegistry};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli.command, cli.config.as_deref()).await {
        mcp_calculator::cli::handle_error(err, cli.json);
    }
}

async fn run(command: Commands, config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = ConfigLoader::load(config_path)?;
    let _logger = LoggerImpl::init(&config.logging)?;

    // Built once and shared by whichever transport runs.
    let dispatcher = Arc::new(Dispatcher::new(ToolRegistry::builtin()));

    match command {
        Commands::Stdio => commands::stdio::execute(dispatcher).await,
        Commands::Http(args) => commands::http::execute(args, config.http, dispatcher).await,
        Commands::Tools(args) => commands::tools::execute(&args, &dispatcher),
    }
}
