//! `http` command: SSE-framed HTTP server.

use anyhow::Result;
use std::sync::Arc;

use crate::adapters::mcp::SseHttpServer;
use crate::cli::types::HttpArgs;
use crate::domain::models::HttpConfig;
use crate::services::Dispatcher;

/// Apply command-line overrides on top of the loaded configuration.
pub fn resolve_config(args: HttpArgs, mut config: HttpConfig) -> HttpConfig {
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    config
}

pub async fn execute(args: HttpArgs, config: HttpConfig, dispatcher: Arc<Dispatcher>) -> Result<()> {
    let config = resolve_config(args, config);
    SseHttpServer::new(dispatcher, config)
        .serve_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutdown requested");
        })
        .await
}
