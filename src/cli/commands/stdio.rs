//! `stdio` command: line-delimited JSON-RPC on stdin/stdout.

use anyhow::Result;
use std::sync::Arc;

use crate::adapters::mcp::StdioServer;
use crate::services::Dispatcher;

pub async fn execute(dispatcher: Arc<Dispatcher>) -> Result<()> {
    StdioServer::new(dispatcher).run().await
}
