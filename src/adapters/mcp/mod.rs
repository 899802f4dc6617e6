//! MCP transport adapters.
//!
//! Both transports share one [`Dispatcher`](crate::services::Dispatcher):
//! a line-delimited JSON-RPC server on stdin/stdout and an HTTP server that
//! frames each answer as a single server-sent event.

pub mod idle_timeout;
pub mod sse_http;
pub mod stdio_server;

pub use sse_http::{SseHttpServer, SseState};
pub use stdio_server::StdioServer;
