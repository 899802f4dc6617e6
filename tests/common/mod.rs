//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use std::io;
use std::sync::{Arc, Mutex};

use mcp_calculator::{Dispatcher, ToolRegistry};

/// Dispatcher over the built-in tools, shared the way the binary shares it.
pub fn dispatcher() -> Arc<Dispatcher> {
    Arc::new(Dispatcher::new(ToolRegistry::builtin()))
}

/// Build one `execute` request line for the stdio protocol.
#[allow(dead_code)]
pub fn execute_line(id: serde_json::Value, tool: &str, a: f64, b: f64) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "execute",
        "params": { "tool_name": tool, "arguments": { "a": a, "b": b } }
    })
    .to_string()
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// In-memory log sink for asserting on emitted diagnostics.
///
/// Install with `tracing::subscriber::set_default(logs.subscriber())`; each
/// event is captured as one JSON object.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl CapturedLogs {
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let writer = self.clone();
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::INFO)
            .with_writer(move || writer.clone())
            .finish()
    }

    pub fn events(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    /// Events whose level and message both match.
    pub fn count(&self, level: &str, message: &str) -> usize {
        self.events()
            .iter()
            .filter(|event| event["level"] == level && event["fields"]["message"] == message)
            .count()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
