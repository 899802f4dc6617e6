//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty formatting on stderr
//! - Optional rolling JSON log files

pub mod logger;

pub use logger::{parse_log_level, LoggerImpl};
