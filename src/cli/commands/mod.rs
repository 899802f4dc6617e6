//! Command handlers
//!
//! Thin adapters wiring configuration into the transports.

pub mod http;
pub mod stdio;
pub mod tools;
