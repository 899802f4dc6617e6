//! Adapters connecting the dispatcher to the outside world.

pub mod mcp;
