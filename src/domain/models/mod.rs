//! Domain models.

pub mod capability;
pub mod config;
pub mod dispatch;
pub mod tool;

pub use capability::{Capabilities, CapabilityDescriptor, InputSchema, ParameterSpec, ToolDefinition};
pub use config::{Config, HttpConfig, LogFormat, LoggingConfig, RotationPolicy};
pub use dispatch::{DispatchResponse, ExecuteParams, ToolValue, SERIALIZATION_FALLBACK};
pub use tool::{ArgumentSet, Tool, REQUIRED_PARAMS};
