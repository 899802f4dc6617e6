use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Default project-local config file, merged when present.
pub const DEFAULT_CONFIG_PATH: &str = ".mcp-calculator/config.yaml";

/// Prefix for environment overrides, e.g. `MCP_CALCULATOR_HTTP__PORT`.
pub const ENV_PREFIX: &str = "MCP_CALCULATOR_";

/// Configuration error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("HTTP host cannot be empty")]
    EmptyHost,

    #[error("Invalid {name}: must be at least 1 second")]
    ZeroTimeout { name: &'static str },

    #[error(
        "Invalid timeouts: read_timeout_secs ({0}) must not exceed write_timeout_secs ({1})"
    )]
    ReadExceedsWrite(u64, u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `path`, or `.mcp-calculator/config.yaml` when no path is given
    /// 3. Environment variables (`MCP_CALCULATOR_*` prefix, `__` for nesting)
    ///
    /// A missing default file is not an error; an explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let file = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                path
            }
            None => Path::new(DEFAULT_CONFIG_PATH),
        };

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load configuration from {}", file.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let http = &config.http;
        if http.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        for (name, secs) in [
            ("read_timeout_secs", http.read_timeout_secs),
            ("write_timeout_secs", http.write_timeout_secs),
            ("idle_timeout_secs", http.idle_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::ZeroTimeout { name });
            }
        }

        if http.read_timeout_secs > http.write_timeout_secs {
            return Err(ConfigError::ReadExceedsWrite(
                http.read_timeout_secs,
                http.write_timeout_secs,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}
