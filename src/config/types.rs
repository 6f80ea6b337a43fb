//! Configuration types for gcloud-mcp
//!
//! This module defines the configuration structure that can be loaded from
//! TOML or JSON files and/or environment variables.

use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server/transport settings
    pub server: ServerConfig,

    /// gcloud binary settings
    pub gcloud: GcloudConfig,

    /// Access control rules
    pub access_control: AccessControlConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// gcloud invocation configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GcloudConfig {
    /// Path or name of the gcloud binary
    pub binary: String,

    /// Timeout for each gcloud invocation in seconds
    pub timeout_secs: u64,
}

impl Default for GcloudConfig {
    fn default() -> Self {
        Self {
            binary: "gcloud".to_string(),
            timeout_secs: 300,
        }
    }
}

/// Server/transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Transport mode
    pub transport: TransportMode,

    /// Server name for MCP
    pub name: String,

    /// Server version for MCP
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: TransportMode::Stdio,
            name: "gcloud-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Transport mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Standard input/output
    #[default]
    Stdio,
}

/// Access control configuration
///
/// At most one of `allow` and `deny` may be set. Each entry is a command
/// prefix such as `"compute instances delete"` or `"alpha"`. A built-in
/// denylist of dangerous commands is always applied in addition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessControlConfig {
    /// Only commands matching one of these prefixes may run
    pub allow: Option<Vec<String>>,

    /// Commands matching one of these prefixes may not run
    pub deny: Option<Vec<String>>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
