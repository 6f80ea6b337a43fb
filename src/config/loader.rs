//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (GCLOUD_MCP__*)
//! 2. Configuration file (TOML, or JSON by `.json` extension)
//! 3. Default values
//!
//! JSON files may also carry `allow` or `deny` at the top level instead of
//! under `access_control`.

use crate::access_control::Pattern;
use crate::config::types::AppConfig;
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "gcloud-mcp.toml",
    ".gcloud-mcp.toml",
    "~/.config/gcloud-mcp/config.toml",
    "/etc/gcloud-mcp/config.toml",
];

/// Shape accepted from a file: the full config plus top-level rule lists
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    #[serde(flatten)]
    app: AppConfig,
    allow: Option<Vec<String>>,
    deny: Option<Vec<String>>,
}

impl RawConfig {
    fn into_app_config(self) -> AppConfig {
        let mut app = self.app;
        if app.access_control.allow.is_none() {
            app.access_control.allow = self.allow;
        }
        if app.access_control.deny.is_none() {
            app.access_control.deny = self.deny;
        }
        app
    }
}

/// Pick the file format from the path's extension
fn format_for_path(path: &str) -> FileFormat {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
        _ => FileFormat::Toml,
    }
}

/// Load configuration from a string (useful for testing)
pub fn load_config_from_str(text: &str, format: FileFormat) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(text, format))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let raw: RawConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config = raw.into_app_config();
    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Start with defaults (handled by serde defaults on AppConfig)

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, format_for_path(path)));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with GCLOUD_MCP__ prefix
    // e.g., GCLOUD_MCP__GCLOUD__BINARY, GCLOUD_MCP__ACCESS_CONTROL__DENY="compute ssh,alpha"
    // Double underscore (__) maps to nested keys (gcloud.binary)
    builder = builder.add_source(
        Environment::with_prefix("GCLOUD_MCP")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("access_control.allow")
            .with_list_parse_key("access_control.deny"),
    );

    // Build and deserialize
    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let raw: RawConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config = raw.into_app_config();

    // Validate the configuration
    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.gcloud.binary.trim().is_empty() {
        return Err(ConfigError::Invalid {
            message: "gcloud.binary must not be empty".to_string(),
        });
    }

    if config.gcloud.timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            message: "gcloud.timeout_secs must be greater than 0".to_string(),
        });
    }

    let access = &config.access_control;
    if access.allow.is_some() && access.deny.is_some() {
        return Err(ConfigError::Conflict);
    }

    if let Some(allow) = &access.allow {
        validate_patterns(allow, "access_control.allow")?;
    }
    if let Some(deny) = &access.deny {
        validate_patterns(deny, "access_control.deny")?;
    }

    Ok(())
}

/// Validate that all patterns contain at least one token
fn validate_patterns(patterns: &[String], field_path: &str) -> Result<(), ConfigError> {
    for pattern in patterns {
        if let Err(ConfigError::InvalidPattern { pattern, reason }) = Pattern::new(pattern) {
            return Err(ConfigError::InvalidPattern {
                pattern,
                reason: format!("in {}: {}", field_path, reason),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_from_str_basic() {
        let toml = r#"
[server]
name = "test-server"

[gcloud]
binary = "/usr/bin/gcloud"
timeout_secs = 60

[access_control]
deny = ["compute instances delete"]
"#;

        let config = load_config_from_str(toml, FileFormat::Toml).unwrap();
        assert_eq!(config.server.name, "test-server");
        assert_eq!(config.gcloud.binary, "/usr/bin/gcloud");
        assert_eq!(config.gcloud.timeout_secs, 60);
        assert_eq!(
            config.access_control.deny,
            Some(vec!["compute instances delete".to_string()])
        );
    }

    #[test]
    fn test_top_level_json_rules() {
        let json = r#"{"allow": ["compute instances", "beta storage"]}"#;
        let config = load_config_from_str(json, FileFormat::Json).unwrap();
        assert_eq!(
            config.access_control.allow,
            Some(vec![
                "compute instances".to_string(),
                "beta storage".to_string()
            ])
        );
        assert!(config.access_control.deny.is_none());
    }

    #[test]
    fn test_allow_and_deny_conflict() {
        let json = r#"{"allow": ["compute"], "deny": ["storage"]}"#;
        let result = load_config_from_str(json, FileFormat::Json);
        assert!(matches!(result.unwrap_err(), ConfigError::Conflict));
    }

    #[test]
    fn test_toml_section_conflict() {
        let toml = r#"
[access_control]
allow = ["compute"]
deny = ["compute ssh"]
"#;
        let result = load_config_from_str(toml, FileFormat::Toml);
        assert!(matches!(result.unwrap_err(), ConfigError::Conflict));
    }

    #[test]
    fn test_blank_pattern_rejected() {
        let json = r#"{"deny": ["compute ssh", "   "]}"#;
        let result = load_config_from_str(json, FileFormat::Json);
        match result.unwrap_err() {
            ConfigError::InvalidPattern { reason, .. } => {
                assert!(reason.contains("access_control.deny"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let toml = r#"
[gcloud]
timeout_secs = 0
"#;
        let result = load_config_from_str(toml, FileFormat::Toml);
        assert!(matches!(result.unwrap_err(), ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_format_for_path() {
        assert_eq!(format_for_path("rules.json"), FileFormat::Json);
        assert_eq!(format_for_path("rules.JSON"), FileFormat::Json);
        assert_eq!(format_for_path("config.toml"), FileFormat::Toml);
        assert_eq!(format_for_path("config"), FileFormat::Toml);
    }
}
