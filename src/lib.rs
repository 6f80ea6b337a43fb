//! gcloud MCP Server
//!
//! A Model Context Protocol server that lets an agent run gcloud commands,
//! guarded by command-prefix access control.
//!
//! ## Features
//!
//! - **`run_gcloud_command` tool** runs any gcloud command that passes access control
//! - **Allowlist or denylist** of command prefixes, plus a built-in denylist of
//!   interactive and credential-printing commands
//! - **Release track awareness**: denying a GA command blocks it on every track,
//!   denying a pre-GA command blocks only that track
//! - **Suggestions**: a denied command that is permitted on another release track
//!   is reported with the permitted form
//!
//! ## Example Configuration
//!
//! ```toml
//! [gcloud]
//! binary = "gcloud"
//! timeout_secs = 300
//!
//! [access_control]
//! deny = ["compute instances delete", "alpha"]
//! ```
//!
//! A JSON file with a top-level `{"allow": [...]}` or `{"deny": [...]}` is
//! accepted as well.

pub mod access_control;
pub mod cli;
pub mod config;
pub mod error;
pub mod server;
pub mod tools;
pub mod transport;

// Re-export main types
pub use access_control::AccessControlList;
pub use cli::GcloudCli;
pub use config::{AppConfig, load_config};
pub use error::{ConfigError, ToolError};
pub use server::GcloudMcpHandler;
