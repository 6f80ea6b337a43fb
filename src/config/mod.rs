//! Configuration module
//!
//! Handles loading and validating configuration from TOML/JSON files and environment variables.

pub mod loader;
pub mod types;

pub use config::FileFormat;
pub use loader::{load_config, load_config_from_str};
pub use types::*;
