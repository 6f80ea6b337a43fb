//! Tool definitions
//!
//! This module contains the gcloud MCP tool implementations.

pub mod gcloud;

use crate::tools::ToolRegistry;

/// Register all tools with the registry
pub fn register_all_tools(registry: &mut ToolRegistry) {
    gcloud::register(registry);
}
