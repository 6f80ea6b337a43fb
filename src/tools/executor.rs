//! Tool execution framework
//!
//! Shared context and output types for MCP tools.

use crate::access_control::AccessControlList;
use crate::cli::{SharedCanonicalizer, SharedExecutor};
use crate::error::ToolError;
use async_trait::async_trait;
use std::sync::Arc;

/// Static metadata for a tool
pub trait ToolInfo {
    /// Tool name as exposed over MCP
    fn name() -> &'static str;

    /// Tool description for MCP
    fn description() -> &'static str;
}

/// A tool that can be executed with a context
#[async_trait]
pub trait ToolExecutor {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError>;
}

/// Per-request context handed to tools
///
/// Collaborators are injected once at startup and shared by reference count.
#[derive(Clone)]
pub struct ToolContext {
    /// Access control list
    pub acl: Arc<AccessControlList>,
    /// Resolves raw commands to canonical paths
    pub canonicalizer: SharedCanonicalizer,
    /// Runs permitted commands
    pub executor: SharedExecutor,
    /// Request ID for tracing and audit logs
    pub request_id: String,
}

impl ToolContext {
    pub fn new(
        acl: Arc<AccessControlList>,
        canonicalizer: SharedCanonicalizer,
        executor: SharedExecutor,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            acl,
            canonicalizer,
            executor,
            request_id: request_id.into(),
        }
    }
}

/// Tool output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    /// Successful text output
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Output reported to the client as a tool error
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}
