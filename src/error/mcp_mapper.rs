//! MCP error code mapping.
//!
//! Maps tool errors to MCP protocol errors with appropriate JSON-RPC error codes.
//!
//! # Strategy
//! - Protocol-level errors (tool not found, invalid params) → `Err(McpError)`
//! - Tool execution errors → `Ok(CallToolResult { is_error: true })`
//!
//! This distinction allows MCP clients to differentiate between:
//! - Problems with the request itself (protocol errors)
//! - Problems during tool execution (tool errors, including access denials)

use rmcp::ErrorData as McpError;
use rmcp::model::ErrorCode;
use serde_json::json;
use std::borrow::Cow;

use super::ToolError;

/// Maps a `ToolError` to an MCP protocol error.
///
/// Returns `None` for errors that belong in a tool result instead.
pub fn map_tool_error(error: &ToolError) -> Option<McpError> {
    match error {
        ToolError::NotFound(name) => Some(McpError {
            code: ErrorCode::METHOD_NOT_FOUND,
            message: Cow::Owned(format!("Tool '{}' not found", name)),
            data: Some(json!({
                "tool": name,
                "error_type": "ToolNotFound"
            })),
        }),

        ToolError::InvalidArguments(msg) => Some(McpError {
            code: ErrorCode::INVALID_PARAMS,
            message: Cow::Owned(msg.clone()),
            data: Some(json!({
                "error_type": "InvalidArguments"
            })),
        }),

        ToolError::InvalidSyntax(_) | ToolError::Cli(_) | ToolError::AccessDenied(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AccessDeniedError, CliError};

    #[test]
    fn test_map_tool_not_found() {
        let error = ToolError::NotFound("unknown_tool".into());
        let mcp_error = map_tool_error(&error).unwrap();

        assert_eq!(mcp_error.code, ErrorCode::METHOD_NOT_FOUND);
        assert!(mcp_error.message.contains("unknown_tool"));
        assert_eq!(mcp_error.data.unwrap()["error_type"], "ToolNotFound");
    }

    #[test]
    fn test_map_invalid_arguments() {
        let error = ToolError::InvalidArguments("args must not be empty".into());
        let mcp_error = map_tool_error(&error).unwrap();

        assert_eq!(mcp_error.code, ErrorCode::INVALID_PARAMS);
        assert!(mcp_error.message.contains("args"));
    }

    #[test]
    fn test_execution_errors_stay_tool_results() {
        let denied = ToolError::AccessDenied(AccessDeniedError::new(
            "compute ssh",
            "command is denylisted",
        ));
        let syntax = ToolError::InvalidSyntax("UnknownCommandError: comptue".into());
        let cli = ToolError::Cli(CliError::Timeout { timeout_secs: 5 });

        assert!(map_tool_error(&denied).is_none());
        assert!(map_tool_error(&syntax).is_none());
        assert!(map_tool_error(&cli).is_none());
    }
}
