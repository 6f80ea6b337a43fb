//! MCP server handler
//!
//! Implements the MCP protocol handler for gcloud tools.

use crate::access_control::AccessControlList;
use crate::cli::{SharedCanonicalizer, SharedExecutor};
use crate::config::AppConfig;
use crate::error::ToolError;
use crate::error::mcp_mapper::map_tool_error;
use crate::tools::{ToolContext, ToolOutput, ToolRegistry, definitions};
use rmcp::ErrorData as McpError;
use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, InitializeResult,
    ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities, Tool,
    ToolsCapability,
};
use rmcp::service::{RequestContext, RoleServer};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// gcloud MCP server handler
#[derive(Clone)]
pub struct GcloudMcpHandler {
    /// Server name for MCP
    name: String,
    /// Server version
    version: String,
    /// Tool registry
    registry: Arc<ToolRegistry>,
    /// Access control list
    acl: Arc<AccessControlList>,
    /// Command canonicalizer
    canonicalizer: SharedCanonicalizer,
    /// Command executor
    executor: SharedExecutor,
}

impl GcloudMcpHandler {
    /// Create a new handler with shared collaborators
    pub fn new(
        config: &AppConfig,
        acl: Arc<AccessControlList>,
        canonicalizer: SharedCanonicalizer,
        executor: SharedExecutor,
    ) -> Self {
        let mut registry = ToolRegistry::new();
        definitions::register_all_tools(&mut registry);

        info!(tools = registry.len(), "Initialized gcloud MCP handler");

        Self {
            name: config.server.name.clone(),
            version: config.server.version.clone(),
            registry: Arc::new(registry),
            acl,
            canonicalizer,
            executor,
        }
    }

    /// Get the number of registered tools
    pub fn tool_count(&self) -> usize {
        self.registry.len()
    }

    /// Create tool context for a request
    fn create_context(&self, request_id: &str) -> ToolContext {
        ToolContext::new(
            self.acl.clone(),
            self.canonicalizer.clone(),
            self.executor.clone(),
            request_id,
        )
    }

    /// Convert internal tool output to MCP result
    fn to_mcp_result(output: ToolOutput) -> CallToolResult {
        CallToolResult {
            content: vec![Content::text(output.text)],
            is_error: Some(output.is_error),
            meta: None,
            structured_content: None,
        }
    }

    /// Convert registry tools to MCP tool definitions
    pub fn mcp_tools(&self) -> Vec<Tool> {
        self.registry
            .tools()
            .map(|tool| {
                // Convert schemars schema to MCP format (JsonObject = Map<String, Value>)
                let schema_value = serde_json::to_value(&tool.input_schema)
                    .unwrap_or_else(|_| serde_json::json!({}));

                let mut input_schema: Map<String, Value> = Map::new();
                input_schema.insert("type".to_string(), Value::String("object".to_string()));

                if let Some(props) = schema_value.get("properties") {
                    input_schema.insert("properties".to_string(), props.clone());
                }
                if let Some(required) = schema_value.get("required") {
                    input_schema.insert("required".to_string(), required.clone());
                }

                Tool {
                    name: Cow::Borrowed(tool.name),
                    description: Some(Cow::Borrowed(tool.description)),
                    input_schema: Arc::new(input_schema),
                    annotations: None,
                    icons: None,
                    meta: None,
                    output_schema: None,
                    title: None,
                }
            })
            .collect()
    }

    /// Execute a tool call
    ///
    /// Malformed requests become protocol errors; everything else,
    /// access denials included, is a tool result with `is_error` set.
    pub async fn execute_tool(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<CallToolResult, McpError> {
        // Generate a request ID for tracing
        let request_id = format!("{:x}", rand::random::<u64>());
        let ctx = self.create_context(&request_id);

        let args = arguments
            .map(Value::Object)
            .unwrap_or_else(|| serde_json::json!({}));

        match self.registry.execute(name, &ctx, args).await {
            Ok(output) => Ok(Self::to_mcp_result(output)),
            Err(e) => {
                if let Some(protocol_error) = map_tool_error(&e) {
                    debug!(error = %e, "Rejecting malformed tool call");
                    return Err(protocol_error);
                }
                if !matches!(e, ToolError::AccessDenied(_)) {
                    error!(error = %e, request_id = %request_id, "Tool execution failed");
                }
                Ok(CallToolResult {
                    content: vec![Content::text(e.to_string())],
                    is_error: Some(true),
                    meta: None,
                    structured_content: None,
                })
            }
        }
    }
}

impl ServerHandler for GcloudMcpHandler {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: self.name.clone(),
                version: self.version.clone(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "gcloud MCP Server - Run gcloud commands with release-track aware access control"
                    .to_string(),
            ),
        }
    }

    #[instrument(skip(self, _context))]
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        debug!("Listing tools");
        async move {
            Ok(ListToolsResult {
                tools: self.mcp_tools(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    #[instrument(skip(self, _context), fields(tool = %request.name))]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        debug!(?request.arguments, "Calling tool");
        async move { self.execute_tool(&request.name, request.arguments).await }
    }
}
