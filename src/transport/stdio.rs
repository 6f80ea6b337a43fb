//! Stdio transport
//!
//! Runs the MCP server over standard input/output.

use crate::server::GcloudMcpHandler;
use rmcp::ServiceExt;
use rmcp::transport::io::stdio;
use tracing::info;

/// Run the MCP server using stdio transport
pub async fn run_stdio(handler: GcloudMcpHandler) -> anyhow::Result<()> {
    info!("Starting gcloud MCP server with stdio transport");

    let transport = stdio();

    let server = handler.serve(transport).await?;

    // Wait for the client to disconnect
    server.waiting().await?;

    info!("gcloud MCP server stopped");
    Ok(())
}
