//! gcloud MCP Server
//!
//! A Model Context Protocol server for the gcloud CLI with command access control.

use clap::Parser;
use gcloud_mcp::{
    access_control::AccessControlList,
    cli::GcloudCli,
    config::{LogFormat, TransportMode, load_config},
    server::GcloudMcpHandler,
    transport::run_stdio,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// gcloud MCP Server - gcloud for agents, with command access control
#[derive(Parser, Debug)]
#[command(name = "gcloud-mcp")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long, env = "GCLOUD_MCP_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GCLOUD_MCP_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Configuration comes first so its logging section can apply; errors are
    // reported once the subscriber is up.
    let config = load_config(args.config.as_deref());

    let (level, format) = match &config {
        Ok(c) => (c.logging.level.clone(), c.logging.format),
        Err(_) => ("info".to_string(), LogFormat::Pretty),
    };
    let level = args.log_level.unwrap_or(level);

    // Initialize logging (stdout carries the MCP protocol)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting gcloud MCP server"
    );

    let config = config.inspect_err(|e| error!(error = %e, "Failed to load configuration"))?;

    // Create access control list
    let acl = Arc::new(
        AccessControlList::from_config(&config.access_control)
            .inspect_err(|e| error!(error = %e, "Failed to create access control list"))?,
    );
    info!(mode = ?acl.mode(), "Access control configured");

    // Create gcloud client (serves as both canonicalizer and executor)
    let gcloud = Arc::new(GcloudCli::new(&config.gcloud));
    info!(binary = gcloud.binary(), "Using gcloud binary");

    let handler = GcloudMcpHandler::new(&config, acl, gcloud.clone(), gcloud);

    match config.server.transport {
        TransportMode::Stdio => run_stdio(handler).await?,
    }

    Ok(())
}
