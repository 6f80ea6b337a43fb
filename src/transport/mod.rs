//! Transport module
//!
//! Provides the transport implementations for the MCP server.

pub mod stdio;

pub use stdio::run_stdio;
