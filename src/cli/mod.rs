//! gcloud CLI module
//!
//! The access control core only needs two operations from gcloud: turning a
//! raw command into its canonical path, and running a command. Both sit
//! behind traits so tests and alternative backends can stand in for the
//! real binary.

pub mod client;
pub mod types;

pub use client::GcloudCli;
pub use types::{CommandOutput, LintResult, parse_lint_output};

use crate::error::CliResult;
// async_trait required for dyn-compatibility with Arc<dyn Canonicalizer>
use async_trait::async_trait;

/// Resolves a raw command string to its canonical path
///
/// `compute instances describe my-vm --zone us-central1-a` becomes
/// `compute instances describe`. Invalid syntax is `CliError::Syntax`;
/// any other error means the CLI could not be consulted.
#[async_trait]
pub trait Canonicalizer: Send + Sync {
    async fn canonicalize(&self, command: &str) -> CliResult<String>;
}

/// Runs a validated command
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run gcloud with the given arguments (without the leading `gcloud`)
    async fn execute(&self, args: &[String]) -> CliResult<CommandOutput>;
}

/// Shared canonicalizer handle
pub type SharedCanonicalizer = std::sync::Arc<dyn Canonicalizer>;

/// Shared executor handle
pub type SharedExecutor = std::sync::Arc<dyn Executor>;
