//! gcloud subprocess client
//!
//! Runs the gcloud binary for both command linting and execution.

use crate::cli::types::{CommandOutput, parse_lint_output};
use crate::cli::{Canonicalizer, Executor};
use crate::config::GcloudConfig;
use crate::error::{CliError, CliResult};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// gcloud CLI client
#[derive(Debug, Clone)]
pub struct GcloudCli {
    binary: String,
    timeout: Duration,
}

impl GcloudCli {
    /// Create a new client from configuration
    pub fn new(config: &GcloudConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Run gcloud with the given arguments and collect its output
    ///
    /// A non-zero exit code is not an error here; only failing to spawn or
    /// exceeding the timeout is.
    async fn run(&self, args: &[String]) -> CliResult<CommandOutput> {
        let mut command = Command::new(&self.binary);
        command
            .args(args)
            .env("CLOUDSDK_CORE_DISABLE_PROMPTS", "1")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| CliError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            })??;

        Ok(CommandOutput {
            // None means the process was killed by a signal
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[async_trait]
impl Canonicalizer for GcloudCli {
    #[instrument(skip(self))]
    async fn canonicalize(&self, command: &str) -> CliResult<String> {
        let args = vec![
            "meta".to_string(),
            "lint-gcloud-commands".to_string(),
            "--command-string".to_string(),
            format!("gcloud {}", command),
        ];

        let output = self.run(&args).await?;

        match parse_lint_output(&output.stdout) {
            Err(CliError::InvalidOutput(reason)) if !output.success() => {
                warn!(exit_code = output.exit_code, stderr = %output.stderr.trim(), "Lint command failed");
                Err(CliError::InvalidOutput(format!(
                    "{} (exit code {}: {})",
                    reason,
                    output.exit_code,
                    output.stderr.trim()
                )))
            }
            result => {
                debug!(result = ?result, "Lint finished");
                result
            }
        }
    }
}

#[async_trait]
impl Executor for GcloudCli {
    #[instrument(skip(self), fields(command = %args.join(" ")))]
    async fn execute(&self, args: &[String]) -> CliResult<CommandOutput> {
        let output = self.run(args).await?;
        debug!(exit_code = output.exit_code, "gcloud finished");
        Ok(output)
    }
}
