//! gcloud command tool
//!
//! Runs an arbitrary gcloud command after it passes access control. Denied
//! commands are answered with the reason and, where one exists, the same
//! command on a release track that is permitted.

use crate::access_control::{AccessDecision, suggest_release_track};
use crate::error::{AccessDeniedError, CliError, DEBUG_CONFIG_ARGS, ToolError};
use crate::tools::executor::{ToolContext, ToolExecutor, ToolInfo, ToolOutput};
use crate::tools::ToolRegistry;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Run a gcloud command
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RunGcloudCommand {
    /// Arguments to pass to gcloud, without the leading `gcloud`
    /// (e.g. ["compute", "instances", "list", "--format=json"])
    pub args: Vec<String>,
}

impl ToolInfo for RunGcloudCommand {
    fn name() -> &'static str {
        "run_gcloud_command"
    }

    fn description() -> &'static str {
        "Run a gcloud command and return its output. Pass the arguments that follow \
         `gcloud` as a list. Some commands are blocked by access control; a blocked \
         command may have a permitted equivalent on another release track (GA, beta, alpha). \
         Pass [\"gcloud-mcp\", \"debug\", \"config\"] to view the active access control rules."
    }
}

impl RunGcloudCommand {
    fn is_debug_config(&self) -> bool {
        self.args.iter().map(String::as_str).eq(DEBUG_CONFIG_ARGS)
    }
}

#[async_trait]
impl ToolExecutor for RunGcloudCommand {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        if self.is_debug_config() {
            debug!(request_id = %ctx.request_id, "Returning access control configuration");
            return Ok(ToolOutput::text(ctx.acl.print()));
        }

        if self.args.is_empty() {
            return Err(ToolError::InvalidArguments(
                "args must contain at least one gcloud argument".to_string(),
            ));
        }

        let command = self.args.join(" ");

        let canonical = match ctx.canonicalizer.canonicalize(&command).await {
            Ok(path) => path,
            Err(CliError::Syntax(message)) => return Err(ToolError::InvalidSyntax(message)),
            Err(e) => return Err(ToolError::Cli(e)),
        };

        if let AccessDecision::Denied(reason) = ctx.acl.check(&canonical) {
            let suggestion =
                suggest_release_track(&self.args, &ctx.acl, ctx.canonicalizer.as_ref()).await;

            // Audit log: access denied
            warn!(
                command = %canonical,
                reason = %reason,
                suggestion = ?suggestion,
                request_id = %ctx.request_id,
                "Access denied to gcloud command"
            );

            return Err(ToolError::AccessDenied(
                AccessDeniedError::new(canonical, reason.to_string()).with_suggestion(suggestion),
            ));
        }

        info!(command = %canonical, request_id = %ctx.request_id, "Running gcloud command");

        let output = ctx.executor.execute(&self.args).await?;

        if output.success() {
            Ok(ToolOutput::text(output.to_text()))
        } else {
            let error = CliError::from_output(output.exit_code, &output.stderr);
            warn!(
                command = %canonical,
                exit_code = output.exit_code,
                kind = %error.kind(),
                request_id = %ctx.request_id,
                "gcloud command failed"
            );
            Ok(ToolOutput::error(format!(
                "gcloud exited with code {} ({}).\n{}",
                output.exit_code,
                error.kind(),
                output.to_text()
            )))
        }
    }
}

/// Register gcloud tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register::<RunGcloudCommand>();
}
