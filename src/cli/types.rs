//! gcloud output types

use crate::error::{CliError, CliResult};
use serde::Deserialize;

/// One entry of `gcloud meta lint-gcloud-commands` output
#[derive(Debug, Clone, Deserialize)]
pub struct LintResult {
    /// Command with flags and positional arguments removed
    #[serde(default)]
    pub command_string_no_args: String,
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
}

impl LintResult {
    /// Canonical path without the leading `gcloud` token
    pub fn canonical_path(&self) -> String {
        let mut tokens = self.command_string_no_args.split_whitespace().peekable();
        if tokens.peek() == Some(&"gcloud") {
            tokens.next();
        }
        tokens.collect::<Vec<_>>().join(" ")
    }

    /// Lint failure rendered as `<error_type>: <error_message>`
    pub fn failure_message(&self) -> String {
        match (&self.error_type, &self.error_message) {
            (Some(kind), Some(message)) => format!("{}: {}", kind, message),
            (None, Some(message)) => message.clone(),
            (Some(kind), None) => kind.clone(),
            (None, None) => "command could not be parsed".to_string(),
        }
    }
}

/// Parse lint output into a canonical path or a syntax error
pub fn parse_lint_output(stdout: &str) -> CliResult<String> {
    let results: Vec<LintResult> = serde_json::from_str(stdout.trim())
        .map_err(|e| CliError::InvalidOutput(format!("lint output is not valid JSON: {}", e)))?;

    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| CliError::InvalidOutput("lint output is empty".to_string()))?;

    if first.success {
        Ok(first.canonical_path())
    } else {
        Err(CliError::Syntax(first.failure_message()))
    }
}

/// Result of running a gcloud command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Render stdout with stderr appended under a `STDERR:` header
    pub fn to_text(&self) -> String {
        let mut text = self.stdout.clone();
        if !self.stderr.trim().is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str("STDERR:\n");
            text.push_str(&self.stderr);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lint_success() {
        let stdout = r#"[{"command_string_no_args": "gcloud compute instances describe", "success": true, "error_message": null, "error_type": null}]"#;
        assert_eq!(
            parse_lint_output(stdout).unwrap(),
            "compute instances describe"
        );
    }

    #[test]
    fn test_parse_lint_failure() {
        let stdout = r#"[{"command_string_no_args": "gcloud compute instancez", "success": false, "error_message": "Invalid choice: 'instancez'", "error_type": "UnknownCommandError"}]"#;
        let err = parse_lint_output(stdout).unwrap_err();
        assert!(matches!(err, CliError::Syntax(_)));
        assert_eq!(
            err.to_string(),
            "UnknownCommandError: Invalid choice: 'instancez'"
        );
    }

    #[test]
    fn test_parse_lint_empty_and_garbage() {
        assert!(matches!(
            parse_lint_output("[]").unwrap_err(),
            CliError::InvalidOutput(_)
        ));
        assert!(matches!(
            parse_lint_output("ERROR: gcloud crashed").unwrap_err(),
            CliError::InvalidOutput(_)
        ));
    }

    #[test]
    fn test_output_text_with_stderr() {
        let output = CommandOutput {
            exit_code: 0,
            stdout: "[]".to_string(),
            stderr: "Listed 0 items.\n".to_string(),
        };
        assert_eq!(output.to_text(), "[]\nSTDERR:\nListed 0 items.\n");
    }

    #[test]
    fn test_output_text_without_stderr() {
        let output = CommandOutput {
            exit_code: 0,
            stdout: "ok\n".to_string(),
            stderr: "  ".to_string(),
        };
        assert_eq!(output.to_text(), "ok\n");
    }
}
