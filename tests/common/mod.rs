//! Shared test fakes for the gcloud collaborators

#![allow(dead_code)]

use async_trait::async_trait;
use gcloud_mcp::cli::{Canonicalizer, CommandOutput, Executor};
use gcloud_mcp::error::{CliError, CliResult};
use std::collections::HashSet;
use std::sync::Mutex;

/// In-memory stand-in for gcloud
///
/// Canonicalizes by dropping flags and taking the longest known command
/// prefix; unknown commands are syntax errors. Records every call.
pub struct FakeGcloud {
    known: HashSet<String>,
    unavailable: HashSet<String>,
    output: CommandOutput,
    pub lint_calls: Mutex<Vec<String>>,
    pub executed: Mutex<Vec<Vec<String>>>,
}

impl FakeGcloud {
    /// Fake that knows each command on every release track
    pub fn with_commands(commands: &[&str]) -> Self {
        let mut known = HashSet::new();
        for command in commands {
            known.insert(command.to_string());
            for track in ["alpha", "beta", "preview"] {
                known.insert(format!("{} {}", track, command));
            }
        }
        Self {
            known,
            unavailable: HashSet::new(),
            output: CommandOutput {
                exit_code: 0,
                stdout: "ok\n".to_string(),
                stderr: String::new(),
            },
            lint_calls: Mutex::new(Vec::new()),
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Remove a canonical path from the known set
    pub fn without(mut self, canonical: &str) -> Self {
        self.known.remove(canonical);
        self
    }

    /// Make canonicalizing this exact command string fail as if gcloud crashed
    pub fn unavailable_for(mut self, command: &str) -> Self {
        self.unavailable.insert(command.to_string());
        self
    }

    /// Output returned for every executed command
    pub fn with_output(mut self, exit_code: i32, stdout: &str, stderr: &str) -> Self {
        self.output = CommandOutput {
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        };
        self
    }

    pub fn lint_count(&self) -> usize {
        self.lint_calls.lock().unwrap().len()
    }

    pub fn lint_calls(&self) -> Vec<String> {
        self.lint_calls.lock().unwrap().clone()
    }

    pub fn executed(&self) -> Vec<Vec<String>> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Canonicalizer for FakeGcloud {
    async fn canonicalize(&self, command: &str) -> CliResult<String> {
        self.lint_calls.lock().unwrap().push(command.to_string());

        if self.unavailable.contains(command) {
            return Err(CliError::InvalidOutput("simulated gcloud failure".to_string()));
        }

        let tokens: Vec<&str> = command
            .split_whitespace()
            .filter(|t| !t.starts_with('-'))
            .collect();

        (1..=tokens.len())
            .rev()
            .map(|n| tokens[..n].join(" "))
            .find(|prefix| self.known.contains(prefix))
            .ok_or_else(|| CliError::Syntax(format!("UnknownCommandError: {}", command)))
    }
}

#[async_trait]
impl Executor for FakeGcloud {
    async fn execute(&self, args: &[String]) -> CliResult<CommandOutput> {
        self.executed.lock().unwrap().push(args.to_vec());
        Ok(self.output.clone())
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
