//! Error types for gcloud-mcp
//!
//! This module defines the error hierarchy used throughout the application.
//! We use `thiserror` for library-style errors that are part of the API,
//! and convert to appropriate MCP error responses at the boundary.

pub mod mcp_mapper;

use std::fmt;
use thiserror::Error;

/// Introspection arguments that print the active access control rules
pub const DEBUG_CONFIG_ARGS: [&str; 3] = ["gcloud-mcp", "debug", "config"];

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Invalid command pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid configuration: access_control.allow and access_control.deny cannot both be set")]
    Conflict,
}

/// Failure category of a gcloud invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    BadRequest,
    AlreadyExists,
    Timeout,
    Unknown,
}

impl ErrorKind {
    /// Classify gcloud error output
    ///
    /// gcloud reports API status names (`NOT_FOUND`) as well as prose
    /// (`was not found`), so both forms are recognized.
    pub fn classify(stderr: &str) -> Self {
        let text = stderr.to_lowercase();
        let has = |markers: &[&str]| markers.iter().any(|m| text.contains(m));

        if has(&["not_found", "not found"]) {
            ErrorKind::NotFound
        } else if has(&["permission_denied", "permission", "forbidden"]) {
            ErrorKind::Forbidden
        } else if has(&["already_exists", "already exists"]) {
            ErrorKind::AlreadyExists
        } else if has(&["invalid_argument", "invalid", "usage:"]) {
            ErrorKind::BadRequest
        } else if has(&["timed out", "deadline", "timeout"]) {
            ErrorKind::Timeout
        } else {
            ErrorKind::Unknown
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// gcloud subprocess errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to run gcloud: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("gcloud did not finish within {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    #[error("{0}")]
    Syntax(String),

    #[error("Unexpected output from gcloud: {0}")]
    InvalidOutput(String),

    #[error("gcloud exited with code {exit_code} ({kind}): {message}")]
    Failed {
        kind: ErrorKind,
        exit_code: i32,
        message: String,
    },
}

impl CliError {
    /// Build an error from a failed command's exit code and stderr
    pub fn from_output(exit_code: i32, stderr: &str) -> Self {
        CliError::Failed {
            kind: ErrorKind::classify(stderr),
            exit_code,
            message: stderr.trim().to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CliError::Spawn(_) | CliError::InvalidOutput(_) => ErrorKind::Unknown,
            CliError::Timeout { .. } => ErrorKind::Timeout,
            CliError::Syntax(_) => ErrorKind::BadRequest,
            CliError::Failed { kind, .. } => *kind,
        }
    }
}

/// A command refused by access control
#[derive(Debug)]
pub struct AccessDeniedError {
    pub command: String,
    pub reason: String,
    pub suggestion: Option<String>,
}

impl AccessDeniedError {
    pub fn new(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            reason: reason.into(),
            suggestion: None,
        }
    }

    /// Attach a permitted alternative on another release track
    pub fn with_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }
}

impl fmt::Display for AccessDeniedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command is not allowed: {}.", self.reason)?;
        match &self.suggestion {
            Some(suggestion) => write!(
                f,
                " A permitted alternative exists on a different release track: '{}'. \
                 Retry with that command if it meets your needs.",
                suggestion
            ),
            None => write!(
                f,
                " To view the active access control configuration, run the command \
                 with args [\"{}\", \"{}\", \"{}\"].",
                DEBUG_CONFIG_ARGS[0], DEBUG_CONFIG_ARGS[1], DEBUG_CONFIG_ARGS[2]
            ),
        }
    }
}

impl std::error::Error for AccessDeniedError {}

/// Tool execution errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Invalid command syntax: {0}")]
    InvalidSyntax(String),

    #[error("{0}")]
    Cli(#[from] CliError),

    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    AccessDenied(#[from] AccessDeniedError),
}

/// Result type alias for gcloud invocations
pub type CliResult<T> = std::result::Result<T, CliError>;
