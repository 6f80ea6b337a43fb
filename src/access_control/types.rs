//! Access control types
//!
//! Core types used by the access control system.

use std::fmt;

/// API maturity level of a gcloud command surface
///
/// GA is the absence of a track token; the others appear as the first
/// token of a command (`gcloud beta compute ...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseTrack {
    Ga,
    Alpha,
    Beta,
    Preview,
}

impl ReleaseTrack {
    /// Get the track token, or `None` for GA
    pub const fn as_token(&self) -> Option<&'static str> {
        match self {
            ReleaseTrack::Ga => None,
            ReleaseTrack::Alpha => Some("alpha"),
            ReleaseTrack::Beta => Some("beta"),
            ReleaseTrack::Preview => Some("preview"),
        }
    }

    /// Get the track name as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReleaseTrack::Ga => "ga",
            ReleaseTrack::Alpha => "alpha",
            ReleaseTrack::Beta => "beta",
            ReleaseTrack::Preview => "preview",
        }
    }

    /// Parse a track identifier token (case-insensitive)
    ///
    /// Only `alpha`, `beta` and `preview` are track tokens; anything else,
    /// including the literal `ga`, returns `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "alpha" => Some(ReleaseTrack::Alpha),
            "beta" => Some(ReleaseTrack::Beta),
            "preview" => Some(ReleaseTrack::Preview),
            _ => None,
        }
    }

    /// Determine the track of a command from its first token
    pub fn detect<S: AsRef<str>>(tokens: &[S]) -> Self {
        tokens
            .first()
            .and_then(|t| Self::from_token(t.as_ref()))
            .unwrap_or(ReleaseTrack::Ga)
    }

    /// Check if a token is a recognized track identifier
    pub fn is_track_token(token: &str) -> bool {
        Self::from_token(token).is_some()
    }
}

impl fmt::Display for ReleaseTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of the access control list a rule set belongs to
///
/// Allow and deny rules match differently: deny rules without a leading
/// track token apply to every track of the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Allow,
    Deny,
}

impl RuleKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Allow => "allow",
            RuleKind::Deny => "deny",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
