//! Pattern matching for access control
//!
//! Patterns are whitespace-separated command prefixes such as
//! `compute instances delete` or `alpha`. Matching is token-granular:
//! `app` matches `app deploy` but never `apphub`.

use crate::access_control::types::{ReleaseTrack, RuleKind};
use crate::error::ConfigError;
use std::fmt;

/// Normalize a command or pattern string into lowercase tokens
pub fn tokenize(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_lowercase).collect()
}

/// Drop a leading release track token, if there is one
pub fn strip_track(tokens: &[String]) -> &[String] {
    match tokens.first() {
        Some(first) if ReleaseTrack::is_track_token(first) => &tokens[1..],
        _ => tokens,
    }
}

/// A normalized command prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    tokens: Vec<String>,
}

impl Pattern {
    /// Normalize a user-supplied pattern string
    ///
    /// Blank patterns are rejected since they would be a prefix of every command.
    pub fn new(source: &str) -> Result<Self, ConfigError> {
        let tokens = tokenize(source);
        if tokens.is_empty() {
            return Err(ConfigError::InvalidPattern {
                pattern: source.to_string(),
                reason: "pattern must contain at least one command token".to_string(),
            });
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Track named by the pattern's first token (GA if none)
    pub fn release_track(&self) -> ReleaseTrack {
        ReleaseTrack::detect(&self.tokens)
    }

    /// Plain token-prefix comparison
    pub fn is_prefix_of(&self, command: &[String]) -> bool {
        command.len() >= self.tokens.len()
            && self.tokens.iter().zip(command).all(|(p, c)| p == c)
    }

    /// Match with allow or deny semantics
    ///
    /// Allow patterns compare the raw command, track token included.
    /// Deny patterns that do not name a track are compared against the
    /// command with its track token stripped, so they block every track.
    pub fn matches(&self, command: &[String], kind: RuleKind) -> bool {
        match kind {
            RuleKind::Allow => self.is_prefix_of(command),
            RuleKind::Deny if self.release_track() != ReleaseTrack::Ga => {
                self.is_prefix_of(command)
            }
            RuleKind::Deny => self.is_prefix_of(strip_track(command)),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

/// An ordered set of patterns sharing allow or deny semantics
#[derive(Debug, Clone)]
pub struct RuleSet {
    kind: RuleKind,
    patterns: Vec<Pattern>,
}

impl RuleSet {
    /// Create a rule set from a list of pattern strings
    pub fn new<S: AsRef<str>>(kind: RuleKind, patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_patterns(kind, patterns))
    }

    /// Create a rule set from already-normalized patterns
    pub fn from_patterns(kind: RuleKind, patterns: Vec<Pattern>) -> Self {
        Self { kind, patterns }
    }

    /// Create an empty rule set
    ///
    /// An empty allow set matches everything; an empty deny set matches nothing.
    pub fn empty(kind: RuleKind) -> Self {
        Self {
            kind,
            patterns: Vec::new(),
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Check if the command tokens match any pattern
    pub fn matches(&self, command: &[String]) -> bool {
        if self.patterns.is_empty() {
            return self.kind == RuleKind::Allow;
        }
        self.find_match(command).is_some()
    }

    /// Find the first pattern matching the command tokens
    pub fn find_match(&self, command: &[String]) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.matches(command, self.kind))
    }

    /// Combine with another rule set of the same kind
    pub fn union(mut self, other: &RuleSet) -> Self {
        debug_assert_eq!(self.kind, other.kind);
        self.patterns.extend(other.patterns.iter().cloned());
        self
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}
