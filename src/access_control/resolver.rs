//! Access control list
//!
//! Combines the user's allow or deny rules with the built-in deny rules:
//! 1. Built-in and user deny rules (deny always wins)
//! 2. User allow rules (absent means everything not denied is allowed)

use crate::access_control::defaults::default_deny_rules;
use crate::access_control::patterns::{RuleSet, tokenize};
use crate::access_control::types::RuleKind;
use crate::config::AccessControlConfig;
use crate::error::ConfigError;
use std::fmt;
use tracing::{debug, trace};

/// Which kind of user rules are active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Allowlist,
    Denylist,
}

/// Access control list
///
/// Built once at startup and read-only afterwards, so it can be shared
/// across concurrent requests without locking.
#[derive(Debug, Clone)]
pub struct AccessControlList {
    /// User allow rules
    allow: Option<RuleSet>,
    /// User deny rules
    deny: Option<RuleSet>,
    /// User deny rules unioned with the built-in ones
    effective_deny: RuleSet,
}

/// Why a command was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// Matched a user or built-in deny pattern
    Denylisted { pattern: String },
    /// An allowlist is active and nothing in it matched
    NotAllowlisted,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::Denylisted { pattern } => {
                write!(f, "command is denylisted by pattern '{}'", pattern)
            }
            DenialReason::NotAllowlisted => write!(f, "command is not in the allowlist"),
        }
    }
}

/// Result of access check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Command may run
    Allowed,
    /// Command is refused
    Denied(DenialReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed)
    }

    pub fn is_denied(&self) -> bool {
        !self.is_allowed()
    }

    /// Human readable explanation (empty when allowed)
    pub fn message(&self) -> String {
        match self {
            AccessDecision::Allowed => String::new(),
            AccessDecision::Denied(reason) => reason.to_string(),
        }
    }
}

impl AccessControlList {
    /// Create an access control list from optional allow and deny pattern lists
    ///
    /// Supplying both is a configuration error.
    pub fn new(
        allow: Option<&[String]>,
        deny: Option<&[String]>,
    ) -> Result<Self, ConfigError> {
        if allow.is_some() && deny.is_some() {
            return Err(ConfigError::Conflict);
        }

        let allow = allow
            .map(|patterns| RuleSet::new(RuleKind::Allow, patterns))
            .transpose()?;
        let deny = deny
            .map(|patterns| RuleSet::new(RuleKind::Deny, patterns))
            .transpose()?;

        Ok(Self::from_rules(allow, deny))
    }

    /// Assemble an access control list from compiled rule sets
    ///
    /// Does not reject an allow set alongside a deny set; when both are
    /// present the deny set takes precedence and the allow set is printed.
    pub fn from_rules(allow: Option<RuleSet>, deny: Option<RuleSet>) -> Self {
        let effective_deny = match &deny {
            Some(user) => default_deny_rules().union(user),
            None => default_deny_rules(),
        };

        debug!(
            allow = allow.as_ref().map(RuleSet::len),
            deny = deny.as_ref().map(RuleSet::len),
            effective_deny = effective_deny.len(),
            "Built access control list"
        );

        Self {
            allow,
            deny,
            effective_deny,
        }
    }

    /// Create an access control list from configuration
    pub fn from_config(config: &AccessControlConfig) -> Result<Self, ConfigError> {
        Self::new(config.allow.as_deref(), config.deny.as_deref())
    }

    /// Create an access control list with only the built-in deny rules
    pub fn unrestricted() -> Self {
        Self {
            allow: None,
            deny: None,
            effective_deny: default_deny_rules(),
        }
    }

    /// Which kind of user rules are active
    pub fn mode(&self) -> AccessMode {
        if self.allow.is_some() {
            AccessMode::Allowlist
        } else {
            AccessMode::Denylist
        }
    }

    /// Check whether a canonical command path may run
    pub fn check(&self, canonical_path: &str) -> AccessDecision {
        let tokens = tokenize(canonical_path);

        if let Some(pattern) = self.effective_deny.find_match(&tokens) {
            trace!(command = %canonical_path, pattern = %pattern, "Denied by pattern");
            return AccessDecision::Denied(DenialReason::Denylisted {
                pattern: pattern.to_string(),
            });
        }

        match &self.allow {
            Some(allow) if !allow.matches(&tokens) => {
                trace!(command = %canonical_path, "Not matched by any allow pattern");
                AccessDecision::Denied(DenialReason::NotAllowlisted)
            }
            _ => AccessDecision::Allowed,
        }
    }

    /// Render the user-configured rules
    ///
    /// Built-in deny rules are not listed since they cannot be configured.
    pub fn print(&self) -> String {
        let (header, rules) = match self.mode() {
            AccessMode::Allowlist => ("Allowlisted commands:", self.allow.as_ref()),
            AccessMode::Denylist => ("Denylisted commands:", self.deny.as_ref()),
        };

        let mut out = header.to_string();
        for pattern in rules.map(RuleSet::patterns).unwrap_or_default() {
            out.push_str(&format!("\n- {}", pattern));
        }
        out
    }
}

impl Default for AccessControlList {
    fn default() -> Self {
        Self::unrestricted()
    }
}
