//! Built-in deny rules
//!
//! Commands that are never safe to hand to an agent: interactive sessions,
//! tunnels, credential printing. These apply regardless of user configuration
//! and are not listed by [`AccessControlList::print`](super::AccessControlList::print).

use crate::access_control::patterns::{Pattern, RuleSet};
use crate::access_control::types::RuleKind;
use tracing::error;

/// Always-denied command groups (GA-level, so every track is blocked)
pub const DEFAULT_DENY: &[&str] = &[
    "app instances ssh",
    "auth print-access-token",
    "auth print-identity-token",
    "cloud-shell ssh",
    "compute connect-to-serial-port",
    "compute ssh",
    "compute start-iap-tunnel",
    "compute tpus queued-resources ssh",
    "compute tpus tpu-vm ssh",
    "config config-helper",
    "interactive",
    "meta",
    "workstations ssh",
];

/// Build the default deny rule set
///
/// A built-in pattern that fails to compile is logged and skipped on its
/// own; the remaining rules stay in force.
pub fn default_deny_rules() -> RuleSet {
    compile_deny_rules(DEFAULT_DENY)
}

fn compile_deny_rules(sources: &[&str]) -> RuleSet {
    let patterns = sources
        .iter()
        .filter_map(|source| {
            Pattern::new(source)
                .inspect_err(|e| error!(error = %e, "Skipping built-in deny rule"))
                .ok()
        })
        .collect();

    RuleSet::from_patterns(RuleKind::Deny, patterns)
}
