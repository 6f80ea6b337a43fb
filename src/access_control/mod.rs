//! Access control module
//!
//! Decides which gcloud commands an agent may run, and when a command is
//! refused, looks for a permitted equivalent on another release track.
//!
//! ## Access Control Model
//!
//! Users configure either an allowlist or a denylist of command prefixes.
//! A built-in denylist of dangerous commands is always active on top.
//!
//! 1. **Deny patterns** (user + built-in) are checked first and always win
//! 2. **Allow patterns**, if configured, must match for the command to run
//!
//! Patterns are matched token by token against the canonical command path
//! (release track + command groups + command, no flags or positionals).
//! Allow patterns compare the path as-is, so `beta compute` only allows the
//! beta track. Deny patterns without a track token block every track, so
//! `compute ssh` also blocks `alpha compute ssh`; deny patterns that start
//! with a track token only block that track.
//!
//! ## Example Configuration
//!
//! ```toml
//! [access_control]
//! deny = [
//!     "compute instances delete",   # all tracks
//!     "alpha",                      # everything on the alpha track
//! ]
//! ```

pub mod defaults;
pub mod patterns;
pub mod resolver;
pub mod suggest;
pub mod types;

pub use defaults::DEFAULT_DENY;
pub use patterns::{Pattern, RuleSet, strip_track, tokenize};
pub use resolver::{AccessControlList, AccessDecision, AccessMode, DenialReason};
pub use suggest::{CANDIDATE_TRACKS, candidate_args, suggest_release_track};
pub use types::{ReleaseTrack, RuleKind};
