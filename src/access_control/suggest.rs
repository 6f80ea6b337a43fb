//! Release track suggestions
//!
//! When a command is denied, the same command may still be permitted on a
//! different release track (`gcloud beta ...` instead of `gcloud ...`).
//! Candidates are tried one at a time in a fixed order, each costing one
//! canonicalizer call, and the first permitted one wins.

use crate::access_control::resolver::AccessControlList;
use crate::access_control::types::ReleaseTrack;
use crate::cli::Canonicalizer;
use tracing::{debug, instrument, trace};

/// Tracks offered as alternatives, in priority order
///
/// Preview is never suggested.
pub const CANDIDATE_TRACKS: [ReleaseTrack; 3] =
    [ReleaseTrack::Ga, ReleaseTrack::Beta, ReleaseTrack::Alpha];

/// Rewrite raw arguments onto another release track
///
/// Only the leading track token changes; every other argument keeps its
/// position.
pub fn candidate_args(args: &[String], target: ReleaseTrack) -> Vec<String> {
    let rest = match args.first() {
        Some(first) if ReleaseTrack::is_track_token(first) => &args[1..],
        _ => args,
    };

    let mut out = Vec::with_capacity(rest.len() + 1);
    if let Some(token) = target.as_token() {
        out.push(token.to_string());
    }
    out.extend(rest.iter().cloned());
    out
}

/// Find a permitted equivalent of a denied command on another release track
///
/// Returns the full suggested command line (`gcloud beta ...`), or `None`
/// if the original command does not parse or no candidate is permitted.
/// Canonicalizer calls are sequential: one to re-validate the original,
/// then at most one per candidate track.
#[instrument(skip_all, fields(command = %args.join(" ")))]
pub async fn suggest_release_track(
    args: &[String],
    acl: &AccessControlList,
    canonicalizer: &dyn Canonicalizer,
) -> Option<String> {
    if let Err(e) = canonicalizer.canonicalize(&args.join(" ")).await {
        debug!(error = %e, "Original command does not parse, no suggestion");
        return None;
    }

    let current = ReleaseTrack::detect(args);

    for track in CANDIDATE_TRACKS.into_iter().filter(|t| *t != current) {
        let candidate = candidate_args(args, track);
        let joined = candidate.join(" ");

        let canonical = match canonicalizer.canonicalize(&joined).await {
            Ok(path) => path,
            Err(e) => {
                trace!(track = %track, error = %e, "Candidate not viable");
                continue;
            }
        };

        if acl.check(&canonical).is_allowed() {
            debug!(track = %track, command = %canonical, "Found permitted alternative");
            return Some(format!("gcloud {}", joined));
        }

        trace!(track = %track, command = %canonical, "Candidate denied");
    }

    None
}
