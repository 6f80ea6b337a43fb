//! Release track suggestion tests

mod common;

use common::{FakeGcloud, strings};
use gcloud_mcp::access_control::{AccessControlList, suggest_release_track};

const COMMANDS: &[&str] = &[
    "compute instances list",
    "compute instances describe",
    "components list",
    "storage ls",
];

fn deny_acl(patterns: &[&str]) -> AccessControlList {
    AccessControlList::new(None, Some(&strings(patterns))).unwrap()
}

fn allow_acl(patterns: &[&str]) -> AccessControlList {
    AccessControlList::new(Some(&strings(patterns)), None).unwrap()
}

#[tokio::test]
async fn test_beta_denied_suggests_ga() {
    let gcloud = FakeGcloud::with_commands(COMMANDS);
    let acl = deny_acl(&["beta compute instances list"]);
    let args = strings(&["beta", "compute", "instances", "list"]);

    let suggestion = suggest_release_track(&args, &acl, &gcloud).await;

    assert_eq!(suggestion.as_deref(), Some("gcloud compute instances list"));
    // Re-validation plus the GA candidate
    assert_eq!(
        gcloud.lint_calls(),
        vec!["beta compute instances list", "compute instances list"]
    );
}

#[tokio::test]
async fn test_ga_outside_allowlist_suggests_beta() {
    let gcloud = FakeGcloud::with_commands(COMMANDS);
    let acl = allow_acl(&["beta compute"]);
    let args = strings(&["compute", "instances", "list"]);

    let suggestion = suggest_release_track(&args, &acl, &gcloud).await;

    assert_eq!(
        suggestion.as_deref(),
        Some("gcloud beta compute instances list")
    );
}

#[tokio::test]
async fn test_ga_level_deny_has_no_alternative() {
    let gcloud = FakeGcloud::with_commands(COMMANDS);
    let acl = deny_acl(&["components list"]);
    let args = strings(&["beta", "components", "list"]);

    let suggestion = suggest_release_track(&args, &acl, &gcloud).await;

    assert_eq!(suggestion, None);
    // GA and alpha were both tried
    assert_eq!(gcloud.lint_count(), 3);
}

#[tokio::test]
async fn test_invalid_syntax_stops_before_candidates() {
    let gcloud = FakeGcloud::with_commands(COMMANDS);
    let acl = deny_acl(&["compute"]);
    let args = strings(&["not-a-group", "frobnicate"]);

    let suggestion = suggest_release_track(&args, &acl, &gcloud).await;

    assert_eq!(suggestion, None);
    assert_eq!(gcloud.lint_calls(), vec!["not-a-group frobnicate"]);
}

#[tokio::test]
async fn test_preview_command_tries_three_candidates_at_most() {
    let gcloud = FakeGcloud::with_commands(COMMANDS);
    let acl = deny_acl(&["compute instances"]);
    let args = strings(&["preview", "compute", "instances", "list"]);

    let suggestion = suggest_release_track(&args, &acl, &gcloud).await;

    assert_eq!(suggestion, None);
    assert_eq!(
        gcloud.lint_calls(),
        vec![
            "preview compute instances list",
            "compute instances list",
            "beta compute instances list",
            "alpha compute instances list",
        ]
    );
}

#[tokio::test]
async fn test_preview_command_reaches_last_candidate() {
    let gcloud = FakeGcloud::with_commands(COMMANDS);
    let acl = allow_acl(&["alpha compute"]);
    let args = strings(&["preview", "compute", "instances", "list", "--limit=5"]);

    let suggestion = suggest_release_track(&args, &acl, &gcloud).await;

    assert_eq!(
        suggestion.as_deref(),
        Some("gcloud alpha compute instances list --limit=5")
    );
    assert_eq!(gcloud.lint_count(), 4);
}

#[tokio::test]
async fn test_preview_is_never_suggested() {
    let gcloud = FakeGcloud::with_commands(COMMANDS);
    let acl = allow_acl(&["preview"]);
    let args = strings(&["storage", "ls"]);

    let suggestion = suggest_release_track(&args, &acl, &gcloud).await;

    assert_eq!(suggestion, None);
    assert!(
        gcloud
            .lint_calls()
            .iter()
            .all(|call| !call.starts_with("preview"))
    );
}

#[tokio::test]
async fn test_failing_candidate_is_skipped() {
    let gcloud = FakeGcloud::with_commands(COMMANDS)
        .unavailable_for("compute instances list --zone us-central1-a");
    let acl = deny_acl(&["alpha compute"]);
    let args = strings(&[
        "alpha",
        "compute",
        "instances",
        "list",
        "--zone",
        "us-central1-a",
    ]);

    let suggestion = suggest_release_track(&args, &acl, &gcloud).await;

    assert_eq!(
        suggestion.as_deref(),
        Some("gcloud beta compute instances list --zone us-central1-a")
    );
    assert_eq!(gcloud.lint_count(), 3);
}

#[tokio::test]
async fn test_candidate_missing_on_track_is_skipped() {
    let gcloud =
        FakeGcloud::with_commands(COMMANDS).without("beta compute instances describe");
    let acl = allow_acl(&["beta compute", "alpha compute"]);
    let args = strings(&["compute", "instances", "describe", "my-vm"]);

    let suggestion = suggest_release_track(&args, &acl, &gcloud).await;

    assert_eq!(
        suggestion.as_deref(),
        Some("gcloud alpha compute instances describe my-vm")
    );
}

#[tokio::test]
async fn test_first_permitted_track_wins() {
    let gcloud = FakeGcloud::with_commands(COMMANDS);
    let acl = allow_acl(&["beta storage", "alpha storage"]);
    let args = strings(&["storage", "ls", "gs://bucket"]);

    let suggestion = suggest_release_track(&args, &acl, &gcloud).await;

    assert_eq!(suggestion.as_deref(), Some("gcloud beta storage ls gs://bucket"));
    // Stops after the first permitted candidate
    assert_eq!(gcloud.lint_count(), 2);
}
