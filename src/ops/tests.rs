// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::OperationKind;
use super::executor::summarize_pull;
use super::gate::OperationGate;
use super::validator::{ValidationDecision, validate};
use crate::error::DashError;
use crate::scan::status::{RepoRef, StatusRecord};

fn status_with_changes(name: &str, changes: Option<u32>) -> StatusRecord {
    let mut record = StatusRecord::unknown(RepoRef {
        name: name.to_string(),
        path: PathBuf::from(format!("/srv/git/{name}")),
    });
    record.changes = changes;
    record
}

// =============================================================================
// validator
// =============================================================================

#[test]
fn test_refresh_always_allowed() {
    // Even a dirty or unknown tree cannot block a fetch.
    for changes in [Some(0), Some(7), None] {
        let status = status_with_changes("repo", changes);
        assert!(validate(OperationKind::Refresh, &status, false).is_allowed());
    }
}

#[test]
fn test_merge_allowed_when_clean_unconfirmed() {
    let status = status_with_changes("repo", Some(0));
    assert!(validate(OperationKind::Merge, &status, false).is_allowed());
}

#[test]
fn test_merge_blocked_when_dirty_unconfirmed() {
    let status = status_with_changes("repo", Some(3));
    let decision = validate(OperationKind::Merge, &status, false);
    let ValidationDecision::Blocked { reason, snapshot } = decision else {
        panic!("dirty merge without confirmation must block");
    };
    assert!(reason.contains("3 uncommitted change"));
    // The snapshot must match the status that triggered the block exactly.
    assert_eq!(snapshot.changes, Some(3));
    assert_eq!(snapshot.repo.name, "repo");
}

#[test]
fn test_merge_blocked_when_count_unknown() {
    // Unknown is not clean.
    let status = status_with_changes("repo", None);
    let decision = validate(OperationKind::Merge, &status, false);
    assert!(!decision.is_allowed());
}

#[test]
fn test_merge_confirmed_always_allowed() {
    for changes in [Some(0), Some(3), None] {
        let status = status_with_changes("repo", changes);
        assert!(validate(OperationKind::Merge, &status, true).is_allowed());
    }
}

#[test]
fn test_blocked_decision_serialization() {
    let status = status_with_changes("repo", Some(2));
    let decision = validate(OperationKind::Merge, &status, false);
    let value = serde_json::to_value(&decision).expect("decision should serialize");
    assert_eq!(value["decision"], "blocked");
    assert_eq!(value["snapshot"]["changes"], 2);
}

// =============================================================================
// gate
// =============================================================================

#[test]
fn test_gate_admits_then_rejects_same_repo() {
    let gate = OperationGate::new();
    let permit = gate.try_admit("alpha").expect("first admission succeeds");
    assert!(gate.is_busy("alpha"));

    let second = gate.try_admit("alpha");
    let Err(DashError::Request(req)) = second else {
        panic!("second admission must fail with a request error");
    };
    assert!(req.to_string().contains("already in progress"));

    drop(permit);
    assert!(!gate.is_busy("alpha"));
    gate.try_admit("alpha")
        .expect("admission succeeds again after release");
}

#[test]
fn test_gate_distinct_repos_concurrent() {
    let gate = OperationGate::new();
    let _a = gate.try_admit("alpha").expect("alpha admitted");
    let _b = gate.try_admit("beta").expect("beta admitted concurrently");
    assert!(gate.is_busy("alpha"));
    assert!(gate.is_busy("beta"));
}

#[test]
fn test_gate_releases_on_drop_mid_failure() {
    let gate = OperationGate::new();
    {
        let _permit = gate.try_admit("alpha").expect("admitted");
        // Simulated failure path: permit dropped without explicit release.
    }
    assert!(!gate.is_busy("alpha"));
}

// =============================================================================
// operation kind / pull summary
// =============================================================================

#[test]
fn test_operation_kind_display() {
    assert_eq!(OperationKind::Refresh.to_string(), "refresh");
    assert_eq!(OperationKind::Merge.to_string(), "merge");
}

#[test]
fn test_summarize_pull_up_to_date() {
    let output = "Already up to date.\n";
    assert_eq!(summarize_pull(output).as_deref(), Some("Already up to date"));
}

#[test]
fn test_summarize_pull_files_changed() {
    let output = "Updating 1a2b3c4..5d6e7f8\nFast-forward\n src/main.rs | 4 ++--\n 2 files changed, 2 insertions(+), 2 deletions(-)\n";
    assert_eq!(
        summarize_pull(output).as_deref(),
        Some("2 files changed, 2 insertions(+), 2 deletions(-)")
    );
}

#[test]
fn test_summarize_pull_single_file() {
    let output = " 1 file changed, 1 insertion(+)\n";
    assert_eq!(
        summarize_pull(output).as_deref(),
        Some("1 file changed, 1 insertion(+)")
    );
}

#[test]
fn test_summarize_pull_no_match() {
    assert_eq!(summarize_pull("some unrelated output"), None);
}
