// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the safe-mutation subsystem and the dashboard
//! boundary, against real temporary git repositories with local remotes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use repodash::config::{Config, OpsConfig, TrackerConfig};
use repodash::dashboard::{Dashboard, MergeOutcome};
use repodash::error::DashError;
use repodash::ops::OperationKind;
use repodash::ops::executor::MutationExecutor;
use repodash::scan::extractor::StatusExtractor;
use repodash::scan::status::RepoRef;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Helper to run git commands in a directory
fn run_git(args: &[&str], cwd: &Path) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Create an initialized git repo with an initial commit
fn init_origin(dir: &Path) {
    assert!(run_git(&["init", "-q", "-b", "main"], dir), "git init failed");
    run_git(&["config", "user.email", "test@test.com"], dir);
    run_git(&["config", "user.name", "Test"], dir);
    fs::write(dir.join("README.md"), "# Test").unwrap();
    run_git(&["add", "."], dir);
    assert!(
        run_git(&["commit", "-m", "Initial commit"], dir),
        "git commit failed"
    );
}

/// Add one numbered commit to a repository
fn add_commit(dir: &Path, n: u32) {
    fs::write(dir.join(format!("file{n}.txt")), format!("change {n}\n")).unwrap();
    run_git(&["add", "."], dir);
    assert!(
        run_git(&["commit", "-m", &format!("Change {n}")], dir),
        "git commit failed"
    );
}

/// Fixture: an origin repository plus a clone named `name` under `root`.
/// The clone tracks origin/main, so ahead/behind are measurable.
fn clone_under_root(tmp: &Path, root: &Path, name: &str) -> PathBuf {
    let origin = tmp.join(format!("{name}-origin"));
    fs::create_dir_all(&origin).unwrap();
    init_origin(&origin);
    assert!(
        run_git(&["clone", "-q", origin.to_str().unwrap(), name], root),
        "git clone failed"
    );
    origin
}

fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.scan.root = root.to_path_buf();
    config.scan.workers = 4;
    config.tracker = TrackerConfig::disabled();
    config
}

// =============================================================================
// the full protocol, on the spec's worked example:
// A clean and 2 behind, B with 3 uncommitted changes
// =============================================================================

#[tokio::test]
async fn scan_then_guarded_mutations() {
    let tmp = temp_dir();
    let root = tmp.path().join("root");
    fs::create_dir(&root).unwrap();

    let a_origin = clone_under_root(tmp.path(), &root, "A");
    clone_under_root(tmp.path(), &root, "B");

    // A falls 2 behind its upstream
    add_commit(&a_origin, 1);
    add_commit(&a_origin, 2);
    assert!(run_git(&["fetch", "-q", "--all"], &root.join("A")));

    // B accumulates 3 uncommitted changes
    for file in ["x.txt", "y.txt", "z.txt"] {
        fs::write(root.join("B").join(file), "dirty").unwrap();
    }

    let dashboard = Dashboard::new(&test_config(&root));

    // Scan: one record per repo, locator order, counts exact
    let records = dashboard.scan_all().await.expect("scan must succeed");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].repo.name, "A");
    assert_eq!(records[0].changes, Some(0));
    assert_eq!(records[0].ahead, Some(0));
    assert_eq!(records[0].behind, Some(2));
    assert_eq!(records[1].repo.name, "B");
    assert_eq!(records[1].changes, Some(3));

    // Merge A unconfirmed: clean tree => Allowed, executes, catches up
    let outcome = dashboard.merge("A", false).await.expect("merge A");
    let MergeOutcome::Executed(result) = outcome else {
        panic!("clean repo must not be blocked");
    };
    assert!(result.success, "reason: {:?}", result.reason);
    assert_eq!(result.status.behind, Some(0));
    assert!(result.summary.is_some(), "fast-forward should be digested");

    // Merge B unconfirmed: dirty tree => Blocked with the exact count
    let outcome = dashboard.merge("B", false).await.expect("merge B");
    let MergeOutcome::Blocked { reason, snapshot } = outcome else {
        panic!("dirty repo must be blocked without confirmation");
    };
    assert!(reason.contains("3 uncommitted"), "{reason}");
    assert_eq!(snapshot.changes, Some(3));

    // Merge B confirmed: executes without requiring a re-scan first
    let outcome = dashboard.merge("B", true).await.expect("confirmed merge B");
    let MergeOutcome::Executed(result) = outcome else {
        panic!("confirmed merge must execute");
    };
    assert!(result.success, "reason: {:?}", result.reason);
    assert_eq!(result.summary.as_deref(), Some("Already up to date"));
    // The untracked files are untouched by the merge
    assert_eq!(result.status.changes, Some(3));
}

// =============================================================================
// refresh
// =============================================================================

#[tokio::test]
async fn refresh_updates_behind_without_touching_worktree() {
    let tmp = temp_dir();
    let root = tmp.path().join("root");
    fs::create_dir(&root).unwrap();
    let origin = clone_under_root(tmp.path(), &root, "A");

    // Local uncommitted edit + new upstream commit
    fs::write(root.join("A").join("local.txt"), "edit").unwrap();
    add_commit(&origin, 1);

    let dashboard = Dashboard::new(&test_config(&root));
    let result = dashboard.refresh("A").await.expect("refresh A");

    assert!(result.success, "reason: {:?}", result.reason);
    assert_eq!(result.status.behind, Some(1));
    assert_eq!(result.status.ahead, Some(0));
    // Refresh is read-only against the working tree: the uncommitted
    // change count is unchanged.
    assert_eq!(result.status.changes, Some(1));
}

// =============================================================================
// request validation and admission
// =============================================================================

#[tokio::test]
async fn invalid_and_unknown_names_rejected() {
    let tmp = temp_dir();
    let root = tmp.path().join("root");
    fs::create_dir(&root).unwrap();

    let dashboard = Dashboard::new(&test_config(&root));

    let err = dashboard.refresh("../escape").await.expect_err("traversal");
    assert!(matches!(err, DashError::Request(_)), "{err}");
    assert!(err.to_string().contains("invalid repository name"));

    let err = dashboard.refresh("ghost").await.expect_err("unknown repo");
    assert!(err.to_string().contains("repository not found"));
}

#[tokio::test]
async fn second_mutation_for_same_repo_is_busy() {
    let tmp = temp_dir();
    let root = tmp.path().join("root");
    fs::create_dir(&root).unwrap();
    clone_under_root(tmp.path(), &root, "A");

    let dashboard = Dashboard::new(&test_config(&root));

    // join! polls in order: the first refresh admits and parks on its
    // subprocess; the second must be rejected immediately, not queued.
    let (first, second) = tokio::join!(dashboard.refresh("A"), dashboard.refresh("A"));

    let ok = first.expect("first refresh should run");
    assert!(ok.success, "reason: {:?}", ok.reason);

    let err = second.expect_err("second refresh must be rejected");
    assert!(err.to_string().contains("already in progress"), "{err}");

    // The flag is cleared once the first operation finished
    let again = dashboard.refresh("A").await.expect("gate released");
    assert!(again.success);
}

// =============================================================================
// timeout reporting
// =============================================================================

#[tokio::test]
async fn timed_out_mutation_reports_timeout_reason() {
    let tmp = temp_dir();
    let root = tmp.path().join("root");
    fs::create_dir(&root).unwrap();
    clone_under_root(tmp.path(), &root, "A");
    let repo = RepoRef::from_path(root.join("A"));

    let extractor = Arc::new(StatusExtractor::new(
        Duration::from_secs(10),
        TrackerConfig::disabled(),
    ));
    let ops = OpsConfig {
        fetch_timeout_secs: 0,
        pull_timeout_secs: 0,
    };
    let executor = MutationExecutor::new(&ops, extractor);

    let result = executor.execute(&repo, OperationKind::Refresh).await;
    assert!(!result.success, "a killed fetch must never report success");
    let reason = result.reason.expect("timeout must carry a reason");
    assert!(reason.contains("timed out"), "{reason}");
}
