// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use super::status::{BRANCH_UNKNOWN, CommitInfo, RepoRef, StatusRecord};
use crate::git::query::CommitLine;

fn repo_ref(name: &str) -> RepoRef {
    RepoRef {
        name: name.to_string(),
        path: PathBuf::from(format!("/srv/git/{name}")),
    }
}

#[test]
fn test_repo_ref_from_path() {
    let repo = RepoRef::from_path(PathBuf::from("/srv/git/my-tool"));
    assert_eq!(repo.name, "my-tool");
    assert_eq!(repo.path, PathBuf::from("/srv/git/my-tool"));
}

#[test]
fn test_unknown_record_has_sentinels_not_zeros() {
    let record = StatusRecord::unknown(repo_ref("alpha"));
    assert_eq!(record.branch, BRANCH_UNKNOWN);
    assert_eq!(record.changes, None);
    assert_eq!(record.ahead, None);
    assert_eq!(record.behind, None);
    assert!(record.commit.is_none());
    assert!(record.error.is_none());
    // Unknown must never read as clean
    assert!(!record.is_clean());
}

#[test]
fn test_failed_record_carries_reason() {
    let record = StatusRecord::failed(repo_ref("alpha"), "status task failed: boom");
    assert_eq!(record.error.as_deref(), Some("status task failed: boom"));
    assert_eq!(record.changes, None);
}

#[test]
fn test_commit_info_truncates_long_subject() {
    let line = CommitLine {
        hash: "abc1234".to_string(),
        author: "Dev".to_string(),
        timestamp: 1_000,
        subject: "x".repeat(100),
    };
    let info = CommitInfo::from_line(&line, SystemTime::UNIX_EPOCH + Duration::from_secs(2_000));
    assert_eq!(info.message.chars().count(), 83);
    assert!(info.message.ends_with("..."));
    assert_eq!(info.relative_time, "16m ago");
    assert_eq!(info.timestamp, 1_000);
}

#[test]
fn test_commit_info_keeps_short_subject() {
    let line = CommitLine {
        hash: "abc1234".to_string(),
        author: "Dev".to_string(),
        timestamp: 1_000,
        subject: "Fix the frobnicator".to_string(),
    };
    let info = CommitInfo::from_line(&line, SystemTime::UNIX_EPOCH + Duration::from_secs(1_030));
    assert_eq!(info.message, "Fix the frobnicator");
    assert_eq!(info.relative_time, "just now");
}

#[test]
fn test_record_serialization_shape() {
    let mut record = StatusRecord::unknown(repo_ref("alpha"));
    record.changes = Some(0);
    record.ahead = Some(1);
    record.behind = Some(2);

    let value = serde_json::to_value(&record).expect("record should serialize");
    // RepoRef is flattened into the top level for the wire format
    assert_eq!(value["name"], "alpha");
    assert_eq!(value["branch"], "unknown");
    assert_eq!(value["changes"], 0);
    assert_eq!(value["ahead"], 1);
    assert_eq!(value["behind"], 2);
    // Unknown issue count serializes as null, not 0
    assert!(value["issues"].is_null());
    // Absent error is omitted entirely
    assert!(value.get("error").is_none());
}

#[test]
fn test_last_timestamp_for_sorting() {
    let mut record = StatusRecord::unknown(repo_ref("alpha"));
    assert_eq!(record.last_timestamp(), 0);
    record.commit = Some(CommitInfo {
        hash: "abc".to_string(),
        message: "m".to_string(),
        author: "a".to_string(),
        relative_time: "just now".to_string(),
        timestamp: 42,
    });
    assert_eq!(record.last_timestamp(), 42);
}
