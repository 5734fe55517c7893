// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Snapshot data model for one scan cycle.
//!
//! A `StatusRecord` is owned by exactly one scan pass: records are created
//! fresh, never mutated after aggregation, and never merged across passes —
//! the caller keeps only the latest one per repository.
//!
//! `None` on a count field is the "unknown" sentinel. It is never collapsed
//! to zero: a repository whose status query failed must not look clean, and
//! a repository without an upstream must not look in-sync.

use serde::Serialize;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::git::query::CommitLine;
use crate::utility::time::relative_time;

/// Branch sentinel when HEAD does not point at a branch.
pub const BRANCH_DETACHED: &str = "detached";
/// Branch sentinel when the branch query failed.
pub const BRANCH_UNKNOWN: &str = "unknown";

/// Maximum commit-subject length kept in a snapshot.
const MESSAGE_LIMIT: usize = 80;

/// Identity of one working copy under the scan root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRef {
    /// Unique name, derived from the final path segment.
    pub name: String,
    /// Absolute path of the working copy.
    pub path: PathBuf,
}

impl RepoRef {
    /// Creates a reference from a directory path; the name is the final
    /// path segment.
    #[must_use]
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self { name, path }
    }
}

/// Immutable snapshot of the tip commit at scan time.
#[derive(Debug, Clone, Serialize)]
pub struct CommitInfo {
    /// Abbreviated commit hash.
    pub hash: String,
    /// First line of the commit message, truncated to 80 characters.
    pub message: String,
    /// Author identity string.
    pub author: String,
    /// Human-relative age, e.g. "5m ago".
    pub relative_time: String,
    /// Raw unix timestamp, kept for recent-first sorting.
    pub timestamp: i64,
}

impl CommitInfo {
    /// Builds a snapshot from raw `git log` fields, stamping the relative
    /// age against `now`.
    #[must_use]
    pub fn from_line(line: &CommitLine, now: SystemTime) -> Self {
        let mut message: String = line.subject.chars().take(MESSAGE_LIMIT).collect();
        if line.subject.chars().count() > MESSAGE_LIMIT {
            message.push_str("...");
        }
        Self {
            hash: line.hash.clone(),
            message,
            author: line.author.clone(),
            relative_time: relative_time(line.timestamp, now),
            timestamp: line.timestamp,
        }
    }
}

/// Status snapshot for one working copy, produced by a single scan pass.
#[derive(Debug, Clone, Serialize)]
pub struct StatusRecord {
    /// The working copy this snapshot describes.
    #[serde(flatten)]
    pub repo: RepoRef,
    /// Current branch, or [`BRANCH_DETACHED`] / [`BRANCH_UNKNOWN`].
    pub branch: String,
    /// Uncommitted changes (staged + unstaged + untracked); `None` = unknown.
    pub changes: Option<u32>,
    /// Commits ahead of upstream; `None` = no upstream or unknown.
    pub ahead: Option<u32>,
    /// Commits behind upstream; `None` = no upstream or unknown.
    pub behind: Option<u32>,
    /// Tip commit, absent for an empty repository.
    pub commit: Option<CommitInfo>,
    /// Browsable remote URL, when the origin remote points at GitHub.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    /// Open issue count from the tracker CLI; `None` = unavailable.
    pub issues: Option<u32>,
    /// Extraction failure reasons, if any query failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusRecord {
    /// A record with every field at its unknown sentinel.
    #[must_use]
    pub fn unknown(repo: RepoRef) -> Self {
        Self {
            repo,
            branch: BRANCH_UNKNOWN.to_string(),
            changes: None,
            ahead: None,
            behind: None,
            commit: None,
            github_url: None,
            issues: None,
            error: None,
        }
    }

    /// A record representing a wholesale extraction failure.
    #[must_use]
    pub fn failed(repo: RepoRef, reason: impl Into<String>) -> Self {
        let mut record = Self::unknown(repo);
        record.error = Some(reason.into());
        record
    }

    /// True when the working tree is *measured* clean. Unknown is not clean.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        matches!(self.changes, Some(0))
    }

    /// Tip-commit timestamp for recent-first ordering (0 when absent).
    #[must_use]
    pub fn last_timestamp(&self) -> i64 {
        self.commit.as_ref().map_or(0, |c| c.timestamp)
    }
}
