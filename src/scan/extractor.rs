// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Status extractor: derive one `StatusRecord` from one working copy.
//!
//! Each query is its own timeout-bounded subprocess. A failing query
//! records its reason and leaves the affected field at the unknown
//! sentinel; it never aborts the remaining queries for that repository.

use std::time::{Duration, SystemTime};
use tracing::debug;

use crate::config::TrackerConfig;
use crate::git::query;
use crate::scan::status::{BRANCH_DETACHED, CommitInfo, RepoRef, StatusRecord};
use crate::tracker;

/// Extracts status snapshots, one repository at a time.
#[derive(Debug, Clone)]
pub struct StatusExtractor {
    query_timeout: Duration,
    tracker: TrackerConfig,
}

impl StatusExtractor {
    /// Creates an extractor with the given per-query timeout.
    #[must_use]
    pub const fn new(query_timeout: Duration, tracker: TrackerConfig) -> Self {
        Self {
            query_timeout,
            tracker,
        }
    }

    /// Produces a fresh `StatusRecord` for `repo`.
    ///
    /// Infallible by design: every failure is folded into the record's
    /// `error` field so a scan batch can never lose a slot.
    pub async fn extract(&self, repo: &RepoRef) -> StatusRecord {
        let mut record = StatusRecord::unknown(repo.clone());
        let mut problems: Vec<String> = Vec::new();
        let path = &repo.path;
        let timeout = self.query_timeout;

        match query::current_branch(path, timeout).await {
            Ok(Some(branch)) => record.branch = branch,
            Ok(None) => record.branch = BRANCH_DETACHED.to_string(),
            Err(e) => problems.push(format!("branch: {e:#}")),
        }

        match query::change_count(path, timeout).await {
            Ok(count) => record.changes = Some(count),
            Err(e) => problems.push(format!("changes: {e:#}")),
        }

        match query::ahead_behind(path, timeout).await {
            Ok(Some((ahead, behind))) => {
                record.ahead = Some(ahead);
                record.behind = Some(behind);
            }
            // No upstream: ahead/behind stay unknown, not zero
            Ok(None) => {}
            Err(e) => problems.push(format!("divergence: {e:#}")),
        }

        match query::last_commit(path, timeout).await {
            Ok(Some(line)) => record.commit = Some(CommitInfo::from_line(&line, SystemTime::now())),
            // Empty repository
            Ok(None) => {}
            Err(e) => problems.push(format!("commit: {e:#}")),
        }

        // Supplemental fields degrade silently: a missing remote or an
        // unavailable tracker must not mark the record as failed.
        match query::remote_url(path, timeout).await {
            Ok(Some(url)) => record.github_url = tracker::github_web_url(&url),
            Ok(None) => {}
            Err(e) => debug!(repo = %repo.name, error = %e, "remote url query failed"),
        }

        if self.tracker.enabled
            && let Some(url) = &record.github_url
            && let Some(slug) = tracker::github_repo_slug(url)
        {
            record.issues = tracker::open_issue_count(&slug, self.tracker.timeout()).await;
        }

        if !problems.is_empty() {
            record.error = Some(problems.join("; "));
        }
        record
    }
}
